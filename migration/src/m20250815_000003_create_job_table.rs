use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Job::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Job::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Job::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Job::Title).string().not_null())
                    .col(ColumnDef::new(Job::Location).string())
                    .col(ColumnDef::new(Job::Type).string())
                    .col(ColumnDef::new(Job::Description).text())
                    .col(ColumnDef::new(Job::ApplyUrl).string())
                    .col(
                        ColumnDef::new(Job::PostedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Job::Published)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Job::CompanyId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_company")
                            .from(Job::Table, Job::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Job::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Job {
    Table,
    Id,
    Slug,
    Title,
    Location,
    Type,
    Description,
    ApplyUrl,
    PostedAt,
    Published,
    CompanyId,
}

#[derive(DeriveIden)]
enum Company {
    Table,
    Id,
}
