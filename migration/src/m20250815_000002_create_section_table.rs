use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Section::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Section::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Section::CompanyId).string().not_null())
                    .col(ColumnDef::new(Section::Type).string())
                    .col(ColumnDef::new(Section::Title).string().not_null())
                    .col(ColumnDef::new(Section::Content).text())
                    .col(
                        ColumnDef::new(Section::Position)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Section::IsVisible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_section_company")
                            .from(Section::Table, Section::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Section::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Section {
    Table,
    Id,
    CompanyId,
    Type,
    Title,
    Content,
    Position,
    IsVisible,
}

#[derive(DeriveIden)]
enum Company {
    Table,
    Id,
}
