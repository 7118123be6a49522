use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Company::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Company::Name).string().not_null())
                    .col(ColumnDef::new(Company::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Company::Website).string())
                    .col(ColumnDef::new(Company::Logo).string())
                    .col(ColumnDef::new(Company::BannerUrl).string())
                    .col(ColumnDef::new(Company::VideoUrl).string())
                    .col(ColumnDef::new(Company::Description).text())
                    .col(
                        ColumnDef::new(Company::ThemeColor)
                            .string()
                            .not_null()
                            .default("#0a66c2"),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Company::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Company {
    Table,
    Id,
    Name,
    Slug,
    Website,
    Logo,
    BannerUrl,
    VideoUrl,
    Description,
    ThemeColor,
}
