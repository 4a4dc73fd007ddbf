use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UrlChecks::Table)
                    .col(
                        ColumnDef::new(UrlChecks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UrlChecks::UrlId).big_integer().not_null())
                    .col(ColumnDef::new(UrlChecks::StatusCode).small_integer().null())
                    .col(ColumnDef::new(UrlChecks::H1).string_len(255).null())
                    .col(ColumnDef::new(UrlChecks::Title).string_len(255).null())
                    .col(ColumnDef::new(UrlChecks::Description).text().null())
                    .col(ColumnDef::new(UrlChecks::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-url_checks-url_id")
                            .from(UrlChecks::Table, UrlChecks::UrlId)
                            .to(
                                super::m20260711_093012_create_urls_table::Urls::Table,
                                super::m20260711_093012_create_urls_table::Urls::Id,
                            ),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UrlChecks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UrlChecks {
    Table,
    Id,
    UrlId,
    StatusCode,
    H1,
    Title,
    Description,
    CreatedAt,
}
