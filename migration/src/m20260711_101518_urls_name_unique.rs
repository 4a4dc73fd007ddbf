use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_index(sea_query::Index::create()
             .name("urls-name-unique")
             .table(super::m20260711_093012_create_urls_table::Urls::Table)
             .col(super::m20260711_093012_create_urls_table::Urls::Name)
             .unique()
             .to_owned()
        ).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(sea_query::Index::drop()
            .name("urls-name-unique")
            .to_owned()
        ).await
    }
}
