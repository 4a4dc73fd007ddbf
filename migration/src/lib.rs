pub use sea_orm_migration::prelude::*;

mod m20260711_093012_create_urls_table;
mod m20260711_094236_create_url_checks_table;
mod m20260711_101518_urls_name_unique;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260711_093012_create_urls_table::Migration),
            Box::new(m20260711_094236_create_url_checks_table::Migration),
            Box::new(m20260711_101518_urls_name_unique::Migration),
        ]
    }
}
