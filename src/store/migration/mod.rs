use sea_orm_migration::prelude::*;

mod m2025_01_15_000001_create_dictionary_entries;
mod m2025_01_15_000002_create_saved_results;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_01_15_000001_create_dictionary_entries::Migration),
            Box::new(m2025_01_15_000002_create_saved_results::Migration),
        ]
    }
}
