mod m20261001_120000_first;
mod m20261001_130000_unique_keys;

use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_120000_first::Migration),
            Box::new(m20261001_130000_unique_keys::Migration),
        ]
    }
}
