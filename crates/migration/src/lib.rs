//! Migrator for the accounts schema: `users`, then `tasks`.
pub use sea_orm_migration::prelude::*;

mod m20240812_224250_create_users;
mod m20240901_120000_create_tasks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240812_224250_create_users::Migration),
            Box::new(m20240901_120000_create_tasks::Migration),
        ]
    }
}
