//! Schema migrations for the post store.

pub use sea_orm_migration::prelude::*;

mod m20210809_000001_create_posts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20210809_000001_create_posts::Migration)]
    }
}
