use sea_orm_migration::prelude::*;

mod m20260710_initial;
mod m20260711_seed_catalogue;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260710_initial::Migration),
            Box::new(m20260711_seed_catalogue::Migration),
        ]
    }
}
