pub use sea_orm_migration::prelude::*;

mod m20251129_000001_create_contractors;
mod m20251129_000002_create_contractor_settings;
mod m20251129_000003_create_jobs;
mod m20251129_000004_create_bids;
mod m20251129_000005_create_bid_calculations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251129_000001_create_contractors::Migration),
            Box::new(m20251129_000002_create_contractor_settings::Migration),
            Box::new(m20251129_000003_create_jobs::Migration),
            Box::new(m20251129_000004_create_bids::Migration),
            Box::new(m20251129_000005_create_bid_calculations::Migration),
        ]
    }
}
