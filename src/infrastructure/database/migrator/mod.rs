//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_staff;
mod m20250301_000002_create_customers;
mod m20250301_000003_create_rooms;
mod m20250301_000004_create_bookings;
mod m20250301_000005_create_payments;
mod m20250301_000006_create_services;
mod m20250301_000007_create_booking_services;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_staff::Migration),
            Box::new(m20250301_000002_create_customers::Migration),
            Box::new(m20250301_000003_create_rooms::Migration),
            Box::new(m20250301_000004_create_bookings::Migration),
            Box::new(m20250301_000005_create_payments::Migration),
            Box::new(m20250301_000006_create_services::Migration),
            Box::new(m20250301_000007_create_booking_services::Migration),
        ]
    }
}
