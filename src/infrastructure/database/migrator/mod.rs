//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_order_slips;
mod m20240101_000002_create_appointed_suppliers;
mod m20240101_000003_create_bookings;
mod m20240101_000004_create_booking_lines;
mod m20240101_000005_create_booking_sequences;
mod m20240101_000006_create_audit_trails;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_order_slips::Migration),
            Box::new(m20240101_000002_create_appointed_suppliers::Migration),
            Box::new(m20240101_000003_create_bookings::Migration),
            Box::new(m20240101_000004_create_booking_lines::Migration),
            Box::new(m20240101_000005_create_booking_sequences::Migration),
            Box::new(m20240101_000006_create_audit_trails::Migration),
        ]
    }
}
