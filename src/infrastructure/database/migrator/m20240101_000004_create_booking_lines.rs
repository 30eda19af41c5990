//! Create booking_lines table
//!
//! Lines are owned by their booking and replaced wholesale on edit.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_appointed_suppliers::AppointedSuppliers;
use super::m20240101_000003_create_bookings::Bookings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookingLines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BookingLines::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BookingLines::BookingId).integer().not_null())
                    .col(ColumnDef::new(BookingLines::OrderSlipId).integer().not_null())
                    .col(ColumnDef::new(BookingLines::AppointedId).integer().not_null())
                    .col(ColumnDef::new(BookingLines::Quantity).string().not_null())
                    .col(
                        ColumnDef::new(BookingLines::UnservedQuantity)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_lines_booking")
                            .from(BookingLines::Table, BookingLines::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_lines_appointment")
                            .from(BookingLines::Table, BookingLines::AppointedId)
                            .to(AppointedSuppliers::Table, AppointedSuppliers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_lines_booking")
                    .table(BookingLines::Table)
                    .col(BookingLines::BookingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingLines::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BookingLines {
    Table,
    Id,
    BookingId,
    OrderSlipId,
    AppointedId,
    Quantity,
    UnservedQuantity,
}
