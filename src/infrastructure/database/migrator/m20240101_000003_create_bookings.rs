//! Create bookings table (authority to load headers)

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_order_slips::OrderSlips;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Bookings::BookingNo)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::Company).string().not_null())
                    .col(ColumnDef::new(Bookings::OrderSlipId).integer().not_null())
                    .col(ColumnDef::new(Bookings::SupplierId).integer().not_null())
                    .col(ColumnDef::new(Bookings::Date).date().not_null())
                    .col(ColumnDef::new(Bookings::ValidUntil).date().not_null())
                    .col(
                        ColumnDef::new(Bookings::UpiReferenceNo)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Bookings::Freight).string().not_null())
                    .col(ColumnDef::new(Bookings::Depot).string().not_null())
                    .col(
                        ColumnDef::new(Bookings::Remarks)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Bookings::IsPrinted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Bookings::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::EditedBy).string())
                    .col(ColumnDef::new(Bookings::EditedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_order_slip")
                            .from(Bookings::Table, Bookings::OrderSlipId)
                            .to(OrderSlips::Table, OrderSlips::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Booking numbers are sequential per company
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_company_no")
                    .table(Bookings::Table)
                    .col(Bookings::Company)
                    .col(Bookings::BookingNo)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    BookingNo,
    Company,
    OrderSlipId,
    SupplierId,
    Date,
    ValidUntil,
    UpiReferenceNo,
    Freight,
    Depot,
    Remarks,
    IsPrinted,
    CreatedBy,
    CreatedAt,
    EditedBy,
    EditedAt,
}
