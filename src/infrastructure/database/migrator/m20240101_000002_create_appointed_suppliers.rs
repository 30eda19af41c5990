//! Create appointed_suppliers table
//!
//! One row per supplier allocation of an order slip, carrying the
//! remaining unreserved balance.

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
                    .table(AppointedSuppliers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppointedSuppliers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AppointedSuppliers::OrderSlipId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppointedSuppliers::SupplierId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AppointedSuppliers::PurchaseOrderNo).string())
                    .col(
                        ColumnDef::new(AppointedSuppliers::AppointedQuantity)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppointedSuppliers::RemainingUnreserved)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointed_suppliers_order_slip")
                            .from(AppointedSuppliers::Table, AppointedSuppliers::OrderSlipId)
                            .to(OrderSlips::Table, OrderSlips::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointed_suppliers_supplier")
                    .table(AppointedSuppliers::Table)
                    .col(AppointedSuppliers::SupplierId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointed_suppliers_order_slip")
                    .table(AppointedSuppliers::Table)
                    .col(AppointedSuppliers::OrderSlipId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppointedSuppliers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum AppointedSuppliers {
    Table,
    Id,
    OrderSlipId,
    SupplierId,
    PurchaseOrderNo,
    AppointedQuantity,
    RemainingUnreserved,
}
