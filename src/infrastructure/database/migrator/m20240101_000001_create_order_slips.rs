//! Create order_slips table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderSlips::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderSlips::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderSlips::OrderSlipNo).string().not_null())
                    .col(ColumnDef::new(OrderSlips::Company).string().not_null())
                    .col(ColumnDef::new(OrderSlips::CustomerId).integer().not_null())
                    .col(ColumnDef::new(OrderSlips::PickUpPointId).integer().not_null())
                    .col(ColumnDef::new(OrderSlips::Depot).string().not_null())
                    .col(
                        ColumnDef::new(OrderSlips::DeliveredPrice)
                            .string()
                            .not_null()
                            .default("0"),
                    )
                    .col(
                        ColumnDef::new(OrderSlips::Freight)
                            .string()
                            .not_null()
                            .default("0"),
                    )
                    .col(
                        ColumnDef::new(OrderSlips::Finalized)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(OrderSlips::Status)
                            .string()
                            .not_null()
                            .default("Created"),
                    )
                    .col(ColumnDef::new(OrderSlips::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(OrderSlips::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_slips_company_no")
                    .table(OrderSlips::Table)
                    .col(OrderSlips::Company)
                    .col(OrderSlips::OrderSlipNo)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderSlips::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum OrderSlips {
    Table,
    Id,
    OrderSlipNo,
    Company,
    CustomerId,
    PickUpPointId,
    Depot,
    DeliveredPrice,
    Freight,
    Finalized,
    Status,
    CreatedBy,
    CreatedAt,
}
