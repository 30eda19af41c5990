//! Create audit_trails table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuditTrails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuditTrails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuditTrails::Actor).string().not_null())
                    .col(ColumnDef::new(AuditTrails::Company).string().not_null())
                    .col(ColumnDef::new(AuditTrails::Category).string().not_null())
                    .col(ColumnDef::new(AuditTrails::Message).text().not_null())
                    .col(
                        ColumnDef::new(AuditTrails::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_trails_company")
                    .table(AuditTrails::Table)
                    .col(AuditTrails::Company)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditTrails::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum AuditTrails {
    Table,
    Id,
    Actor,
    Company,
    Category,
    Message,
    RecordedAt,
}
