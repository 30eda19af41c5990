//! Booking (authority to load) entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub booking_no: String,
    pub company: String,
    pub order_slip_id: i32,
    pub supplier_id: i32,

    pub date: Date,
    pub valid_until: Date,

    pub upi_reference_no: String,
    pub freight: String,
    pub depot: String,
    pub remarks: String,
    pub is_printed: bool,

    pub created_by: String,
    pub created_at: DateTimeUtc,

    #[sea_orm(nullable)]
    pub edited_by: Option<String>,
    #[sea_orm(nullable)]
    pub edited_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking_line::Entity")]
    BookingLine,
}

impl Related<super::booking_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
