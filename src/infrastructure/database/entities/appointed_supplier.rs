//! Appointed supplier entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointed_suppliers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub order_slip_id: i32,
    pub supplier_id: i32,

    #[sea_orm(nullable)]
    pub purchase_order_no: Option<String>,

    pub appointed_quantity: String,
    /// May be negative, see `AppointedSupplier::reserve`
    pub remaining_unreserved: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order_slip::Entity",
        from = "Column::OrderSlipId",
        to = "super::order_slip::Column::Id"
    )]
    OrderSlip,
}

impl Related<super::order_slip::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderSlip.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
