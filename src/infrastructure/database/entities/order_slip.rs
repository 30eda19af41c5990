//! Order slip entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_slips")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub order_slip_no: String,
    pub company: String,
    pub customer_id: i32,
    pub pick_up_point_id: i32,
    pub depot: String,

    /// Decimal, stored as its string form
    pub delivered_price: String,
    /// Decimal, stored as its string form
    pub freight: String,

    pub finalized: bool,

    /// Created, HaulerAppointed, SupplierAppointed, ForApprovalOfOM,
    /// Closed, Expired, Disapproved
    pub status: String,

    pub created_by: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::appointed_supplier::Entity")]
    AppointedSupplier,
}

impl Related<super::appointed_supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppointedSupplier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
