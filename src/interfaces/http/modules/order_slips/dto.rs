//! Order slip DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{AppointSupplier, RegisterOrderSlip};
use crate::domain::{AppointedSupplier, OrderSlip};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterOrderSlipRequest {
    #[validate(length(min = 1, max = 50))]
    pub order_slip_no: String,
    pub customer_id: i32,
    pub pick_up_point_id: i32,
    #[validate(length(min = 1, max = 100))]
    pub depot: String,
    pub delivered_price: Decimal,
    #[serde(default)]
    pub freight: Decimal,
}

impl From<RegisterOrderSlipRequest> for RegisterOrderSlip {
    fn from(r: RegisterOrderSlipRequest) -> Self {
        Self {
            order_slip_no: r.order_slip_no,
            customer_id: r.customer_id,
            pick_up_point_id: r.pick_up_point_id,
            depot: r.depot,
            delivered_price: r.delivered_price,
            freight: r.freight,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AppointSupplierRequest {
    pub supplier_id: i32,
    #[validate(length(max = 50))]
    pub purchase_order_no: Option<String>,
    pub quantity: Decimal,
}

impl From<AppointSupplierRequest> for AppointSupplier {
    fn from(r: AppointSupplierRequest) -> Self {
        Self {
            supplier_id: r.supplier_id,
            purchase_order_no: r.purchase_order_no,
            quantity: r.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderSlipDto {
    pub id: i32,
    pub order_slip_no: String,
    pub customer_id: i32,
    pub pick_up_point_id: i32,
    pub depot: String,
    pub delivered_price: Decimal,
    pub freight: Decimal,
    pub finalized: bool,
    /// Created, HaulerAppointed, SupplierAppointed, ForApprovalOfOM,
    /// Closed, Expired or Disapproved
    pub status: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<OrderSlip> for OrderSlipDto {
    fn from(s: OrderSlip) -> Self {
        Self {
            id: s.id,
            order_slip_no: s.order_slip_no,
            customer_id: s.customer_id,
            pick_up_point_id: s.pick_up_point_id,
            depot: s.depot,
            delivered_price: s.delivered_price,
            freight: s.freight,
            finalized: s.finalized,
            status: s.status.to_string(),
            created_by: s.created_by,
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentDto {
    pub id: i32,
    pub order_slip_id: i32,
    pub supplier_id: i32,
    pub purchase_order_no: Option<String>,
    pub appointed_quantity: Decimal,
    pub remaining_unreserved: Decimal,
}

impl From<AppointedSupplier> for AppointmentDto {
    fn from(a: AppointedSupplier) -> Self {
        Self {
            id: a.id,
            order_slip_id: a.order_slip_id,
            supplier_id: a.supplier_id,
            purchase_order_no: a.purchase_order_no,
            appointed_quantity: a.appointed_quantity,
            remaining_unreserved: a.remaining_unreserved,
        }
    }
}
