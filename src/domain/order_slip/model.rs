//! Order slip and appointed-supplier entities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::status::OrderSlipStatus;
use crate::shared::errors::{DomainError, DomainResult};

/// A customer order authorizing a quantity of product to be delivered from
/// one or more appointed suppliers.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSlip {
    pub id: i32,
    pub order_slip_no: String,
    pub company: String,
    pub customer_id: i32,
    /// Load point the product is picked up from
    pub pick_up_point_id: i32,
    pub depot: String,
    pub delivered_price: Decimal,
    pub freight: Decimal,
    /// True once every appointed supplier of this slip has nothing left
    /// to reserve
    pub finalized: bool,
    pub status: OrderSlipStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl OrderSlip {
    /// Flip the slip into `ForApprovalOfOM` after a reservation line.
    pub fn mark_reserved(&mut self) -> DomainResult<()> {
        self.status = self.status.after_reservation().ok_or_else(|| {
            DomainError::Validation(format!(
                "Order slip {} is {} and cannot receive reservations",
                self.order_slip_no, self.status
            ))
        })?;
        Ok(())
    }

    pub fn mark_supplier_appointed(&mut self) -> DomainResult<()> {
        self.status = self.status.after_supplier_appointed().ok_or_else(|| {
            DomainError::Validation(format!(
                "Order slip {} is {} and cannot receive appointments",
                self.order_slip_no, self.status
            ))
        })?;
        Ok(())
    }

    /// Set the finalized flag once every appointment of this slip is
    /// exhausted. Never clears it; reversals do that explicitly.
    pub fn finalize_if_exhausted(&mut self, appointments: &[AppointedSupplier]) -> bool {
        let exhausted = !appointments.is_empty()
            && appointments
                .iter()
                .all(|a| a.remaining_unreserved == Decimal::ZERO);
        if exhausted {
            self.finalized = true;
        }
        exhausted
    }

    /// Whether new appointments/reservations may be listed against it.
    pub fn is_open(&self) -> bool {
        !self.finalized && !self.status.is_terminal()
    }
}

/// Fields supplied when an order slip is registered.
#[derive(Debug, Clone)]
pub struct NewOrderSlip {
    pub order_slip_no: String,
    pub company: String,
    pub customer_id: i32,
    pub pick_up_point_id: i32,
    pub depot: String,
    pub delivered_price: Decimal,
    pub freight: Decimal,
    pub created_by: String,
}

/// A slice of an order slip's quantity allocated to one supplier.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointedSupplier {
    /// Sequence id of the appointment
    pub id: i32,
    pub order_slip_id: i32,
    pub supplier_id: i32,
    pub purchase_order_no: Option<String>,
    pub appointed_quantity: Decimal,
    /// Not guarded against going negative, see [`AppointedSupplier::reserve`]
    pub remaining_unreserved: Decimal,
}

impl AppointedSupplier {
    /// Draws `quantity` from the remaining balance.
    ///
    /// Over-reservation is not rejected: the remaining balance may go
    /// negative. Returns `true` when it did.
    pub fn reserve(&mut self, quantity: Decimal) -> bool {
        self.remaining_unreserved -= quantity;
        self.remaining_unreserved < Decimal::ZERO
    }

    /// Puts a previously reserved quantity back.
    pub fn release(&mut self, quantity: Decimal) {
        self.remaining_unreserved += quantity;
    }

    pub fn reserved_quantity(&self) -> Decimal {
        self.appointed_quantity - self.remaining_unreserved
    }
}

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub order_slip_id: i32,
    pub supplier_id: i32,
    pub purchase_order_no: Option<String>,
    pub quantity: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn appointment(id: i32, remaining: i64) -> AppointedSupplier {
        AppointedSupplier {
            id,
            order_slip_id: 1,
            supplier_id: 7,
            purchase_order_no: Some("PO-1".into()),
            appointed_quantity: q(1000),
            remaining_unreserved: q(remaining),
        }
    }

    fn slip(status: OrderSlipStatus) -> OrderSlip {
        OrderSlip {
            id: 1,
            order_slip_no: "OS-1".into(),
            company: "Filpride".into(),
            customer_id: 3,
            pick_up_point_id: 9,
            depot: "Batangas".into(),
            delivered_price: q(60),
            freight: q(2),
            finalized: false,
            status,
            created_by: "tester".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn reserve_and_release_move_the_balance() {
        let mut a = appointment(1, 1000);
        assert!(!a.reserve(q(400)));
        assert_eq!(a.remaining_unreserved, q(600));
        assert_eq!(a.reserved_quantity(), q(400));
        a.release(q(400));
        assert_eq!(a.remaining_unreserved, q(1000));
    }

    #[test]
    fn over_reservation_goes_negative_without_error() {
        let mut a = appointment(1, 100);
        assert!(a.reserve(q(150)));
        assert_eq!(a.remaining_unreserved, q(-50));
    }

    #[test]
    fn finalized_only_when_every_appointment_is_exhausted() {
        let mut s = slip(OrderSlipStatus::SupplierAppointed);
        assert!(!s.finalize_if_exhausted(&[appointment(1, 0), appointment(2, 5)]));
        assert!(!s.finalized);
        assert!(!s.finalize_if_exhausted(&[appointment(1, 0), appointment(2, -5)]));
        assert!(s.finalize_if_exhausted(&[appointment(1, 0), appointment(2, 0)]));
        assert!(s.finalized);
    }

    #[test]
    fn finalized_flag_is_not_cleared_by_a_later_check() {
        let mut s = slip(OrderSlipStatus::ForApprovalOfOM);
        s.finalized = true;
        s.finalize_if_exhausted(&[appointment(1, 10)]);
        assert!(s.finalized);
        assert!(!s.is_open());
    }

    #[test]
    fn terminal_slip_rejects_reservation() {
        let mut s = slip(OrderSlipStatus::Disapproved);
        let err = s.mark_reserved().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(s.status, OrderSlipStatus::Disapproved);

        let mut s = slip(OrderSlipStatus::Created);
        s.mark_reserved().unwrap();
        assert_eq!(s.status, OrderSlipStatus::ForApprovalOfOM);
    }
}
