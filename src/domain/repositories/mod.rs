//! Persistence ports for the domain layer
//!
//! Contains:
//! - `BookingStore`: entry point: company-scoped reads plus `begin()`
//! - `BookingUnitOfWork`: every read/write of one mutating operation,
//!   committed or rolled back as a whole
//! - `DomainResult`: standard result type for domain operations
//!
//! ```ignore
//! let mut uow = store.begin().await?;
//! let mut slip = uow.find_order_slip(1).await?.ok_or(..)?;
//! slip.mark_reserved()?;
//! uow.save_order_slip(&slip).await?;
//! uow.commit().await?;
//! ```

use async_trait::async_trait;

use super::audit::AuditEntry;
use super::booking::{Booking, NewBooking, NewReservation, Reservation};
use super::order_slip::{AppointedSupplier, NewAppointment, NewOrderSlip, OrderSlip};

pub use crate::shared::errors::DomainResult;

/// An appointment joined with the order slip it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierAppointment {
    pub appointment: AppointedSupplier,
    pub order_slip: OrderSlip,
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Open a unit of work. Dropping it without `commit` discards its writes.
    async fn begin(&self) -> DomainResult<Box<dyn BookingUnitOfWork>>;

    /// Every appointment of `supplier_id` on order slips owned by `company`.
    async fn supplier_appointments(
        &self,
        company: &str,
        supplier_id: i32,
    ) -> DomainResult<Vec<SupplierAppointment>>;

    /// Booking with its reservations, if it belongs to `company`.
    async fn find_booking(&self, company: &str, id: i32) -> DomainResult<Option<Booking>>;

    /// Bookings of `company`, newest first.
    async fn list_bookings(&self, company: &str) -> DomainResult<Vec<Booking>>;

    /// Audit trail of `company`, oldest first.
    async fn list_audit_trail(&self, company: &str) -> DomainResult<Vec<AuditEntry>>;

    /// Cheap round-trip to the backing store
    async fn ping(&self) -> DomainResult<()>;
}

/// Transaction-scoped access to every row a booking operation touches.
///
/// Reads observe the unit's own uncommitted writes. Lookups are not
/// company-scoped; callers check ownership on the returned rows.
#[async_trait]
pub trait BookingUnitOfWork: Send {
    async fn find_order_slip(&mut self, id: i32) -> DomainResult<Option<OrderSlip>>;
    async fn insert_order_slip(&mut self, slip: NewOrderSlip) -> DomainResult<OrderSlip>;
    /// Persist `finalized` and `status`.
    async fn save_order_slip(&mut self, slip: &OrderSlip) -> DomainResult<()>;

    /// The appointment `appointed_id`, only if it belongs to `order_slip_id`.
    async fn find_appointment(
        &mut self,
        appointed_id: i32,
        order_slip_id: i32,
    ) -> DomainResult<Option<AppointedSupplier>>;
    async fn appointments_for_order_slip(
        &mut self,
        order_slip_id: i32,
    ) -> DomainResult<Vec<AppointedSupplier>>;
    async fn insert_appointment(
        &mut self,
        appointment: NewAppointment,
    ) -> DomainResult<AppointedSupplier>;
    /// Persist `remaining_unreserved`.
    async fn save_appointment(&mut self, appointment: &AppointedSupplier) -> DomainResult<()>;

    async fn find_booking(&mut self, id: i32) -> DomainResult<Option<Booking>>;
    async fn insert_booking(&mut self, booking: NewBooking) -> DomainResult<Booking>;
    /// Persist the header fields; reservations are written separately.
    async fn save_booking(&mut self, booking: &Booking) -> DomainResult<()>;
    async fn insert_reservation(&mut self, line: NewReservation) -> DomainResult<Reservation>;
    async fn delete_reservations(&mut self, booking_id: i32) -> DomainResult<u64>;

    /// Next booking number in `company`'s sequence, e.g. `ATL0000000007`.
    async fn next_booking_no(&mut self, company: &str) -> DomainResult<String>;

    async fn append_audit(&mut self, entry: AuditEntry) -> DomainResult<()>;

    async fn commit(self: Box<Self>) -> DomainResult<()>;
    async fn rollback(self: Box<Self>) -> DomainResult<()>;
}

/// Booking numbers are `ATL` followed by a zero-padded per-company counter.
pub fn format_booking_no(sequence: i64) -> String {
    format!("ATL{:010}", sequence)
}
