//! In-memory booking store for development and testing
//!
//! A unit of work holds the store lock for its lifetime and writes to a
//! staged copy of the state; `commit` swaps the copy in, anything else
//! discards it. Units of work are therefore fully serialized.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{
    format_booking_no, AppointedSupplier, AuditEntry, Booking, BookingStore, BookingUnitOfWork,
    DomainError, DomainResult, NewAppointment, NewBooking, NewOrderSlip, NewReservation,
    OrderSlip, OrderSlipStatus, Reservation, SupplierAppointment,
};

#[derive(Debug, Clone, Default)]
struct LedgerState {
    order_slips: BTreeMap<i32, OrderSlip>,
    appointments: BTreeMap<i32, AppointedSupplier>,
    /// Booking headers; `reservations` is always empty here.
    bookings: BTreeMap<i32, Booking>,
    reservations: BTreeMap<i32, Reservation>,
    sequences: HashMap<String, i64>,
    audit: Vec<AuditEntry>,
}

fn next_key<V>(map: &BTreeMap<i32, V>) -> i32 {
    map.keys().next_back().map_or(1, |k| k + 1)
}

impl LedgerState {
    fn booking(&self, id: i32) -> Option<Booking> {
        let mut booking = self.bookings.get(&id)?.clone();
        booking.reservations = self
            .reservations
            .values()
            .filter(|r| r.booking_id == id)
            .cloned()
            .collect();
        Some(booking)
    }
}

/// Booking store kept entirely in process memory
#[derive(Clone, Default)]
pub struct InMemoryBookingStore {
    state: Arc<Mutex<LedgerState>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate delivery drawing `quantity` from a reservation.
    #[cfg(test)]
    pub(crate) async fn serve_reservation(&self, reservation_id: i32, quantity: rust_decimal::Decimal) {
        let mut state = self.state.lock().await;
        if let Some(r) = state.reservations.get_mut(&reservation_id) {
            r.unserved_quantity -= quantity;
        }
    }

    #[cfg(test)]
    pub(crate) async fn appointment(&self, id: i32) -> Option<AppointedSupplier> {
        self.state.lock().await.appointments.get(&id).cloned()
    }

    #[cfg(test)]
    pub(crate) async fn order_slip(&self, id: i32) -> Option<OrderSlip> {
        self.state.lock().await.order_slips.get(&id).cloned()
    }

    #[cfg(test)]
    pub(crate) async fn set_order_slip_status(&self, id: i32, status: OrderSlipStatus) {
        if let Some(slip) = self.state.lock().await.order_slips.get_mut(&id) {
            slip.status = status;
        }
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn begin(&self) -> DomainResult<Box<dyn BookingUnitOfWork>> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryUnitOfWork { guard, staged }))
    }

    async fn supplier_appointments(
        &self,
        company: &str,
        supplier_id: i32,
    ) -> DomainResult<Vec<SupplierAppointment>> {
        let state = self.state.lock().await;
        Ok(state
            .appointments
            .values()
            .filter(|a| a.supplier_id == supplier_id)
            .filter_map(|a| {
                let slip = state.order_slips.get(&a.order_slip_id)?;
                (slip.company == company).then(|| SupplierAppointment {
                    appointment: a.clone(),
                    order_slip: slip.clone(),
                })
            })
            .collect())
    }

    async fn find_booking(&self, company: &str, id: i32) -> DomainResult<Option<Booking>> {
        let state = self.state.lock().await;
        Ok(state.booking(id).filter(|b| b.company == company))
    }

    async fn list_bookings(&self, company: &str) -> DomainResult<Vec<Booking>> {
        let state = self.state.lock().await;
        Ok(state
            .bookings
            .keys()
            .rev()
            .filter_map(|id| state.booking(*id))
            .filter(|b| b.company == company)
            .collect())
    }

    async fn list_audit_trail(&self, company: &str) -> DomainResult<Vec<AuditEntry>> {
        let state = self.state.lock().await;
        Ok(state
            .audit
            .iter()
            .filter(|e| e.company == company)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> DomainResult<()> {
        Ok(())
    }
}

struct InMemoryUnitOfWork {
    guard: OwnedMutexGuard<LedgerState>,
    staged: LedgerState,
}

#[async_trait]
impl BookingUnitOfWork for InMemoryUnitOfWork {
    async fn find_order_slip(&mut self, id: i32) -> DomainResult<Option<OrderSlip>> {
        Ok(self.staged.order_slips.get(&id).cloned())
    }

    async fn insert_order_slip(&mut self, slip: NewOrderSlip) -> DomainResult<OrderSlip> {
        let duplicate = self
            .staged
            .order_slips
            .values()
            .any(|s| s.company == slip.company && s.order_slip_no == slip.order_slip_no);
        if duplicate {
            return Err(DomainError::Conflict(format!(
                "Order slip {} already exists",
                slip.order_slip_no
            )));
        }

        let created = OrderSlip {
            id: next_key(&self.staged.order_slips),
            order_slip_no: slip.order_slip_no,
            company: slip.company,
            customer_id: slip.customer_id,
            pick_up_point_id: slip.pick_up_point_id,
            depot: slip.depot,
            delivered_price: slip.delivered_price,
            freight: slip.freight,
            finalized: false,
            status: OrderSlipStatus::Created,
            created_by: slip.created_by,
            created_at: Utc::now(),
        };
        self.staged.order_slips.insert(created.id, created.clone());
        Ok(created)
    }

    async fn save_order_slip(&mut self, slip: &OrderSlip) -> DomainResult<()> {
        let stored = self
            .staged
            .order_slips
            .get_mut(&slip.id)
            .ok_or_else(|| DomainError::not_found("OrderSlip", "id", slip.id))?;
        stored.finalized = slip.finalized;
        stored.status = slip.status;
        Ok(())
    }

    async fn find_appointment(
        &mut self,
        appointed_id: i32,
        order_slip_id: i32,
    ) -> DomainResult<Option<AppointedSupplier>> {
        Ok(self
            .staged
            .appointments
            .get(&appointed_id)
            .filter(|a| a.order_slip_id == order_slip_id)
            .cloned())
    }

    async fn appointments_for_order_slip(
        &mut self,
        order_slip_id: i32,
    ) -> DomainResult<Vec<AppointedSupplier>> {
        Ok(self
            .staged
            .appointments
            .values()
            .filter(|a| a.order_slip_id == order_slip_id)
            .cloned()
            .collect())
    }

    async fn insert_appointment(
        &mut self,
        appointment: NewAppointment,
    ) -> DomainResult<AppointedSupplier> {
        let created = AppointedSupplier {
            id: next_key(&self.staged.appointments),
            order_slip_id: appointment.order_slip_id,
            supplier_id: appointment.supplier_id,
            purchase_order_no: appointment.purchase_order_no,
            appointed_quantity: appointment.quantity,
            remaining_unreserved: appointment.quantity,
        };
        self.staged.appointments.insert(created.id, created.clone());
        Ok(created)
    }

    async fn save_appointment(&mut self, appointment: &AppointedSupplier) -> DomainResult<()> {
        let stored = self
            .staged
            .appointments
            .get_mut(&appointment.id)
            .ok_or_else(|| DomainError::not_found("AppointedSupplier", "id", appointment.id))?;
        stored.remaining_unreserved = appointment.remaining_unreserved;
        Ok(())
    }

    async fn find_booking(&mut self, id: i32) -> DomainResult<Option<Booking>> {
        Ok(self.staged.booking(id))
    }

    async fn insert_booking(&mut self, booking: NewBooking) -> DomainResult<Booking> {
        let created = Booking {
            id: next_key(&self.staged.bookings),
            booking_no: booking.booking_no,
            company: booking.company,
            order_slip_id: booking.order_slip_id,
            supplier_id: booking.supplier_id,
            date: booking.date,
            valid_until: booking.valid_until,
            upi_reference_no: booking.upi_reference_no,
            freight: booking.freight,
            depot: booking.depot,
            remarks: booking.remarks,
            is_printed: false,
            created_by: booking.created_by,
            created_at: Utc::now(),
            edited_by: None,
            edited_at: None,
            reservations: Vec::new(),
        };
        self.staged.bookings.insert(created.id, created.clone());
        Ok(created)
    }

    async fn save_booking(&mut self, booking: &Booking) -> DomainResult<()> {
        let stored = self
            .staged
            .bookings
            .get_mut(&booking.id)
            .ok_or_else(|| DomainError::not_found("Booking", "id", booking.id))?;
        *stored = Booking {
            reservations: Vec::new(),
            ..booking.clone()
        };
        Ok(())
    }

    async fn insert_reservation(&mut self, line: NewReservation) -> DomainResult<Reservation> {
        if !self.staged.bookings.contains_key(&line.booking_id) {
            return Err(DomainError::not_found("Booking", "id", line.booking_id));
        }
        let created = Reservation {
            id: next_key(&self.staged.reservations),
            booking_id: line.booking_id,
            order_slip_id: line.order_slip_id,
            appointed_id: line.appointed_id,
            quantity: line.quantity,
            unserved_quantity: line.quantity,
        };
        self.staged.reservations.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete_reservations(&mut self, booking_id: i32) -> DomainResult<u64> {
        let before = self.staged.reservations.len();
        self.staged
            .reservations
            .retain(|_, r| r.booking_id != booking_id);
        Ok((before - self.staged.reservations.len()) as u64)
    }

    async fn next_booking_no(&mut self, company: &str) -> DomainResult<String> {
        let counter = self
            .staged
            .sequences
            .entry(company.to_string())
            .or_insert(0);
        *counter += 1;
        Ok(format_booking_no(*counter))
    }

    async fn append_audit(&mut self, entry: AuditEntry) -> DomainResult<()> {
        self.staged.audit.push(entry);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let InMemoryUnitOfWork { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn new_slip(no: &str, company: &str) -> NewOrderSlip {
        NewOrderSlip {
            order_slip_no: no.into(),
            company: company.into(),
            customer_id: 1,
            pick_up_point_id: 5,
            depot: "Batangas".into(),
            delivered_price: Decimal::from(60),
            freight: Decimal::from(2),
            created_by: "tester".into(),
        }
    }

    #[tokio::test]
    async fn uncommitted_writes_are_discarded() {
        let store = InMemoryBookingStore::new();

        let mut uow = store.begin().await.unwrap();
        uow.insert_order_slip(new_slip("OS-1", "A")).await.unwrap();
        uow.rollback().await.unwrap();

        let mut uow = store.begin().await.unwrap();
        assert!(uow.find_order_slip(1).await.unwrap().is_none());
        drop(uow);

        assert!(store.order_slip(1).await.is_none());
    }

    #[tokio::test]
    async fn committed_writes_are_visible_to_readers() {
        let store = InMemoryBookingStore::new();

        let mut uow = store.begin().await.unwrap();
        let slip = uow.insert_order_slip(new_slip("OS-1", "A")).await.unwrap();
        uow.insert_appointment(NewAppointment {
            order_slip_id: slip.id,
            supplier_id: 7,
            purchase_order_no: None,
            quantity: Decimal::from(10),
        })
        .await
        .unwrap();
        uow.commit().await.unwrap();

        let rows = store.supplier_appointments("A", 7).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order_slip.order_slip_no, "OS-1");
        assert!(store.supplier_appointments("B", 7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn booking_numbers_are_sequential_per_company() {
        let store = InMemoryBookingStore::new();
        let mut uow = store.begin().await.unwrap();
        assert_eq!(uow.next_booking_no("A").await.unwrap(), "ATL0000000001");
        assert_eq!(uow.next_booking_no("A").await.unwrap(), "ATL0000000002");
        assert_eq!(uow.next_booking_no("B").await.unwrap(), "ATL0000000001");
    }

    #[tokio::test]
    async fn duplicate_order_slip_number_conflicts_within_company() {
        let store = InMemoryBookingStore::new();
        let mut uow = store.begin().await.unwrap();
        uow.insert_order_slip(new_slip("OS-1", "A")).await.unwrap();
        let err = uow.insert_order_slip(new_slip("OS-1", "A")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        uow.insert_order_slip(new_slip("OS-1", "B")).await.unwrap();
    }
}
