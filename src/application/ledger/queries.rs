//! Available-appointment queries

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::application::context::RequestContext;
use crate::domain::{BookingStore, DomainError, DomainResult, SupplierAppointment};

/// One appointment a booking line may reserve from.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailableAppointment {
    pub appointed_id: i32,
    pub order_slip_id: i32,
    pub order_slip_no: String,
    pub remaining_quantity: Decimal,
    pub purchase_order_no: Option<String>,
}

impl AvailableAppointment {
    fn from_row(row: &SupplierAppointment, remaining_quantity: Decimal) -> Self {
        Self {
            appointed_id: row.appointment.id,
            order_slip_id: row.order_slip.id,
            order_slip_no: row.order_slip.order_slip_no.clone(),
            remaining_quantity,
            purchase_order_no: row.appointment.purchase_order_no.clone(),
        }
    }
}

/// Read-only view over appointed-supplier balances.
pub struct AppointmentQueries {
    store: Arc<dyn BookingStore>,
}

impl AppointmentQueries {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Appointments of `supplier_id` picked up at `load_point_id` that still
    /// have something left to reserve.
    ///
    /// Finalized slips and slips in a terminal status are left out.
    pub async fn list_available(
        &self,
        ctx: &RequestContext,
        supplier_id: i32,
        load_point_id: i32,
    ) -> DomainResult<Vec<AvailableAppointment>> {
        let rows = self
            .store
            .supplier_appointments(&ctx.company, supplier_id)
            .await?;

        let available: Vec<_> = rows
            .iter()
            .filter(|row| row.order_slip.pick_up_point_id == load_point_id)
            .filter(|row| row.order_slip.is_open())
            .filter(|row| row.appointment.remaining_unreserved > Decimal::ZERO)
            .map(|row| AvailableAppointment::from_row(row, row.appointment.remaining_unreserved))
            .collect();

        debug!(
            supplier_id,
            load_point_id,
            count = available.len(),
            "Listed available appointments"
        );
        Ok(sorted(available))
    }

    /// Same as [`list_available`](Self::list_available), but as seen while
    /// editing `booking_id`: whatever the booking already holds on an
    /// appointment is added back to its remaining quantity.
    ///
    /// Appointments the booking draws from stay listed even if their slip
    /// was finalized by this very booking.
    pub async fn list_available_for_edit(
        &self,
        ctx: &RequestContext,
        supplier_id: i32,
        load_point_id: i32,
        booking_id: i32,
    ) -> DomainResult<Vec<AvailableAppointment>> {
        let booking = self
            .store
            .find_booking(&ctx.company, booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", booking_id))?;
        let held = booking.held_by_appointment();

        let rows = self
            .store
            .supplier_appointments(&ctx.company, supplier_id)
            .await?;

        let available: Vec<_> = rows
            .iter()
            .filter(|row| row.order_slip.pick_up_point_id == load_point_id)
            .filter(|row| !row.order_slip.status.is_terminal())
            .filter_map(|row| {
                let own = held
                    .get(&row.appointment.id)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                let effective = row.appointment.remaining_unreserved + own;
                let listed = if own > Decimal::ZERO {
                    effective >= Decimal::ZERO
                } else {
                    !row.order_slip.finalized && effective > Decimal::ZERO
                };
                listed.then(|| AvailableAppointment::from_row(row, effective))
            })
            .collect();

        debug!(
            supplier_id,
            load_point_id,
            booking_id,
            count = available.len(),
            "Listed available appointments for edit"
        );
        Ok(sorted(available))
    }
}

fn sorted(mut rows: Vec<AvailableAppointment>) -> Vec<AvailableAppointment> {
    rows.sort_by(|a, b| {
        a.order_slip_no
            .cmp(&b.order_slip_no)
            .then(a.appointed_id.cmp(&b.appointed_id))
    });
    rows
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::application::{
        AppointSupplier, BookingService, CreateBooking, OrderSlipService, RegisterOrderSlip,
    };
    use crate::domain::{AppointedSupplier, BookingLine, OrderSlip, OrderSlipStatus};
    use crate::infrastructure::InMemoryBookingStore;

    fn q(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn ctx() -> RequestContext {
        RequestContext::new("jdoe", "Filpride")
    }

    async fn slip(slips: &OrderSlipService, no: &str, pick_up_point_id: i32) -> OrderSlip {
        slips
            .register_order_slip(
                &ctx(),
                RegisterOrderSlip {
                    order_slip_no: no.into(),
                    customer_id: 1,
                    pick_up_point_id,
                    depot: "Batangas".into(),
                    delivered_price: q(60),
                    freight: q(2),
                },
            )
            .await
            .unwrap()
    }

    async fn appoint(
        slips: &OrderSlipService,
        slip: &OrderSlip,
        supplier_id: i32,
        qty: i64,
    ) -> AppointedSupplier {
        slips
            .appoint_supplier(
                &ctx(),
                slip.id,
                AppointSupplier {
                    supplier_id,
                    purchase_order_no: Some(format!("PO-{}", slip.order_slip_no)),
                    quantity: q(qty),
                },
            )
            .await
            .unwrap()
    }

    async fn book(store: &InMemoryBookingStore, a: &AppointedSupplier, qty: i64) -> i32 {
        let service = BookingService::new(Arc::new(store.clone()), 4);
        service
            .create_booking(
                &ctx(),
                CreateBooking {
                    order_slip_id: a.order_slip_id,
                    supplier_id: a.supplier_id,
                    load_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
                    upi_reference_no: "UPI-1".into(),
                    remarks: None,
                    lines: vec![BookingLine {
                        appointed_id: a.id,
                        order_slip_id: a.order_slip_id,
                        quantity: q(qty),
                    }],
                },
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn lists_only_open_appointments_with_a_balance() {
        let store = InMemoryBookingStore::new();
        let slips = OrderSlipService::new(Arc::new(store.clone()));
        let queries = AppointmentQueries::new(Arc::new(store.clone()));

        let open = slip(&slips, "OS-2", 5).await;
        let closed = slip(&slips, "OS-3", 5).await;
        let elsewhere = slip(&slips, "OS-4", 6).await;
        let drained = slip(&slips, "OS-1", 5).await;

        let a_open = appoint(&slips, &open, 7, 300).await;
        appoint(&slips, &open, 8, 300).await;
        appoint(&slips, &closed, 7, 300).await;
        appoint(&slips, &elsewhere, 7, 300).await;
        let a_drained = appoint(&slips, &drained, 7, 100).await;
        store
            .set_order_slip_status(closed.id, OrderSlipStatus::Closed)
            .await;
        book(&store, &a_drained, 100).await;

        let listed = queries.list_available(&ctx(), 7, 5).await.unwrap();
        assert_eq!(
            listed,
            vec![AvailableAppointment {
                appointed_id: a_open.id,
                order_slip_id: open.id,
                order_slip_no: "OS-2".into(),
                remaining_quantity: q(300),
                purchase_order_no: Some("PO-OS-2".into()),
            }]
        );

        // Reads do not move the ledger
        assert_eq!(queries.list_available(&ctx(), 7, 5).await.unwrap(), listed);
    }

    #[tokio::test]
    async fn other_companies_see_nothing() {
        let store = InMemoryBookingStore::new();
        let slips = OrderSlipService::new(Arc::new(store.clone()));
        let queries = AppointmentQueries::new(Arc::new(store.clone()));

        let os = slip(&slips, "OS-1", 5).await;
        appoint(&slips, &os, 7, 300).await;

        let other = RequestContext::new("ana", "Mobility");
        assert!(queries.list_available(&other, 7, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn edit_view_adds_back_what_the_booking_holds() {
        let store = InMemoryBookingStore::new();
        let slips = OrderSlipService::new(Arc::new(store.clone()));
        let queries = AppointmentQueries::new(Arc::new(store.clone()));

        let full = slip(&slips, "OS-1", 5).await;
        let partial = slip(&slips, "OS-2", 5).await;
        let a_full = appoint(&slips, &full, 7, 100).await;
        let a_partial = appoint(&slips, &partial, 7, 500).await;

        let booking_id = book(&store, &a_full, 100).await;
        let other_booking = book(&store, &a_partial, 200).await;

        // OS-1 is finalized, so it only shows up for the booking holding it
        let plain = queries.list_available(&ctx(), 7, 5).await.unwrap();
        assert_eq!(plain.len(), 1);
        assert_eq!(plain[0].remaining_quantity, q(300));

        let for_edit = queries
            .list_available_for_edit(&ctx(), 7, 5, booking_id)
            .await
            .unwrap();
        let remaining: Vec<_> = for_edit
            .iter()
            .map(|a| (a.appointed_id, a.remaining_quantity))
            .collect();
        assert_eq!(remaining, vec![(a_full.id, q(100)), (a_partial.id, q(300))]);

        let for_other = queries
            .list_available_for_edit(&ctx(), 7, 5, other_booking)
            .await
            .unwrap();
        assert_eq!(for_other.len(), 1);
        assert_eq!(for_other[0].remaining_quantity, q(500));
    }

    #[tokio::test]
    async fn edit_view_of_unknown_booking_is_not_found() {
        let store = InMemoryBookingStore::new();
        let queries = AppointmentQueries::new(Arc::new(store));

        let err = queries
            .list_available_for_edit(&ctx(), 7, 5, 99)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Booking", .. }));
    }
}
