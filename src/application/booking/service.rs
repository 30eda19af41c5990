//! Reservation engine
//!
//! Creates, replaces and re-dates bookings while keeping every touched
//! appointment's remaining balance, and its order slip's finalized flag and
//! status, consistent. Each public mutation runs in exactly one unit of
//! work and appends exactly one audit entry.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{error, info, warn};

use super::commands::{validate_lines, CreateBooking, EditBooking};
use crate::application::context::RequestContext;
use crate::application::unit_of_work::finish;
use crate::domain::{
    AuditCategory, AuditEntry, Booking, BookingLine, BookingStore, BookingUnitOfWork,
    DomainError, DomainResult, NewBooking, NewReservation, OrderSlip, Reservation,
};

/// Service for authority-to-load bookings
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    validity_days: u32,
}

impl BookingService {
    /// `validity_days` is added to the load date to get a booking's expiry.
    pub fn new(store: Arc<dyn BookingStore>, validity_days: u32) -> Self {
        Self {
            store,
            validity_days,
        }
    }

    pub async fn create_booking(
        &self,
        ctx: &RequestContext,
        cmd: CreateBooking,
    ) -> DomainResult<Booking> {
        let mut uow = self.begin(ctx, "create_booking").await?;
        let result = self.apply_create(uow.as_mut(), ctx, cmd).await;
        let booking = finish(uow, result, ctx, "create_booking").await?;

        info!(
            booking_no = %booking.booking_no,
            lines = booking.reservations.len(),
            quantity = %booking.total_quantity(),
            actor = %ctx.user_name,
            company = %ctx.company,
            "Booking created"
        );
        metrics::counter!("atl_bookings_created_total").increment(1);
        Ok(booking)
    }

    /// Replace every line of an untouched booking.
    ///
    /// Rejected if delivery has already drawn against any line.
    pub async fn edit_booking(
        &self,
        ctx: &RequestContext,
        booking_id: i32,
        cmd: EditBooking,
    ) -> DomainResult<Booking> {
        let mut uow = self.begin(ctx, "edit_booking").await?;
        let result = self.apply_edit(uow.as_mut(), ctx, booking_id, cmd).await;
        let booking = finish(uow, result, ctx, "edit_booking").await?;

        info!(
            booking_no = %booking.booking_no,
            lines = booking.reservations.len(),
            quantity = %booking.total_quantity(),
            actor = %ctx.user_name,
            company = %ctx.company,
            "Booking edited"
        );
        metrics::counter!("atl_bookings_edited_total").increment(1);
        Ok(booking)
    }

    /// Move a booking's expiry without touching its reservations.
    pub async fn update_expiry(
        &self,
        ctx: &RequestContext,
        booking_id: i32,
        valid_until: NaiveDate,
    ) -> DomainResult<Booking> {
        let mut uow = self.begin(ctx, "update_expiry").await?;
        let result = apply_update_expiry(uow.as_mut(), ctx, booking_id, valid_until).await;
        let booking = finish(uow, result, ctx, "update_expiry").await?;

        info!(
            booking_no = %booking.booking_no,
            valid_until = %booking.valid_until,
            actor = %ctx.user_name,
            "Booking expiry updated"
        );
        Ok(booking)
    }

    /// Record that a booking was printed. The first print flips the
    /// printed flag; later prints are audited as re-prints.
    pub async fn record_print(&self, ctx: &RequestContext, booking_id: i32) -> DomainResult<Booking> {
        let mut uow = self.begin(ctx, "record_print").await?;
        let result = apply_record_print(uow.as_mut(), ctx, booking_id).await;
        let booking = finish(uow, result, ctx, "record_print").await?;

        info!(booking_no = %booking.booking_no, actor = %ctx.user_name, "Booking printed");
        Ok(booking)
    }

    pub async fn get_booking(&self, ctx: &RequestContext, booking_id: i32) -> DomainResult<Booking> {
        self.store
            .find_booking(&ctx.company, booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", booking_id))
    }

    pub async fn list_bookings(&self, ctx: &RequestContext) -> DomainResult<Vec<Booking>> {
        self.store.list_bookings(&ctx.company).await
    }

    pub async fn list_audit_trail(&self, ctx: &RequestContext) -> DomainResult<Vec<AuditEntry>> {
        self.store.list_audit_trail(&ctx.company).await
    }

    // ── Unit-of-work bodies ─────────────────────────────────────

    async fn begin(
        &self,
        ctx: &RequestContext,
        operation: &'static str,
    ) -> DomainResult<Box<dyn BookingUnitOfWork>> {
        self.store.begin().await.map_err(|e| {
            error!(operation, actor = %ctx.user_name, error = %e, "Failed to open unit of work");
            e
        })
    }

    async fn apply_create(
        &self,
        uow: &mut dyn BookingUnitOfWork,
        ctx: &RequestContext,
        cmd: CreateBooking,
    ) -> DomainResult<Booking> {
        validate_lines(&cmd.lines)?;
        let valid_until = Booking::expiry_for(cmd.load_date, self.validity_days)?;

        let header_slip = load_order_slip(uow, ctx, cmd.order_slip_id).await?;
        let first = load_order_slip(uow, ctx, cmd.lines[0].order_slip_id).await?;

        let booking_no = uow.next_booking_no(&ctx.company).await?;
        let mut booking = uow
            .insert_booking(NewBooking {
                booking_no,
                company: ctx.company.clone(),
                order_slip_id: header_slip.id,
                supplier_id: cmd.supplier_id,
                date: cmd.load_date,
                valid_until,
                upi_reference_no: cmd.upi_reference_no,
                freight: first.freight,
                depot: first.depot,
                remarks: cmd.remarks.unwrap_or_default(),
                created_by: ctx.user_name.clone(),
            })
            .await?;

        booking.reservations = reserve_lines(uow, ctx, booking.id, &cmd.lines).await?;

        uow.append_audit(AuditEntry::new(
            &ctx.user_name,
            &ctx.company,
            AuditCategory::Create,
            format!("Created authority to load #{}", booking.booking_no),
        ))
        .await?;

        Ok(booking)
    }

    async fn apply_edit(
        &self,
        uow: &mut dyn BookingUnitOfWork,
        ctx: &RequestContext,
        booking_id: i32,
        cmd: EditBooking,
    ) -> DomainResult<Booking> {
        validate_lines(&cmd.lines)?;
        let valid_until = Booking::expiry_for(cmd.load_date, self.validity_days)?;

        let mut booking = load_booking(uow, ctx, booking_id).await?;
        if booking.has_served_lines() {
            return Err(DomainError::Validation(format!(
                "Authority to load #{} has already been served and can no longer be edited",
                booking.booking_no
            )));
        }

        release_lines(uow, ctx, &booking.reservations).await?;
        uow.delete_reservations(booking.id).await?;

        let first = load_order_slip(uow, ctx, cmd.lines[0].order_slip_id).await?;
        booking.supplier_id = cmd.supplier_id;
        booking.date = cmd.load_date;
        booking.valid_until = valid_until;
        booking.upi_reference_no = cmd.upi_reference_no;
        booking.freight = first.freight;
        booking.depot = first.depot;
        if let Some(remarks) = cmd.remarks {
            booking.remarks = remarks;
        }
        booking.edited_by = Some(ctx.user_name.clone());
        booking.edited_at = Some(Utc::now());
        uow.save_booking(&booking).await?;

        booking.reservations = reserve_lines(uow, ctx, booking.id, &cmd.lines).await?;

        uow.append_audit(AuditEntry::new(
            &ctx.user_name,
            &ctx.company,
            AuditCategory::Edit,
            format!("Edited authority to load #{}", booking.booking_no),
        ))
        .await?;

        Ok(booking)
    }
}

async fn apply_update_expiry(
    uow: &mut dyn BookingUnitOfWork,
    ctx: &RequestContext,
    booking_id: i32,
    valid_until: NaiveDate,
) -> DomainResult<Booking> {
    let mut booking = load_booking(uow, ctx, booking_id).await?;
    if valid_until < booking.date {
        return Err(DomainError::Validation(format!(
            "Expiry {} is before the load date {}",
            valid_until, booking.date
        )));
    }

    let previous = booking.valid_until;
    booking.valid_until = valid_until;
    booking.edited_by = Some(ctx.user_name.clone());
    booking.edited_at = Some(Utc::now());
    uow.save_booking(&booking).await?;

    uow.append_audit(AuditEntry::new(
        &ctx.user_name,
        &ctx.company,
        AuditCategory::Update,
        format!(
            "Updated expiry of authority to load #{} from {} to {}",
            booking.booking_no, previous, valid_until
        ),
    ))
    .await?;

    Ok(booking)
}

async fn apply_record_print(
    uow: &mut dyn BookingUnitOfWork,
    ctx: &RequestContext,
    booking_id: i32,
) -> DomainResult<Booking> {
    let mut booking = load_booking(uow, ctx, booking_id).await?;

    let message = if booking.is_printed {
        format!("Printed re-printed copy of authority to load #{}", booking.booking_no)
    } else {
        booking.is_printed = true;
        uow.save_booking(&booking).await?;
        format!("Printed original copy of authority to load #{}", booking.booking_no)
    };

    uow.append_audit(AuditEntry::new(
        &ctx.user_name,
        &ctx.company,
        AuditCategory::Print,
        message,
    ))
    .await?;

    Ok(booking)
}

// ── Ledger steps ────────────────────────────────────────────────

/// Apply each requested line against the ledger.
///
/// Lines whose appointment cannot be resolved for their order slip are
/// skipped. A line that draws more than the appointment has left is
/// booked anyway and leaves a negative balance.
async fn reserve_lines(
    uow: &mut dyn BookingUnitOfWork,
    ctx: &RequestContext,
    booking_id: i32,
    lines: &[BookingLine],
) -> DomainResult<Vec<Reservation>> {
    let mut reserved = Vec::with_capacity(lines.len());

    for line in lines {
        let mut slip = load_order_slip(uow, ctx, line.order_slip_id).await?;
        if slip.status.is_terminal() {
            return Err(DomainError::Validation(format!(
                "Order slip {} is {} and cannot receive reservations",
                slip.order_slip_no, slip.status
            )));
        }

        let Some(mut appointment) = uow
            .find_appointment(line.appointed_id, line.order_slip_id)
            .await?
        else {
            warn!(
                booking_id,
                appointed_id = line.appointed_id,
                order_slip_id = line.order_slip_id,
                "Appointment not found for order slip, line skipped"
            );
            continue;
        };

        if appointment.reserve(line.quantity) {
            warn!(
                booking_id,
                appointed_id = appointment.id,
                remaining = %appointment.remaining_unreserved,
                "Appointment reserved beyond its remaining quantity"
            );
        }
        uow.save_appointment(&appointment).await?;

        let reservation = uow
            .insert_reservation(NewReservation {
                booking_id,
                order_slip_id: slip.id,
                appointed_id: appointment.id,
                quantity: line.quantity,
            })
            .await?;

        let siblings = uow.appointments_for_order_slip(slip.id).await?;
        if slip.finalize_if_exhausted(&siblings) {
            info!(order_slip_no = %slip.order_slip_no, "Order slip fully reserved");
        }
        slip.mark_reserved()?;
        uow.save_order_slip(&slip).await?;

        reserved.push(reservation);
    }

    if reserved.is_empty() {
        return Err(DomainError::Validation(
            "None of the selected appointments could be found".into(),
        ));
    }
    Ok(reserved)
}

/// Give every line's quantity back to its appointment and reopen its slip.
async fn release_lines(
    uow: &mut dyn BookingUnitOfWork,
    ctx: &RequestContext,
    reservations: &[Reservation],
) -> DomainResult<()> {
    for r in reservations {
        let mut appointment = uow
            .find_appointment(r.appointed_id, r.order_slip_id)
            .await?
            .ok_or_else(|| DomainError::not_found("AppointedSupplier", "id", r.appointed_id))?;
        appointment.release(r.quantity);
        uow.save_appointment(&appointment).await?;

        let mut slip = load_order_slip(uow, ctx, r.order_slip_id).await?;
        slip.finalized = false;
        uow.save_order_slip(&slip).await?;
    }
    Ok(())
}

async fn load_order_slip(
    uow: &mut dyn BookingUnitOfWork,
    ctx: &RequestContext,
    id: i32,
) -> DomainResult<OrderSlip> {
    uow.find_order_slip(id)
        .await?
        .filter(|slip| ctx.owns(&slip.company))
        .ok_or_else(|| DomainError::not_found("OrderSlip", "id", id))
}

async fn load_booking(
    uow: &mut dyn BookingUnitOfWork,
    ctx: &RequestContext,
    id: i32,
) -> DomainResult<Booking> {
    uow.find_booking(id)
        .await?
        .filter(|booking| ctx.owns(&booking.company))
        .ok_or_else(|| DomainError::not_found("Booking", "id", id))
}
