//! SeaORM implementation of BookingStore
//!
//! Every unit of work owns one `DatabaseTransaction`. SeaORM rolls a
//! transaction back when it is dropped without `commit`, which covers the
//! error paths the service does not reach explicitly.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::debug;

use super::conversions::{
    appointment_to_domain, audit_to_domain, booking_to_domain, order_slip_to_domain,
    reservation_to_domain,
};
use crate::domain::{
    format_booking_no, AppointedSupplier, AuditEntry, Booking, BookingStore, BookingUnitOfWork,
    DomainError, DomainResult, NewAppointment, NewBooking, NewOrderSlip, NewReservation,
    OrderSlip, OrderSlipStatus, Reservation, SupplierAppointment,
};
use crate::infrastructure::database::entities::{
    appointed_supplier, audit_trail, booking, booking_line, booking_sequence, order_slip,
};

pub struct SeaOrmBookingStore {
    db: DatabaseConnection,
}

impl SeaOrmBookingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Reads shared by the store and its units of work ─────────────

async fn fetch_booking<C: ConnectionTrait>(conn: &C, id: i32) -> DomainResult<Option<Booking>> {
    let Some(model) = booking::Entity::find_by_id(id).one(conn).await? else {
        return Ok(None);
    };
    let lines = booking_line::Entity::find()
        .filter(booking_line::Column::BookingId.eq(id))
        .order_by_asc(booking_line::Column::Id)
        .all(conn)
        .await?;
    Ok(Some(booking_to_domain(model, lines)?))
}

async fn fetch_order_slip<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> DomainResult<Option<OrderSlip>> {
    let model = order_slip::Entity::find_by_id(id).one(conn).await?;
    Ok(model.map(order_slip_to_domain).transpose()?)
}

// ── BookingStore impl ───────────────────────────────────────────

#[async_trait]
impl BookingStore for SeaOrmBookingStore {
    async fn begin(&self) -> DomainResult<Box<dyn BookingUnitOfWork>> {
        let txn = self.db.begin().await?;
        Ok(Box::new(SeaOrmUnitOfWork { txn }))
    }

    async fn supplier_appointments(
        &self,
        company: &str,
        supplier_id: i32,
    ) -> DomainResult<Vec<SupplierAppointment>> {
        let rows = appointed_supplier::Entity::find()
            .find_also_related(order_slip::Entity)
            .filter(appointed_supplier::Column::SupplierId.eq(supplier_id))
            .filter(order_slip::Column::Company.eq(company))
            .order_by_asc(appointed_supplier::Column::Id)
            .all(&self.db)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (appointment, slip) in rows {
            let Some(slip) = slip else { continue };
            out.push(SupplierAppointment {
                appointment: appointment_to_domain(appointment)?,
                order_slip: order_slip_to_domain(slip)?,
            });
        }
        Ok(out)
    }

    async fn find_booking(&self, company: &str, id: i32) -> DomainResult<Option<Booking>> {
        Ok(fetch_booking(&self.db, id)
            .await?
            .filter(|b| b.company == company))
    }

    async fn list_bookings(&self, company: &str) -> DomainResult<Vec<Booking>> {
        let headers = booking::Entity::find()
            .filter(booking::Column::Company.eq(company))
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await?;
        let ids: Vec<i32> = headers.iter().map(|b| b.id).collect();
        let mut lines = booking_line::Entity::find()
            .filter(booking_line::Column::BookingId.is_in(ids))
            .order_by_asc(booking_line::Column::Id)
            .all(&self.db)
            .await?;

        let mut out = Vec::with_capacity(headers.len());
        for header in headers {
            let (own, rest): (Vec<_>, Vec<_>) =
                lines.into_iter().partition(|l| l.booking_id == header.id);
            lines = rest;
            out.push(booking_to_domain(header, own)?);
        }
        Ok(out)
    }

    async fn list_audit_trail(&self, company: &str) -> DomainResult<Vec<AuditEntry>> {
        let models = audit_trail::Entity::find()
            .filter(audit_trail::Column::Company.eq(company))
            .order_by_asc(audit_trail::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models
            .into_iter()
            .map(audit_to_domain)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn ping(&self) -> DomainResult<()> {
        self.db.ping().await?;
        Ok(())
    }
}

// ── BookingUnitOfWork impl ──────────────────────────────────────

pub struct SeaOrmUnitOfWork {
    txn: DatabaseTransaction,
}

#[async_trait]
impl BookingUnitOfWork for SeaOrmUnitOfWork {
    async fn find_order_slip(&mut self, id: i32) -> DomainResult<Option<OrderSlip>> {
        fetch_order_slip(&self.txn, id).await
    }

    async fn insert_order_slip(&mut self, slip: NewOrderSlip) -> DomainResult<OrderSlip> {
        let existing = order_slip::Entity::find()
            .filter(order_slip::Column::Company.eq(slip.company.as_str()))
            .filter(order_slip::Column::OrderSlipNo.eq(slip.order_slip_no.as_str()))
            .one(&self.txn)
            .await?;
        if existing.is_some() {
            return Err(DomainError::Conflict(format!(
                "Order slip {} already exists",
                slip.order_slip_no
            )));
        }

        let model = order_slip::ActiveModel {
            id: NotSet,
            order_slip_no: Set(slip.order_slip_no),
            company: Set(slip.company),
            customer_id: Set(slip.customer_id),
            pick_up_point_id: Set(slip.pick_up_point_id),
            depot: Set(slip.depot),
            delivered_price: Set(slip.delivered_price.to_string()),
            freight: Set(slip.freight.to_string()),
            finalized: Set(false),
            status: Set(OrderSlipStatus::Created.as_str().to_string()),
            created_by: Set(slip.created_by),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&self.txn)
        .await?;

        debug!(order_slip_id = model.id, "Inserted order slip");
        Ok(order_slip_to_domain(model)?)
    }

    async fn save_order_slip(&mut self, slip: &OrderSlip) -> DomainResult<()> {
        let result = order_slip::Entity::update_many()
            .col_expr(order_slip::Column::Finalized, Expr::value(slip.finalized))
            .col_expr(order_slip::Column::Status, Expr::value(slip.status.as_str()))
            .filter(order_slip::Column::Id.eq(slip.id))
            .exec(&self.txn)
            .await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("OrderSlip", "id", slip.id));
        }
        Ok(())
    }

    async fn find_appointment(
        &mut self,
        appointed_id: i32,
        order_slip_id: i32,
    ) -> DomainResult<Option<AppointedSupplier>> {
        let model = appointed_supplier::Entity::find_by_id(appointed_id)
            .filter(appointed_supplier::Column::OrderSlipId.eq(order_slip_id))
            .one(&self.txn)
            .await?;
        Ok(model.map(appointment_to_domain).transpose()?)
    }

    async fn appointments_for_order_slip(
        &mut self,
        order_slip_id: i32,
    ) -> DomainResult<Vec<AppointedSupplier>> {
        let models = appointed_supplier::Entity::find()
            .filter(appointed_supplier::Column::OrderSlipId.eq(order_slip_id))
            .order_by_asc(appointed_supplier::Column::Id)
            .all(&self.txn)
            .await?;
        Ok(models
            .into_iter()
            .map(appointment_to_domain)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn insert_appointment(
        &mut self,
        appointment: NewAppointment,
    ) -> DomainResult<AppointedSupplier> {
        let quantity = appointment.quantity.to_string();
        let model = appointed_supplier::ActiveModel {
            id: NotSet,
            order_slip_id: Set(appointment.order_slip_id),
            supplier_id: Set(appointment.supplier_id),
            purchase_order_no: Set(appointment.purchase_order_no),
            appointed_quantity: Set(quantity.clone()),
            remaining_unreserved: Set(quantity),
        }
        .insert(&self.txn)
        .await?;
        Ok(appointment_to_domain(model)?)
    }

    async fn save_appointment(&mut self, appointment: &AppointedSupplier) -> DomainResult<()> {
        let result = appointed_supplier::Entity::update_many()
            .col_expr(
                appointed_supplier::Column::RemainingUnreserved,
                Expr::value(appointment.remaining_unreserved.to_string()),
            )
            .filter(appointed_supplier::Column::Id.eq(appointment.id))
            .exec(&self.txn)
            .await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("AppointedSupplier", "id", appointment.id));
        }
        Ok(())
    }

    async fn find_booking(&mut self, id: i32) -> DomainResult<Option<Booking>> {
        fetch_booking(&self.txn, id).await
    }

    async fn insert_booking(&mut self, b: NewBooking) -> DomainResult<Booking> {
        let model = booking::ActiveModel {
            id: NotSet,
            booking_no: Set(b.booking_no),
            company: Set(b.company),
            order_slip_id: Set(b.order_slip_id),
            supplier_id: Set(b.supplier_id),
            date: Set(b.date),
            valid_until: Set(b.valid_until),
            upi_reference_no: Set(b.upi_reference_no),
            freight: Set(b.freight.to_string()),
            depot: Set(b.depot),
            remarks: Set(b.remarks),
            is_printed: Set(false),
            created_by: Set(b.created_by),
            created_at: Set(chrono::Utc::now()),
            edited_by: Set(None),
            edited_at: Set(None),
        }
        .insert(&self.txn)
        .await?;

        debug!(booking_id = model.id, booking_no = %model.booking_no, "Inserted booking");
        Ok(booking_to_domain(model, Vec::new())?)
    }

    async fn save_booking(&mut self, b: &Booking) -> DomainResult<()> {
        if booking::Entity::find_by_id(b.id).one(&self.txn).await?.is_none() {
            return Err(DomainError::not_found("Booking", "id", b.id));
        }

        booking::ActiveModel {
            id: Unchanged(b.id),
            order_slip_id: Set(b.order_slip_id),
            supplier_id: Set(b.supplier_id),
            date: Set(b.date),
            valid_until: Set(b.valid_until),
            upi_reference_no: Set(b.upi_reference_no.clone()),
            freight: Set(b.freight.to_string()),
            depot: Set(b.depot.clone()),
            remarks: Set(b.remarks.clone()),
            is_printed: Set(b.is_printed),
            edited_by: Set(b.edited_by.clone()),
            edited_at: Set(b.edited_at),
            ..Default::default()
        }
        .update(&self.txn)
        .await?;
        Ok(())
    }

    async fn insert_reservation(&mut self, line: NewReservation) -> DomainResult<Reservation> {
        let quantity = line.quantity.to_string();
        let model = booking_line::ActiveModel {
            id: NotSet,
            booking_id: Set(line.booking_id),
            order_slip_id: Set(line.order_slip_id),
            appointed_id: Set(line.appointed_id),
            quantity: Set(quantity.clone()),
            unserved_quantity: Set(quantity),
        }
        .insert(&self.txn)
        .await?;
        Ok(reservation_to_domain(model)?)
    }

    async fn delete_reservations(&mut self, booking_id: i32) -> DomainResult<u64> {
        let result = booking_line::Entity::delete_many()
            .filter(booking_line::Column::BookingId.eq(booking_id))
            .exec(&self.txn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn next_booking_no(&mut self, company: &str) -> DomainResult<String> {
        let seed = booking_sequence::ActiveModel {
            company: Set(company.to_string()),
            last_value: Set(1),
        };
        booking_sequence::Entity::insert(seed)
            .on_conflict(
                OnConflict::column(booking_sequence::Column::Company)
                    .value(
                        booking_sequence::Column::LastValue,
                        Expr::col(booking_sequence::Column::LastValue).add(1),
                    )
                    .to_owned(),
            )
            .exec_without_returning(&self.txn)
            .await?;

        let sequence = booking_sequence::Entity::find_by_id(company.to_string())
            .one(&self.txn)
            .await?
            .ok_or_else(|| {
                DomainError::Storage(format!("Booking sequence for {} was not written", company))
            })?;
        Ok(format_booking_no(sequence.last_value))
    }

    async fn append_audit(&mut self, entry: AuditEntry) -> DomainResult<()> {
        audit_trail::ActiveModel {
            id: NotSet,
            actor: Set(entry.actor),
            company: Set(entry.company),
            category: Set(entry.category.as_str().to_string()),
            message: Set(entry.message),
            recorded_at: Set(entry.recorded_at),
        }
        .insert(&self.txn)
        .await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.txn.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        self.txn.rollback().await?;
        Ok(())
    }
}
