//! Row ↔ domain conversion helpers
//!
//! Decimals are persisted in their canonical string form so SQLite keeps
//! them exact; a row that fails to parse is reported as corrupt rather
//! than silently zeroed.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{
    AppointedSupplier, AuditCategory, AuditEntry, Booking, OrderSlip, OrderSlipStatus,
    Reservation,
};
use crate::infrastructure::database::entities::{
    appointed_supplier, audit_trail, booking, booking_line, order_slip,
};
use crate::shared::errors::InfraError;

pub(super) fn parse_decimal(column: &'static str, value: &str) -> Result<Decimal, InfraError> {
    Decimal::from_str(value).map_err(|_| InfraError::CorruptColumn {
        column,
        value: value.to_string(),
    })
}

pub(super) fn order_slip_to_domain(m: order_slip::Model) -> Result<OrderSlip, InfraError> {
    let status =
        OrderSlipStatus::from_str(&m.status).map_err(|_| InfraError::CorruptColumn {
            column: "order_slips.status",
            value: m.status.clone(),
        })?;

    Ok(OrderSlip {
        id: m.id,
        delivered_price: parse_decimal("order_slips.delivered_price", &m.delivered_price)?,
        freight: parse_decimal("order_slips.freight", &m.freight)?,
        order_slip_no: m.order_slip_no,
        company: m.company,
        customer_id: m.customer_id,
        pick_up_point_id: m.pick_up_point_id,
        depot: m.depot,
        finalized: m.finalized,
        status,
        created_by: m.created_by,
        created_at: m.created_at,
    })
}

pub(super) fn appointment_to_domain(
    m: appointed_supplier::Model,
) -> Result<AppointedSupplier, InfraError> {
    Ok(AppointedSupplier {
        id: m.id,
        order_slip_id: m.order_slip_id,
        supplier_id: m.supplier_id,
        appointed_quantity: parse_decimal(
            "appointed_suppliers.appointed_quantity",
            &m.appointed_quantity,
        )?,
        remaining_unreserved: parse_decimal(
            "appointed_suppliers.remaining_unreserved",
            &m.remaining_unreserved,
        )?,
        purchase_order_no: m.purchase_order_no,
    })
}

pub(super) fn reservation_to_domain(m: booking_line::Model) -> Result<Reservation, InfraError> {
    Ok(Reservation {
        id: m.id,
        booking_id: m.booking_id,
        order_slip_id: m.order_slip_id,
        appointed_id: m.appointed_id,
        quantity: parse_decimal("booking_lines.quantity", &m.quantity)?,
        unserved_quantity: parse_decimal("booking_lines.unserved_quantity", &m.unserved_quantity)?,
    })
}

pub(super) fn booking_to_domain(
    m: booking::Model,
    lines: Vec<booking_line::Model>,
) -> Result<Booking, InfraError> {
    let reservations = lines
        .into_iter()
        .map(reservation_to_domain)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Booking {
        id: m.id,
        freight: parse_decimal("bookings.freight", &m.freight)?,
        booking_no: m.booking_no,
        company: m.company,
        order_slip_id: m.order_slip_id,
        supplier_id: m.supplier_id,
        date: m.date,
        valid_until: m.valid_until,
        upi_reference_no: m.upi_reference_no,
        depot: m.depot,
        remarks: m.remarks,
        is_printed: m.is_printed,
        created_by: m.created_by,
        created_at: m.created_at,
        edited_by: m.edited_by,
        edited_at: m.edited_at,
        reservations,
    })
}

pub(super) fn audit_to_domain(m: audit_trail::Model) -> Result<AuditEntry, InfraError> {
    let category =
        AuditCategory::from_str(&m.category).map_err(|_| InfraError::CorruptColumn {
            column: "audit_trails.category",
            value: m.category.clone(),
        })?;

    Ok(AuditEntry {
        actor: m.actor,
        company: m.company,
        category,
        message: m.message,
        recorded_at: m.recorded_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn slip_row(status: &str, freight: &str) -> order_slip::Model {
        order_slip::Model {
            id: 1,
            order_slip_no: "OS-1".into(),
            company: "Filpride".into(),
            customer_id: 2,
            pick_up_point_id: 3,
            depot: "Batangas".into(),
            delivered_price: "61.25".into(),
            freight: freight.into(),
            finalized: false,
            status: status.into(),
            created_by: "tester".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn decimals_keep_their_scale() {
        let slip = order_slip_to_domain(slip_row("ForApprovalOfOM", "1.50")).unwrap();
        assert_eq!(slip.delivered_price.to_string(), "61.25");
        assert_eq!(slip.freight.to_string(), "1.50");
        assert_eq!(slip.status, OrderSlipStatus::ForApprovalOfOM);
    }

    #[test]
    fn unparseable_columns_are_reported() {
        let err = order_slip_to_domain(slip_row("Created", "abc")).unwrap_err();
        assert!(matches!(
            err,
            InfraError::CorruptColumn { column: "order_slips.freight", .. }
        ));

        let err = order_slip_to_domain(slip_row("Pending", "1")).unwrap_err();
        assert!(err.to_string().contains("Pending"));
    }
}
