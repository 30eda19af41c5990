//! Input commands for the reservation engine

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{BookingLine, DomainError, DomainResult};

#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub order_slip_id: i32,
    pub supplier_id: i32,
    pub load_date: NaiveDate,
    pub upi_reference_no: String,
    pub remarks: Option<String>,
    pub lines: Vec<BookingLine>,
}

#[derive(Debug, Clone)]
pub struct EditBooking {
    pub supplier_id: i32,
    pub load_date: NaiveDate,
    pub upi_reference_no: String,
    pub remarks: Option<String>,
    pub lines: Vec<BookingLine>,
}

/// Shape checks that need no store access.
pub(crate) fn validate_lines(lines: &[BookingLine]) -> DomainResult<()> {
    if lines.is_empty() {
        return Err(DomainError::Validation(
            "Select at least one appointment to book".into(),
        ));
    }
    if let Some(line) = lines.iter().find(|l| l.quantity <= Decimal::ZERO) {
        return Err(DomainError::Validation(format!(
            "Quantity for appointment {} must be greater than zero",
            line.appointed_id
        )));
    }
    Ok(())
}
