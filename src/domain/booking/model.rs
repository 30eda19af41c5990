//! Booking (authority to load) and reservation entities

use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::shared::errors::{DomainError, DomainResult};

/// One requested line of a booking: draw `quantity` from an appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingLine {
    pub appointed_id: i32,
    pub order_slip_id: i32,
    pub quantity: Decimal,
}

/// One committed line of a booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i32,
    pub booking_id: i32,
    pub order_slip_id: i32,
    pub appointed_id: i32,
    pub quantity: Decimal,
    /// Starts equal to `quantity`; drawn down by delivery processing.
    pub unserved_quantity: Decimal,
}

impl Reservation {
    /// Delivery has already drawn against this line.
    pub fn is_served(&self) -> bool {
        self.unserved_quantity < self.quantity
    }
}

#[derive(Debug, Clone)]
pub struct NewReservation {
    pub booking_id: i32,
    pub order_slip_id: i32,
    pub appointed_id: i32,
    pub quantity: Decimal,
}

/// Authority to load: a validity-limited document reserving quantities from
/// one or more appointments.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i32,
    pub booking_no: String,
    pub company: String,
    pub order_slip_id: i32,
    pub supplier_id: i32,
    pub date: NaiveDate,
    pub valid_until: NaiveDate,
    pub upi_reference_no: String,
    pub freight: Decimal,
    pub depot: String,
    pub remarks: String,
    pub is_printed: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub edited_by: Option<String>,
    pub edited_at: Option<DateTime<Utc>>,
    pub reservations: Vec<Reservation>,
}

impl Booking {
    /// Expiry for a booking loaded on `date`.
    ///
    /// Fails when the window runs past the last representable date.
    pub fn expiry_for(date: NaiveDate, validity_days: u32) -> DomainResult<NaiveDate> {
        date.checked_add_days(Days::new(u64::from(validity_days)))
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "Load date {} plus {} days is out of range",
                    date, validity_days
                ))
            })
    }

    /// Edits are only allowed while no line has been touched by delivery.
    pub fn has_served_lines(&self) -> bool {
        self.reservations.iter().any(Reservation::is_served)
    }

    /// Quantity this booking currently holds on each appointment.
    pub fn held_by_appointment(&self) -> HashMap<i32, Decimal> {
        let mut held = HashMap::new();
        for r in &self.reservations {
            *held.entry(r.appointed_id).or_insert(Decimal::ZERO) += r.quantity;
        }
        held
    }

    pub fn total_quantity(&self) -> Decimal {
        self.reservations.iter().map(|r| r.quantity).sum()
    }
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub booking_no: String,
    pub company: String,
    pub order_slip_id: i32,
    pub supplier_id: i32,
    pub date: NaiveDate,
    pub valid_until: NaiveDate,
    pub upi_reference_no: String,
    pub freight: Decimal,
    pub depot: String,
    pub remarks: String,
    pub created_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i32, appointed_id: i32, quantity: i64, unserved: i64) -> Reservation {
        Reservation {
            id,
            booking_id: 1,
            order_slip_id: 10,
            appointed_id,
            quantity: Decimal::from(quantity),
            unserved_quantity: Decimal::from(unserved),
        }
    }

    fn booking(reservations: Vec<Reservation>) -> Booking {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Booking {
            id: 1,
            booking_no: "ATL0000000001".into(),
            company: "Filpride".into(),
            order_slip_id: 10,
            supplier_id: 7,
            date,
            valid_until: Booking::expiry_for(date, 4).unwrap(),
            upi_reference_no: "UPI-1".into(),
            freight: Decimal::from(2),
            depot: "Batangas".into(),
            remarks: String::new(),
            is_printed: false,
            created_by: "tester".into(),
            created_at: Utc::now(),
            edited_by: None,
            edited_at: None,
            reservations,
        }
    }

    #[test]
    fn expiry_is_date_plus_validity_window() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        assert_eq!(
            Booking::expiry_for(date, 4).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }

    #[test]
    fn expiry_past_the_calendar_is_rejected() {
        assert!(matches!(
            Booking::expiry_for(NaiveDate::MAX, 4),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(Booking::expiry_for(NaiveDate::MAX, 0).unwrap(), NaiveDate::MAX);
    }

    #[test]
    fn any_partially_served_line_marks_booking_served() {
        let untouched = booking(vec![line(1, 1, 100, 100), line(2, 2, 50, 50)]);
        assert!(!untouched.has_served_lines());

        let touched = booking(vec![line(1, 1, 100, 100), line(2, 2, 50, 49)]);
        assert!(touched.has_served_lines());
    }

    #[test]
    fn held_quantity_sums_lines_per_appointment() {
        let b = booking(vec![line(1, 1, 100, 100), line(2, 1, 25, 25), line(3, 2, 5, 5)]);
        let held = b.held_by_appointment();
        assert_eq!(held[&1], Decimal::from(125));
        assert_eq!(held[&2], Decimal::from(5));
        assert_eq!(b.total_quantity(), Decimal::from(130));
    }
}
