//! Loan (borrow) model and related types

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of days a book may be kept before it is due back
pub const LOAN_DURATION_DAYS: i64 = 14;

/// A loan of one copy of a book to a patron.
///
/// Active while `returned_on` is unset; returning it is the only transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i32,
    pub book_id: i32,
    pub patron_id: i32,
    pub borrowed_on: NaiveDate,
    pub due_on: NaiveDate,
    pub returned_on: Option<NaiveDate>,
}

impl Loan {
    /// Date a loan started on `borrowed_on` is due back, if the calendar reaches it
    pub fn due_date_for(borrowed_on: NaiveDate) -> Option<NaiveDate> {
        borrowed_on.checked_add_signed(Duration::days(LOAN_DURATION_DAYS))
    }

    pub fn new(
        id: i32,
        book_id: i32,
        patron_id: i32,
        borrowed_on: NaiveDate,
        due_on: NaiveDate,
    ) -> Self {
        Self {
            id,
            book_id,
            patron_id,
            borrowed_on,
            due_on,
            returned_on: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.returned_on.is_none()
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_active() && today > self.due_on
    }

    /// Close the loan. Returns false if it was already closed.
    pub fn mark_returned(&mut self, on: NaiveDate) -> bool {
        if self.returned_on.is_some() {
            return false;
        }
        self.returned_on = Some(on);
        true
    }
}

/// Loan with book and patron details for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanDetails {
    pub id: i32,
    pub book_id: i32,
    pub book_title: String,
    pub patron_id: i32,
    pub patron_name: String,
    pub borrowed_on: NaiveDate,
    pub due_on: NaiveDate,
    pub returned_on: Option<NaiveDate>,
    pub is_overdue: bool,
}
