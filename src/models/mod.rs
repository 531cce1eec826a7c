//! Data models for Libris

pub mod author;
pub mod book;
pub mod loan;
pub mod patron;

// Re-export commonly used types
pub use author::{Author, CreateAuthor, UpdateAuthor};
pub use book::{Book, CreateBook, UpdateBook};
pub use loan::{Loan, LoanDetails, LOAN_DURATION_DAYS};
pub use patron::{CreatePatron, Patron, UpdatePatron};

use validator::ValidationError;

/// Rejects text that is empty once surrounding whitespace is removed
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
