//! Repository layer: the in-memory catalog store.
//!
//! The `Repository` is the single owner of every collection. Loans refer to
//! books and patrons by ID only, and deletion of a book or patron is refused
//! while an active loan points at it, so those IDs always resolve.

pub mod authors;
pub mod books;
pub mod ids;
pub mod loans;
pub mod patrons;

use crate::{
    error::AppError,
    models::{Author, Book, Loan, Patron},
    storage::Snapshot,
};

pub use ids::{IdAllocator, NextIds};

/// Main repository struct holding every collection and its ID counter
#[derive(Debug, Clone, Default)]
pub struct Repository {
    authors: Vec<Author>,
    books: Vec<Book>,
    patrons: Vec<Patron>,
    loans: Vec<Loan>,
    author_ids: IdAllocator,
    book_ids: IdAllocator,
    patron_ids: IdAllocator,
    loan_ids: IdAllocator,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a repository from a persisted snapshot.
    ///
    /// Counters are resumed past the highest ID present, even if the stored
    /// counters lag behind.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let next = snapshot.next_ids;
        Self {
            author_ids: IdAllocator::resume(next.authors, snapshot.authors.iter().map(|a| a.id)),
            book_ids: IdAllocator::resume(next.books, snapshot.books.iter().map(|b| b.id)),
            patron_ids: IdAllocator::resume(next.patrons, snapshot.patrons.iter().map(|p| p.id)),
            loan_ids: IdAllocator::resume(next.loans, snapshot.loans.iter().map(|l| l.id)),
            authors: snapshot.authors,
            books: snapshot.books,
            patrons: snapshot.patrons,
            loans: snapshot.loans,
        }
    }

    /// Capture the full state for persistence
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.authors.clone(),
            self.books.clone(),
            self.patrons.clone(),
            self.loans.clone(),
            self.next_ids(),
        )
    }

    pub fn next_ids(&self) -> NextIds {
        NextIds {
            authors: self.author_ids.peek(),
            books: self.book_ids.peek(),
            patrons: self.patron_ids.peek(),
            loans: self.loan_ids.peek(),
        }
    }

    /// Error for a kind whose ID counter has run out
    fn ids_exhausted(kind: &str) -> AppError {
        AppError::CapacityExceeded(format!("No {} IDs left", kind))
    }

    /// True when an unreturned loan matches the predicate
    fn has_active_loan(&self, matches: impl Fn(&Loan) -> bool) -> bool {
        self.loans.iter().any(|loan| loan.is_active() && matches(loan))
    }
}
