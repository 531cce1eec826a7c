//! Versioned on-disk schema of the catalog

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, Loan, Patron},
    repository::NextIds,
};

/// Current snapshot schema version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Full persisted state: every collection plus the ID counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub authors: Vec<Author>,
    pub books: Vec<Book>,
    pub patrons: Vec<Patron>,
    pub loans: Vec<Loan>,
    /// Older files may lack counters; they are then derived from the IDs present
    #[serde(default)]
    pub next_ids: NextIds,
}

impl Snapshot {
    pub fn new(
        authors: Vec<Author>,
        books: Vec<Book>,
        patrons: Vec<Patron>,
        loans: Vec<Loan>,
        next_ids: NextIds,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            authors,
            books,
            patrons,
            loans,
            next_ids,
        }
    }

    /// Check that the snapshot describes a consistent catalog.
    ///
    /// IDs must be unique, positive and below `i32::MAX`; books must carry at
    /// least one copy and one known author; each book's available copies must
    /// equal its total minus its active loans; every loan must be due exactly
    /// `LOAN_DURATION_DAYS` after it started.
    pub fn validate(&self) -> AppResult<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(AppError::Persistence(format!(
                "Unsupported snapshot version {} (expected {})",
                self.version, SNAPSHOT_VERSION
            )));
        }

        let author_ids = unique_ids("author", self.authors.iter().map(|a| a.id))?;
        let book_ids = unique_ids("book", self.books.iter().map(|b| b.id))?;
        let patron_ids = unique_ids("patron", self.patrons.iter().map(|p| p.id))?;
        unique_ids("loan", self.loans.iter().map(|l| l.id))?;

        let mut on_loan: HashMap<i32, i32> = HashMap::new();
        for loan in &self.loans {
            if Loan::due_date_for(loan.borrowed_on) != Some(loan.due_on) {
                return Err(AppError::Persistence(format!(
                    "Loan {} is due on {} but started on {}",
                    loan.id, loan.due_on, loan.borrowed_on
                )));
            }
            if !loan.is_active() {
                continue;
            }
            // Only active loans are guaranteed to reference live entities
            if !book_ids.contains(&loan.book_id) || !patron_ids.contains(&loan.patron_id) {
                return Err(AppError::Persistence(format!(
                    "Active loan {} references a missing book or patron",
                    loan.id
                )));
            }
            *on_loan.entry(loan.book_id).or_insert(0) += 1;
        }

        for book in &self.books {
            if book.total_copies < 1 {
                return Err(AppError::Persistence(format!("Book {} has no copies", book.id)));
            }
            let lent = on_loan.get(&book.id).copied().unwrap_or(0);
            if lent > book.total_copies || book.available_copies != book.total_copies - lent {
                return Err(AppError::Persistence(format!(
                    "Book {} has {} of {} copies available with {} on loan",
                    book.id, book.available_copies, book.total_copies, lent
                )));
            }
            if book.author_ids.is_empty() {
                return Err(AppError::Persistence(format!("Book {} has no author", book.id)));
            }
            if let Some(missing) = book.author_ids.iter().find(|&&id| !author_ids.contains(&id)) {
                return Err(AppError::Persistence(format!(
                    "Book {} references missing author {}",
                    book.id, missing
                )));
            }
        }

        Ok(())
    }
}

fn unique_ids(kind: &str, ids: impl Iterator<Item = i32>) -> AppResult<HashSet<i32>> {
    let mut seen = HashSet::new();
    for id in ids {
        if id <= 0 || id == i32::MAX {
            return Err(AppError::Persistence(format!("Invalid {} id {}", kind, id)));
        }
        if !seen.insert(id) {
            return Err(AppError::Persistence(format!("Duplicate {} id {}", kind, id)));
        }
    }
    Ok(seen)
}
