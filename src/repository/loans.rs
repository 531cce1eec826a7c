//! Loan operations on the repository

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::{Loan, LoanDetails},
};

use super::Repository;

impl Repository {
    /// Lend one copy of a book to a patron.
    ///
    /// Every check happens before anything is mutated, so a failed borrow
    /// leaves copies, loans and the loan counter untouched.
    pub fn loans_create(
        &mut self,
        book_id: i32,
        patron_id: i32,
        today: NaiveDate,
    ) -> AppResult<Loan> {
        if self.patrons_get_by_id(patron_id).is_none() {
            return Err(AppError::NotFound(format!("Patron with id {} not found", patron_id)));
        }
        let book = self
            .books_get_by_id(book_id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;
        if !book.is_available() {
            return Err(AppError::Unavailable(format!(
                "No copies of \"{}\" are available",
                book.title
            )));
        }
        let due_on = Loan::due_date_for(today).ok_or_else(|| {
            AppError::Validation(format!("No due date can follow a loan made on {}", today))
        })?;
        let id = self
            .loan_ids
            .allocate()
            .ok_or_else(|| Self::ids_exhausted("loan"))?;

        // Availability was checked above
        if let Some(book) = self.books_get_mut(book_id) {
            book.take_copy();
        }
        let loan = Loan::new(id, book_id, patron_id, today, due_on);
        self.loans.push(loan.clone());
        Ok(loan)
    }

    /// Close an active loan and put its copy back on the shelf
    pub fn loans_return(&mut self, loan_id: i32, today: NaiveDate) -> AppResult<Loan> {
        let loan = self
            .loans
            .iter_mut()
            .find(|l| l.id == loan_id && l.is_active())
            .ok_or_else(|| {
                AppError::InvalidLoan(format!("Loan {} is not an active loan", loan_id))
            })?;
        loan.mark_returned(today);
        let loan = loan.clone();

        // A removed book cannot have active loans, so this always resolves.
        if let Some(book) = self.books_get_mut(loan.book_id) {
            book.put_back_copy();
        }
        Ok(loan)
    }

    pub fn loans_get_by_id(&self, id: i32) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id == id)
    }

    /// Every loan ever made, in insertion order
    pub fn loans_list(&self) -> Vec<Loan> {
        self.loans.clone()
    }

    /// Unreturned loans, in insertion order
    pub fn loans_list_active(&self) -> Vec<Loan> {
        self.loans.iter().filter(|l| l.is_active()).cloned().collect()
    }

    pub fn loans_list_for_patron(&self, patron_id: i32) -> Vec<Loan> {
        self.loans
            .iter()
            .filter(|l| l.patron_id == patron_id)
            .cloned()
            .collect()
    }

    /// Join a loan with the title and name it refers to.
    ///
    /// Returned loans may outlive their book or patron; the label is then empty.
    pub fn loans_details(&self, loan: &Loan, today: NaiveDate) -> LoanDetails {
        LoanDetails {
            id: loan.id,
            book_id: loan.book_id,
            book_title: self
                .books_get_by_id(loan.book_id)
                .map(|b| b.title.clone())
                .unwrap_or_default(),
            patron_id: loan.patron_id,
            patron_name: self
                .patrons_get_by_id(loan.patron_id)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            borrowed_on: loan.borrowed_on,
            due_on: loan.due_on,
            returned_on: loan.returned_on,
            is_overdue: loan.is_overdue(today),
        }
    }
}
