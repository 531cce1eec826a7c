//! Loan lifecycle service

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::{Loan, LoanDetails},
};

use super::Services;

impl Services {
    /// Lend one copy of a book to a patron. Nothing changes on failure.
    pub fn borrow(&mut self, book_id: i32, patron_id: i32, today: NaiveDate) -> AppResult<Loan> {
        match self.repository.loans_create(book_id, patron_id, today) {
            Ok(loan) => {
                tracing::info!(
                    "Loan created: id={} book={} patron={} due={}",
                    loan.id,
                    loan.book_id,
                    loan.patron_id,
                    loan.due_on
                );
                Ok(loan)
            }
            Err(e) => {
                tracing::warn!("Borrow of book {} by patron {} refused: {}", book_id, patron_id, e);
                Err(e)
            }
        }
    }

    /// Record the return of an active loan
    pub fn return_loan(&mut self, loan_id: i32, today: NaiveDate) -> AppResult<()> {
        match self.repository.loans_return(loan_id, today) {
            Ok(loan) => {
                tracing::info!("Loan returned: id={} book={}", loan.id, loan.book_id);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Return of loan {} refused: {}", loan_id, e);
                Err(e)
            }
        }
    }

    pub fn get_loan(&self, id: i32) -> AppResult<Loan> {
        self.repository
            .loans_get_by_id(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    pub fn list_active_loans(&self) -> Vec<Loan> {
        self.repository.loans_list_active()
    }

    pub fn list_loans(&self) -> Vec<Loan> {
        self.repository.loans_list()
    }

    /// Active loans with book title and patron name
    pub fn active_loan_details(&self, today: NaiveDate) -> Vec<LoanDetails> {
        self.repository
            .loans_list_active()
            .iter()
            .map(|loan| self.repository.loans_details(loan, today))
            .collect()
    }

    /// Loans of one patron, returned ones included
    pub fn patron_loans(&self, patron_id: i32) -> AppResult<Vec<Loan>> {
        self.get_patron(patron_id)?;
        Ok(self.repository.loans_list_for_patron(patron_id))
    }

    /// Count active loans past their due date
    pub fn count_overdue(&self, today: NaiveDate) -> usize {
        self.repository
            .loans_list_active()
            .iter()
            .filter(|l| l.is_overdue(today))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::*;

    fn library(copies: i32) -> (Services, i32, i32) {
        let mut services = Services::new();
        let author = services.add_author(author("Ana Silva")).unwrap();
        let book = services.add_book(book("Java Adventures", copies, vec![author.id])).unwrap();
        let patron = services.add_patron(patron("Bruno Lima")).unwrap();
        (services, book.id, patron.id)
    }

    #[test]
    fn test_borrow_sets_due_date() {
        let (mut services, book_id, patron_id) = library(1);
        let loan = services.borrow(book_id, patron_id, day(1)).unwrap();
        assert_eq!(loan.borrowed_on, day(1));
        assert_eq!(loan.due_on, day(15));
        assert_eq!(loan.returned_on, None);
        assert_eq!(services.get_loan(loan.id).unwrap(), loan);
    }

    #[test]
    fn test_borrow_unavailable_changes_nothing() {
        let (mut services, book_id, patron_id) = library(1);
        services.borrow(book_id, patron_id, day(1)).unwrap();
        let before = services.repository().snapshot();

        let err = services.borrow(book_id, patron_id, day(2)).unwrap_err();
        assert!(matches!(err, AppError::Unavailable(_)));
        assert_eq!(services.repository().snapshot(), before);
    }

    #[test]
    fn test_return_then_return_again() {
        let (mut services, book_id, patron_id) = library(2);
        let loan = services.borrow(book_id, patron_id, day(1)).unwrap();

        services.return_loan(loan.id, day(3)).unwrap();
        assert_eq!(services.get_book(book_id).unwrap().available_copies, 2);
        assert!(services.list_active_loans().is_empty());
        assert_eq!(services.list_loans().len(), 1);

        let err = services.return_loan(loan.id, day(4)).unwrap_err();
        assert!(matches!(err, AppError::InvalidLoan(_)));
        assert_eq!(services.get_book(book_id).unwrap().available_copies, 2);
    }

    #[test]
    fn test_patron_loans_and_overdue() {
        let (mut services, book_id, patron_id) = library(2);
        let first = services.borrow(book_id, patron_id, day(1)).unwrap();
        services.borrow(book_id, patron_id, day(10)).unwrap();
        services.return_loan(first.id, day(12)).unwrap();

        assert_eq!(services.patron_loans(patron_id).unwrap().len(), 2);
        assert!(matches!(services.patron_loans(99), Err(AppError::NotFound(_))));

        assert_eq!(services.count_overdue(day(24)), 0);
        assert_eq!(services.count_overdue(day(25)), 1);

        let details = services.active_loan_details(day(25));
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].patron_name, "Bruno Lima");
        assert!(details[0].is_overdue);
    }
}
