//! Book operations on the repository

use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook, UpdateBook},
};

use super::Repository;

impl Repository {
    /// Store a new book. Author references are checked by the catalog service.
    pub fn books_create(&mut self, book: CreateBook) -> AppResult<Book> {
        let id = self
            .book_ids
            .allocate()
            .ok_or_else(|| Self::ids_exhausted("book"))?;
        let book = Book::new(id, book);
        self.books.push(book.clone());
        Ok(book)
    }

    pub fn books_get_by_id(&self, id: i32) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub(crate) fn books_get_mut(&mut self, id: i32) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.id == id)
    }

    /// All books in insertion order
    pub fn books_list(&self) -> Vec<Book> {
        self.books.clone()
    }

    pub fn books_update(&mut self, id: i32, update: UpdateBook) -> Option<Book> {
        let book = self.books_get_mut(id)?;
        book.apply(update);
        Some(book.clone())
    }

    /// Remove a book that has no copy out on loan
    pub fn books_delete(&mut self, id: i32) -> AppResult<()> {
        if self.has_active_loan(|loan| loan.book_id == id) {
            return Err(AppError::Conflict(format!("Book {} has active loans", id)));
        }
        let position = self
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;
        self.books.remove(position);
        Ok(())
    }
}
