//! Catalog management service: authors, books and patrons

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        Author, Book, CreateAuthor, CreateBook, CreatePatron, Patron, UpdateAuthor, UpdateBook,
        UpdatePatron,
    },
};

use super::Services;

impl Services {
    pub fn add_author(&mut self, author: CreateAuthor) -> AppResult<Author> {
        author.validate()?;
        let created = self.repository.authors_create(author)?;
        tracing::info!("Author added: id={} name={:?}", created.id, created.name);
        Ok(created)
    }

    pub fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository
            .authors_get_by_id(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    pub fn list_authors(&self) -> Vec<Author> {
        self.repository.authors_list()
    }

    pub fn update_author(&mut self, id: i32, update: UpdateAuthor) -> AppResult<Author> {
        update.validate()?;
        self.repository
            .authors_update(id, update)
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Add a book credited to existing authors.
    ///
    /// At least one author is required and every ID must resolve; repeated
    /// IDs are collapsed keeping the first occurrence.
    pub fn add_book(&mut self, mut book: CreateBook) -> AppResult<Book> {
        book.validate()?;

        let mut seen = Vec::with_capacity(book.author_ids.len());
        book.author_ids.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(*id);
                true
            }
        });

        if let Some(missing) = book
            .author_ids
            .iter()
            .find(|id| self.repository.authors_get_by_id(**id).is_none())
        {
            tracing::warn!("Book {:?} rejected: unknown author {}", book.title, missing);
            return Err(AppError::NotFound(format!("Author with id {} not found", missing)));
        }

        let created = self.repository.books_create(book)?;
        tracing::info!(
            "Book added: id={} title={:?} copies={}",
            created.id,
            created.title,
            created.total_copies
        );
        Ok(created)
    }

    pub fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository
            .books_get_by_id(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    pub fn list_books(&self) -> Vec<Book> {
        self.repository.books_list()
    }

    pub fn update_book(&mut self, id: i32, update: UpdateBook) -> AppResult<Book> {
        update.validate()?;
        self.repository
            .books_update(id, update)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    pub fn remove_book(&mut self, id: i32) -> AppResult<()> {
        match self.repository.books_delete(id) {
            Ok(()) => {
                tracing::info!("Book removed: id={}", id);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Book {} not removed: {}", id, e);
                Err(e)
            }
        }
    }

    pub fn add_patron(&mut self, patron: CreatePatron) -> AppResult<Patron> {
        patron.validate()?;
        let created = self.repository.patrons_create(patron)?;
        tracing::info!("Patron added: id={} name={:?}", created.id, created.name);
        Ok(created)
    }

    pub fn get_patron(&self, id: i32) -> AppResult<Patron> {
        self.repository
            .patrons_get_by_id(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Patron with id {} not found", id)))
    }

    pub fn list_patrons(&self) -> Vec<Patron> {
        self.repository.patrons_list()
    }

    pub fn update_patron(&mut self, id: i32, update: UpdatePatron) -> AppResult<Patron> {
        update.validate()?;
        self.repository
            .patrons_update(id, update)
            .ok_or_else(|| AppError::NotFound(format!("Patron with id {} not found", id)))
    }

    pub fn remove_patron(&mut self, id: i32) -> AppResult<()> {
        match self.repository.patrons_delete(id) {
            Ok(()) => {
                tracing::info!("Patron removed: id={}", id);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Patron {} not removed: {}", id, e);
                Err(e)
            }
        }
    }
}
