//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;

/// A catalog title with its copy accounting.
///
/// `available_copies` is only changed through [`Book::take_copy`] and
/// [`Book::put_back_copy`], which keep it within `0..=total_copies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    pub publication_year: i32,
    pub publisher: String,
    pub total_copies: i32,
    pub available_copies: i32,
    /// Authors in credit order, by ID
    pub author_ids: Vec<i32>,
}

impl Book {
    /// Build a book with every copy on the shelf
    pub fn new(id: i32, book: CreateBook) -> Self {
        Self {
            id,
            title: book.title.trim().to_string(),
            isbn: book.isbn,
            publication_year: book.publication_year,
            publisher: book.publisher,
            total_copies: book.total_copies,
            available_copies: book.total_copies,
            author_ids: book.author_ids,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    /// Copies currently out on loan
    pub fn on_loan(&self) -> i32 {
        self.total_copies - self.available_copies
    }

    /// Take one copy off the shelf. Returns false when none is left.
    pub fn take_copy(&mut self) -> bool {
        if self.available_copies > 0 {
            self.available_copies -= 1;
            return true;
        }
        false
    }

    /// Put one copy back, never exceeding the total
    pub fn put_back_copy(&mut self) {
        if self.available_copies < self.total_copies {
            self.available_copies += 1;
        }
    }

    pub fn apply(&mut self, update: UpdateBook) {
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(isbn) = update.isbn {
            self.isbn = isbn;
        }
        if let Some(year) = update.publication_year {
            self.publication_year = year;
        }
        if let Some(publisher) = update.publisher {
            self.publisher = publisher;
        }
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(custom(function = "not_blank", message = "Title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub isbn: String,
    pub publication_year: i32,
    #[serde(default)]
    pub publisher: String,
    #[validate(range(min = 1, message = "A book needs at least one copy"))]
    pub total_copies: i32,
    #[validate(length(min = 1, message = "A book needs at least one author"))]
    pub author_ids: Vec<i32>,
}

/// Update book request. Copy counts belong to the loan workflow and cannot be edited here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBook {
    #[validate(custom(function = "not_blank", message = "Title must not be empty"))]
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
    pub publisher: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(copies: i32) -> Book {
        Book::new(
            1,
            CreateBook {
                title: "  Clean Code ".to_string(),
                isbn: "978-0132350884".to_string(),
                publication_year: 2008,
                publisher: "Prentice Hall".to_string(),
                total_copies: copies,
                author_ids: vec![1],
            },
        )
    }

    #[test]
    fn test_new_book_has_all_copies_available() {
        let book = sample(3);
        assert_eq!(book.title, "Clean Code");
        assert_eq!(book.available_copies, 3);
        assert_eq!(book.on_loan(), 0);
    }

    #[test]
    fn test_take_copy_stops_at_zero() {
        let mut book = sample(1);
        assert!(book.take_copy());
        assert!(!book.take_copy());
        assert_eq!(book.available_copies, 0);
        assert!(!book.is_available());
    }

    #[test]
    fn test_put_back_copy_is_capped() {
        let mut book = sample(2);
        book.put_back_copy();
        assert_eq!(book.available_copies, 2);
        book.take_copy();
        book.put_back_copy();
        assert_eq!(book.available_copies, 2);
    }

    #[test]
    fn test_create_book_validation() {
        let request = CreateBook {
            title: " ".to_string(),
            isbn: String::new(),
            publication_year: 2000,
            publisher: String::new(),
            total_copies: 0,
            author_ids: vec![],
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("total_copies"));
        assert!(fields.contains_key("author_ids"));
    }
}
