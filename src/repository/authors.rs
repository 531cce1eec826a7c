//! Author operations on the repository

use crate::{
    error::AppResult,
    models::{Author, CreateAuthor, UpdateAuthor},
};

use super::Repository;

impl Repository {
    pub fn authors_create(&mut self, author: CreateAuthor) -> AppResult<Author> {
        let id = self
            .author_ids
            .allocate()
            .ok_or_else(|| Self::ids_exhausted("author"))?;
        let author = Author::new(id, author);
        self.authors.push(author.clone());
        Ok(author)
    }

    pub fn authors_get_by_id(&self, id: i32) -> Option<&Author> {
        self.authors.iter().find(|a| a.id == id)
    }

    /// All authors in insertion order
    pub fn authors_list(&self) -> Vec<Author> {
        self.authors.clone()
    }

    pub fn authors_update(&mut self, id: i32, update: UpdateAuthor) -> Option<Author> {
        let author = self.authors.iter_mut().find(|a| a.id == id)?;
        author.apply(update);
        Some(author.clone())
    }
}
