//! Patron operations on the repository

use crate::{
    error::{AppError, AppResult},
    models::{CreatePatron, Patron, UpdatePatron},
};

use super::Repository;

impl Repository {
    pub fn patrons_create(&mut self, patron: CreatePatron) -> AppResult<Patron> {
        let id = self
            .patron_ids
            .allocate()
            .ok_or_else(|| Self::ids_exhausted("patron"))?;
        let patron = Patron::new(id, patron);
        self.patrons.push(patron.clone());
        Ok(patron)
    }

    pub fn patrons_get_by_id(&self, id: i32) -> Option<&Patron> {
        self.patrons.iter().find(|p| p.id == id)
    }

    /// All patrons in insertion order
    pub fn patrons_list(&self) -> Vec<Patron> {
        self.patrons.clone()
    }

    pub fn patrons_update(&mut self, id: i32, update: UpdatePatron) -> Option<Patron> {
        let patron = self.patrons.iter_mut().find(|p| p.id == id)?;
        patron.apply(update);
        Some(patron.clone())
    }

    /// Remove a patron who has nothing on loan
    pub fn patrons_delete(&mut self, id: i32) -> AppResult<()> {
        if self.has_active_loan(|loan| loan.patron_id == id) {
            return Err(AppError::Conflict(format!("Patron {} has active loans", id)));
        }
        let position = self
            .patrons
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Patron with id {} not found", id)))?;
        self.patrons.remove(position);
        Ok(())
    }
}
