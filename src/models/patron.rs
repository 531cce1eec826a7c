//! Patron (borrower) model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;

/// A registered library patron
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patron {
    pub id: i32,
    pub name: String,
    /// Identity document or tax number
    pub document: String,
    pub phone: String,
    pub email: String,
}

impl Patron {
    pub fn new(id: i32, patron: CreatePatron) -> Self {
        Self {
            id,
            name: patron.name.trim().to_string(),
            document: patron.document,
            phone: patron.phone,
            email: patron.email,
        }
    }

    pub fn apply(&mut self, update: UpdatePatron) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(document) = update.document {
            self.document = document;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
    }
}

/// Create patron request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePatron {
    #[validate(custom(function = "not_blank", message = "Patron name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// Update patron request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePatron {
    #[validate(custom(function = "not_blank", message = "Patron name must not be empty"))]
    pub name: Option<String>,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}
