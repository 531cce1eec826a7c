//! Author model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;

/// Author of one or more books
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub nationality: String,
}

impl Author {
    pub fn new(id: i32, author: CreateAuthor) -> Self {
        Self {
            id,
            name: author.name.trim().to_string(),
            nationality: author.nationality,
        }
    }

    pub fn apply(&mut self, update: UpdateAuthor) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(nationality) = update.nationality {
            self.nationality = nationality;
        }
    }
}

/// Create author request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAuthor {
    #[validate(custom(function = "not_blank", message = "Author name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub nationality: String,
}

/// Update author request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAuthor {
    #[validate(custom(function = "not_blank", message = "Author name must not be empty"))]
    pub name: Option<String>,
    pub nationality: Option<String>,
}
