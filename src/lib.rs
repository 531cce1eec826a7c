//! Libris Library Catalog
//!
//! Tracks authors, books, patrons and loans in memory and persists the whole
//! catalog as a versioned snapshot between runs.

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod storage;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use services::Services;
