//! Business logic services

pub mod catalog;
pub mod loans;

use crate::{error::AppResult, repository::Repository, storage::SnapshotStore};

/// Entry point for every catalog and loan operation.
///
/// Owns the repository; one call completes before the next starts, so no
/// locking is involved. A multi-threaded host must wrap the whole value in a
/// single lock, since borrow's check-then-decrement is not atomic on its own.
#[derive(Debug, Clone, Default)]
pub struct Services {
    repository: Repository,
}

impl Services {
    /// Start with an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(repository: Repository) -> Self {
        Self { repository }
    }

    /// Load the catalog from `store`, starting empty when nothing was saved yet
    pub fn open(store: &dyn SnapshotStore) -> AppResult<Self> {
        match store.load()? {
            Some(snapshot) => {
                let repository = Repository::from_snapshot(snapshot);
                tracing::info!(
                    "Catalog loaded: {} authors, {} books, {} patrons, {} loans",
                    repository.authors_list().len(),
                    repository.books_list().len(),
                    repository.patrons_list().len(),
                    repository.loans_list().len()
                );
                Ok(Self::with_repository(repository))
            }
            None => {
                tracing::info!("No saved catalog found, starting empty");
                Ok(Self::new())
            }
        }
    }

    /// Write the whole catalog to `store`
    pub fn save(&self, store: &dyn SnapshotStore) -> AppResult<()> {
        store.save(&self.repository.snapshot())?;
        tracing::info!("Catalog saved");
        Ok(())
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }
}
