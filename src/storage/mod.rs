//! Persistence gateway: snapshot schema and stores

pub mod json_file;
pub mod snapshot;

pub use json_file::JsonFileStore;
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};

use crate::error::AppResult;

/// Durable storage for catalog snapshots
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotStore {
    /// Read the last saved snapshot, or `None` when nothing was ever saved
    fn load(&self) -> AppResult<Option<Snapshot>>;

    /// Replace the stored snapshot with `snapshot`
    fn save(&self, snapshot: &Snapshot) -> AppResult<()>;
}
