//! Session roster and its persistence

pub mod snapshot;
pub mod state;

pub use snapshot::{compute_checksum, validate_snapshot, SessionSnapshot, SnapshotError, SNAPSHOT_VERSION};
pub use state::{Session, SessionError};
