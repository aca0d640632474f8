// Snapshot persistence for OpenCourt sessions
// MessagePack + LZ4 compression with versioning and integrity checks

pub mod error;
pub mod format;
pub mod manager;
pub mod migration;

pub use error::SnapshotError;
pub use format::{decompress_and_deserialize, serialize_and_compress, SessionSnapshot};
pub use manager::SnapshotStore;
pub use migration::migrate_snapshot;

pub const SNAPSHOT_VERSION: u32 = 1;

/// The single fixed storage key: one snapshot file, written whole on every
/// mutation, consumed whole on load.
pub const STORAGE_KEY: &str = "session.ocsave";
