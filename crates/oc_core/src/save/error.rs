use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("Decompression error")]
    Decompression,

    #[error("Corrupted snapshot")]
    Corrupted,

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Snapshot not found: {path}")]
    FileNotFound { path: String },
}

impl SnapshotError {
    /// Whether a retry might succeed. Structural failures never recover;
    /// the restore path discards those and falls back to a fresh session.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SnapshotError::Io(_) => true,
            SnapshotError::FileNotFound { .. } => true,
            SnapshotError::VersionMismatch { .. } => true, // can try migration
            SnapshotError::Corrupted => false,
            SnapshotError::ChecksumMismatch => false,
            _ => false,
        }
    }
}
