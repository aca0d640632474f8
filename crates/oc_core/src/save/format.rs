use super::error::SnapshotError;
use super::SNAPSHOT_VERSION;
use crate::session::GameSession;
use serde::{Deserialize, Serialize};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

/// Whole-session snapshot envelope written to storage.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionSnapshot {
    /// Snapshot format version for migration.
    pub version: u32,

    /// Snapshot timestamp (unix milliseconds).
    pub timestamp: u64,

    /// The complete live session.
    pub session: GameSession,
}

impl SessionSnapshot {
    pub fn of(session: &GameSession) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            timestamp: current_timestamp(),
            session: session.clone(),
        }
    }

    pub fn update_timestamp(&mut self) {
        self.timestamp = current_timestamp();
    }

    /// Structural validation. A snapshot that fails here is treated as
    /// corrupt and discarded by the restore path.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.session.period() == 0 {
            return Err(SnapshotError::Corrupted);
        }

        // Ledger entries must keep strict order and reference rostered players.
        let mut last_sequence = 0u64;
        for entry in self.session.log().iter() {
            if entry.sequence_id <= last_sequence {
                return Err(SnapshotError::Corrupted);
            }
            last_sequence = entry.sequence_id;

            if self.session.player(&entry.player_id).is_none() {
                return Err(SnapshotError::Corrupted);
            }
        }

        // Duplicate ids would break aggregate attribution.
        let mut ids = std::collections::HashSet::new();
        for player in self.session.players() {
            if !ids.insert(player.id.as_str()) {
                return Err(SnapshotError::Corrupted);
            }
            if !player.aggregate.is_consistent() {
                return Err(SnapshotError::Corrupted);
            }
        }

        Ok(())
    }
}

/// Serialize and compress: MessagePack with field names, LZ4 with prepended
/// size, SHA-256 checksum appended.
pub fn serialize_and_compress(snapshot: &SessionSnapshot) -> Result<Vec<u8>, SnapshotError> {
    snapshot.validate()?;

    let msgpack = to_vec_named(snapshot).map_err(SnapshotError::Serialization)?;

    let compressed = compress_prepend_size(&msgpack);

    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize; the checksum is verified before the payload
/// is touched.
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<SessionSnapshot, SnapshotError> {
    // Minimum size: LZ4 size header + checksum.
    if bytes.len() < 4 + 32 {
        return Err(SnapshotError::Corrupted);
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(SnapshotError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SnapshotError::Decompression)?;

    let snapshot: SessionSnapshot = from_slice(&msgpack).map_err(SnapshotError::Deserialization)?;

    if snapshot.version > SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            found: snapshot.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    Ok(snapshot)
}

pub fn current_timestamp() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}
