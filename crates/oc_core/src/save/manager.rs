use super::error::SnapshotError;
use super::format::{decompress_and_deserialize, serialize_and_compress, SessionSnapshot};
use super::migration::migrate_snapshot;
use super::STORAGE_KEY;
use crate::session::GameSession;

use std::fs::{remove_file, rename, File};
use std::io::{Read, Write};
use std::path::PathBuf;

/// Owns the single snapshot file. An explicit instance held by the caller,
/// not a global: the embedding layer constructs one with its storage
/// directory and threads it wherever persistence happens.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The one fixed storage path.
    pub fn path(&self) -> PathBuf {
        self.dir.join(STORAGE_KEY)
    }

    /// Persist the whole session. Idempotent; called after every mutating
    /// operation. Atomic: write to a temp file, fsync, then rename.
    pub fn save(&self, session: &GameSession) -> Result<(), SnapshotError> {
        let snapshot = SessionSnapshot::of(session);
        let data = serialize_and_compress(&snapshot)?;

        let path = self.path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;

            // sync_all ensures data is written to disk (portable fsync)
            file.sync_all()?;
        }

        rename(&temp_path, &path)?;

        log::debug!("saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    /// Load, migrate, and validate the stored session.
    pub fn load(&self) -> Result<GameSession, SnapshotError> {
        let path = self.path();
        if !path.exists() {
            return Err(SnapshotError::FileNotFound { path: path.display().to_string() });
        }

        let mut file = File::open(&path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let mut snapshot = decompress_and_deserialize(&data)?;
        snapshot = migrate_snapshot(snapshot)?;
        snapshot.validate()?;

        log::info!("session restored from {:?}", path);
        Ok(snapshot.session)
    }

    /// Restore if possible, otherwise fall back to a fresh session. An
    /// unusable snapshot is discarded and logged; it never surfaces to the
    /// caller as a hard failure.
    pub fn load_or_fresh(&self) -> GameSession {
        match self.load() {
            Ok(session) => session,
            Err(SnapshotError::FileNotFound { .. }) => GameSession::new(),
            Err(err) => {
                log::warn!("discarding unusable snapshot ({}), starting fresh", err);
                let _ = self.delete();
                GameSession::new()
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    pub fn delete(&self) -> Result<(), SnapshotError> {
        let path = self.path();
        if path.exists() {
            remove_file(&path)?;
            log::info!("deleted snapshot {:?}", path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionKind, TeamSide};
    use tempfile::TempDir;

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path());

        let mut session = GameSession::new();
        let id = session.add_player("7", "Ana", TeamSide::Home).unwrap().id.clone();
        session.record_action(&id, ActionKind::ThreePointMade, None).unwrap();
        session.advance_period();

        store.save(&session).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, session);
    }

    #[test]
    fn test_sequence_counter_continues_after_restore() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path());

        let mut session = GameSession::new();
        let id = session.add_player("7", "Ana", TeamSide::Home).unwrap().id.clone();
        session.record_action(&id, ActionKind::Assist, None).unwrap();
        store.save(&session).unwrap();

        let mut restored = store.load().unwrap();
        let seq = restored.record_action(&id, ActionKind::Assist, None).unwrap().sequence_id;
        assert_eq!(seq, 2);
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path());

        store.save(&GameSession::new()).unwrap();

        assert!(store.exists());
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_save_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path());
        let session = GameSession::new();

        store.save(&session).unwrap();
        store.save(&session).unwrap();

        assert_eq!(store.load().unwrap(), session);
    }

    #[test]
    fn test_load_or_fresh_falls_back_on_corruption() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path());

        let mut session = GameSession::new();
        session.add_player("7", "Ana", TeamSide::Home).unwrap();
        store.save(&session).unwrap();

        // Scribble over the stored bytes.
        std::fs::write(store.path(), b"not a snapshot").unwrap();

        let fresh = store.load_or_fresh();
        assert!(fresh.players().is_empty());
        assert_eq!(fresh.period(), 1);
        // The unusable file is discarded.
        assert!(!store.exists());
    }

    #[test]
    fn test_load_or_fresh_without_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path());

        let fresh = store.load_or_fresh();
        assert!(fresh.players().is_empty());
        assert!(fresh.log().is_empty());
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path());

        let result = store.load();
        assert!(matches!(result, Err(SnapshotError::FileNotFound { .. })));
    }
}
