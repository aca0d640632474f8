use super::error::SnapshotError;
use super::format::SessionSnapshot;
use super::SNAPSHOT_VERSION;

/// Migrate a snapshot from an older format version to the current one.
pub fn migrate_snapshot(mut snapshot: SessionSnapshot) -> Result<SessionSnapshot, SnapshotError> {
    let original_version = snapshot.version;

    snapshot = match snapshot.version {
        0 => migrate_v0_to_v1(snapshot)?,
        1 => snapshot, // Current version, no migration needed
        v if v > SNAPSHOT_VERSION => {
            // Future version - might be compatible
            log::warn!(
                "loading snapshot from future version {} (current: {})",
                v,
                SNAPSHOT_VERSION
            );
            snapshot
        }
        _ => {
            return Err(SnapshotError::VersionMismatch {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
    };

    snapshot.version = SNAPSHOT_VERSION;
    snapshot.update_timestamp();

    if original_version != SNAPSHOT_VERSION {
        log::info!("migrated snapshot from version {} to {}", original_version, SNAPSHOT_VERSION);
    }

    Ok(snapshot)
}

/// v0 snapshots predate the period floor and the persisted sequence
/// counter.
fn migrate_v0_to_v1(mut snapshot: SessionSnapshot) -> Result<SessionSnapshot, SnapshotError> {
    log::info!("migrating snapshot from version 0 to 1");

    if snapshot.session.period == 0 {
        snapshot.session.period = 1;
    }

    // Older builds serialized the ledger without its counter; make sure it
    // sits strictly ahead of every stored entry.
    snapshot.session.log.reseat_sequence_counter();

    Ok(snapshot)
}

/// Check if a snapshot needs migration before use.
pub fn needs_migration(snapshot: &SessionSnapshot) -> bool {
    snapshot.version < SNAPSHOT_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::GameSession;

    #[test]
    fn test_migrate_v0_fixes_period_floor() {
        let mut snapshot = SessionSnapshot::of(&GameSession::new());
        snapshot.version = 0;
        snapshot.session.period = 0;

        let migrated = migrate_snapshot(snapshot).unwrap();

        assert_eq!(migrated.version, SNAPSHOT_VERSION);
        assert_eq!(migrated.session.period(), 1);
    }

    #[test]
    fn test_no_migration_needed() {
        let snapshot = SessionSnapshot::of(&GameSession::new());
        assert!(!needs_migration(&snapshot));

        let result = migrate_snapshot(snapshot).unwrap();
        assert_eq!(result.version, SNAPSHOT_VERSION);
    }

    #[test]
    fn test_future_version_is_tolerated() {
        let mut snapshot = SessionSnapshot::of(&GameSession::new());
        snapshot.version = 999;

        let result = migrate_snapshot(snapshot);
        assert!(result.is_ok());
    }
}
