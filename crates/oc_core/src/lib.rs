//! # oc_core - Basketball scorekeeping core
//!
//! Records per-player actions during a live game into an append-only
//! ledger, folds them into player and team aggregates with a pure reducer,
//! and derives presentation-ready projections plus a report payload.
//!
//! ## Design
//! - The ledger is the source of truth: replaying it in order reproduces
//!   every derived aggregate
//! - The reducer is an exhaustive fold over a closed action enumeration
//! - The session is an owned value with an explicit create/restore/reset
//!   lifecycle, threaded by reference through callers
//! - Persistence is one whole-session snapshot under a fixed storage key;
//!   an unusable snapshot degrades to a fresh session, never a hard failure

pub mod aggregator;
pub mod clock;
pub mod error;
pub mod ledger;
pub mod models;
pub mod projector;
pub mod save;
pub mod session;

pub use clock::{GameClock, DEFAULT_PERIOD_SECONDS};
pub use error::{Result, SessionError};
pub use ledger::EventLedger;
pub use models::{
    ActionKind, LogEntry, Player, PlayerAggregate, ShotLocation, TeamRecord, TeamSide,
};
pub use projector::{
    advanced_metrics, live_table, match_summary, shot_chart_points, AdvancedMetrics, LiveRow,
    MatchSummary, ShotChartPoint,
};
pub use save::{SessionSnapshot, SnapshotError, SnapshotStore, SNAPSHOT_VERSION, STORAGE_KEY};
pub use session::GameSession;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
