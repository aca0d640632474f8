use serde::{Deserialize, Serialize};

use super::action::{ActionKind, ShotLocation};
use super::team::TeamSide;

/// One recorded action. Immutable once appended to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    /// Ledger ordering key: strictly increasing, unique, assigned on append.
    pub sequence_id: u64,
    pub player_id: String,
    pub team_id: TeamSide,
    pub action: ActionKind,
    /// Period the action was recorded in (1-based).
    pub period: u8,
    /// Game clock at recording time, "MM:SS". Advisory metadata only.
    pub game_clock: String,
    /// Present only on field-goal kinds recorded through the
    /// location-capturing path.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<ShotLocation>,
}
