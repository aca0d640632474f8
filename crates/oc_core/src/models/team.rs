use serde::{Deserialize, Serialize};

/// Which bench a player or recorded action belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Visitor,
}

impl TeamSide {
    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Visitor,
            TeamSide::Visitor => TeamSide::Home,
        }
    }

    /// Canonical lowercase label used in logs and export payloads.
    pub fn label(&self) -> &'static str {
        match self {
            TeamSide::Home => "home",
            TeamSide::Visitor => "visitor",
        }
    }
}

/// Per-team running record. Score and team fouls are normally fed by the
/// aggregator; manual corrections go through the session and may diverge
/// from the player-point sum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamRecord {
    pub team_id: TeamSide,
    pub display_name: String,
    pub score: u32,
    pub foul_count: u32,
}

impl TeamRecord {
    pub fn new(team_id: TeamSide, display_name: impl Into<String>) -> Self {
        Self { team_id, display_name: display_name.into(), score: 0, foul_count: 0 }
    }
}
