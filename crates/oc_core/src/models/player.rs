use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::team::TeamSide;

/// Running per-player totals. The counters only move through the
/// aggregator; `seconds_played` is accrued by the clock tick and is not
/// part of the ledger fold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlayerAggregate {
    pub points: u32,
    pub fg2m: u32,
    pub fg2a: u32,
    pub fg3m: u32,
    pub fg3a: u32,
    pub ftm: u32,
    pub fta: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub personal_fouls: u32,
    pub drawn_fouls: u32,
    pub seconds_played: u32,
}

impl PlayerAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rebounds(&self) -> u32 {
        self.offensive_rebounds + self.defensive_rebounds
    }

    pub fn field_goal_attempts(&self) -> u32 {
        self.fg2a + self.fg3a
    }

    pub fn field_goal_makes(&self) -> u32 {
        self.fg2m + self.fg3m
    }

    /// Structural consistency: the scoring identity and makes never
    /// exceeding attempts. Holds after every reducer step; checked when
    /// validating restored snapshots.
    pub fn is_consistent(&self) -> bool {
        self.points == 2 * self.fg2m + 3 * self.fg3m + self.ftm
            && self.fg2m <= self.fg2a
            && self.fg3m <= self.fg3a
            && self.ftm <= self.fta
    }
}

/// Roster entry. Ids are UUIDs and never reused; jersey numbers may repeat
/// (real rosters have correctable typos).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: String,
    pub jersey_number: String,
    pub display_name: String,
    pub team_id: TeamSide,
    pub on_court: bool,
    pub aggregate: PlayerAggregate,
}

impl Player {
    pub fn new(
        jersey_number: impl Into<String>,
        display_name: impl Into<String>,
        team_id: TeamSide,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            jersey_number: jersey_number.into(),
            display_name: display_name.into(),
            team_id,
            on_court: false,
            aggregate: PlayerAggregate::default(),
        }
    }
}
