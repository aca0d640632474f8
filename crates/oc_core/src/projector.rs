//! Read-side projections. Everything here derives from the session without
//! mutating it; the rendering and report-export collaborators consume these
//! payloads and never write back.

use serde::{Deserialize, Serialize};

use crate::models::{Player, PlayerAggregate, ShotLocation, TeamRecord, TeamSide};
use crate::session::GameSession;

/// One live-table row: player identity plus the full aggregate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LiveRow {
    pub player_id: String,
    pub jersey_number: String,
    pub display_name: String,
    pub on_court: bool,
    pub aggregate: PlayerAggregate,
}

impl LiveRow {
    fn from_player(player: &Player) -> Self {
        Self {
            player_id: player.id.clone(),
            jersey_number: player.jersey_number.clone(),
            display_name: player.display_name.clone(),
            on_court: player.on_court,
            aggregate: player.aggregate.clone(),
        }
    }
}

/// One side's rows in roster-insertion order (not sorted by performance).
pub fn live_table(session: &GameSession, side: TeamSide) -> Vec<LiveRow> {
    session.roster(side).map(LiveRow::from_player).collect()
}

/// One plotted field-goal attempt, in ledger order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShotChartPoint {
    pub sequence_id: u64,
    pub player_id: String,
    pub location: ShotLocation,
    /// Rendering tag: makes and misses get different colors.
    pub made: bool,
    pub period: u8,
}

/// Field-goal entries for `side` that carry a location. Entries recorded
/// without location capture are valid stats with no chart data.
pub fn shot_chart_points(session: &GameSession, side: TeamSide) -> Vec<ShotChartPoint> {
    session
        .log()
        .entries_for(move |entry| entry.team_id == side && entry.action.is_field_goal())
        .filter_map(|entry| {
            entry.location.map(|location| ShotChartPoint {
                sequence_id: entry.sequence_id,
                player_id: entry.player_id.clone(),
                location,
                made: entry.action.is_made_shot(),
                period: entry.period,
            })
        })
        .collect()
}

/// Shooting-efficiency percentages on a 0-100 scale. Zero attempts is a
/// valid early-game state, not an error: both metrics read 0.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AdvancedMetrics {
    pub effective_fg_pct: f32,
    pub true_shooting_pct: f32,
}

pub fn advanced_metrics(aggregate: &PlayerAggregate) -> AdvancedMetrics {
    let fga = aggregate.field_goal_attempts() as f32;
    let effective_fg_pct = if fga > 0.0 {
        (aggregate.fg2m as f32 + 1.5 * aggregate.fg3m as f32) / fga * 100.0
    } else {
        0.0
    };

    let ts_denominator = 2.0 * (fga + 0.44 * aggregate.fta as f32);
    let true_shooting_pct = if ts_denominator > 0.0 {
        aggregate.points as f32 / ts_denominator * 100.0
    } else {
        0.0
    };

    AdvancedMetrics { effective_fg_pct, true_shooting_pct }
}

/// Everything one team contributes to the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamSummary {
    pub record: TeamRecord,
    pub rows: Vec<LiveRow>,
    pub shot_chart: Vec<ShotChartPoint>,
}

/// The single payload handed to the report-export collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSummary {
    pub session_id: String,
    pub period: u8,
    pub home: TeamSummary,
    pub visitor: TeamSummary,
}

impl MatchSummary {
    /// JSON form consumed by the export collaborator.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub fn match_summary(session: &GameSession) -> MatchSummary {
    MatchSummary {
        session_id: session.session_id().to_string(),
        period: session.period(),
        home: team_summary(session, TeamSide::Home),
        visitor: team_summary(session, TeamSide::Visitor),
    }
}

fn team_summary(session: &GameSession, side: TeamSide) -> TeamSummary {
    TeamSummary {
        record: session.team(side).clone(),
        rows: live_table(session, side),
        shot_chart: shot_chart_points(session, side),
    }
}
