//! Pure reducer: folds one recorded action into a player aggregate and the
//! owning team's record.

use crate::models::{ActionKind, LogEntry, PlayerAggregate, TeamRecord, TeamSide};

/// Apply one action. Returns updated copies; the session commits both
/// together so readers never observe a partial application.
///
/// The match is exhaustive with no wildcard arm: every [`ActionKind`] maps
/// to exactly one row of the scoring table, and a new kind fails to compile
/// until it gets a row here.
pub fn apply(
    aggregate: &PlayerAggregate,
    team: &TeamRecord,
    action: ActionKind,
) -> (PlayerAggregate, TeamRecord) {
    let mut aggregate = aggregate.clone();
    let mut team = team.clone();

    match action {
        ActionKind::TwoPointMade => {
            aggregate.fg2m += 1;
            aggregate.fg2a += 1;
            aggregate.points += 2;
            team.score += 2;
        }
        ActionKind::TwoPointMissed => aggregate.fg2a += 1,
        ActionKind::ThreePointMade => {
            aggregate.fg3m += 1;
            aggregate.fg3a += 1;
            aggregate.points += 3;
            team.score += 3;
        }
        ActionKind::ThreePointMissed => aggregate.fg3a += 1,
        ActionKind::FreeThrowMade => {
            aggregate.ftm += 1;
            aggregate.fta += 1;
            aggregate.points += 1;
            team.score += 1;
        }
        ActionKind::FreeThrowMissed => aggregate.fta += 1,
        ActionKind::OffensiveRebound => aggregate.offensive_rebounds += 1,
        ActionKind::DefensiveRebound => aggregate.defensive_rebounds += 1,
        ActionKind::Assist => aggregate.assists += 1,
        ActionKind::Steal => aggregate.steals += 1,
        ActionKind::Block => aggregate.blocks += 1,
        ActionKind::Turnover => aggregate.turnovers += 1,
        ActionKind::PersonalFoul => {
            aggregate.personal_fouls += 1;
            team.foul_count += 1;
        }
        ActionKind::DrawnFoul => aggregate.drawn_fouls += 1,
    }

    (aggregate, team)
}

/// Rebuild a player aggregate from scratch by folding ledger entries in
/// order. On-court time is clock-owned and stays at zero; counter fields
/// reproduce the live aggregate exactly.
pub fn replay_aggregate<'a, I>(entries: I) -> PlayerAggregate
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let mut aggregate = PlayerAggregate::default();
    let mut team = TeamRecord::new(TeamSide::Home, "");
    for entry in entries {
        let (next_aggregate, next_team) = apply(&aggregate, &team, entry.action);
        aggregate = next_aggregate;
        team = next_team;
    }
    aggregate
}
