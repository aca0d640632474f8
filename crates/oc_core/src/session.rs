//! The single live game session.
//!
//! `GameSession` is an explicitly owned value with a create / restore /
//! reset lifecycle; callers hold and thread the reference. All mutations
//! are synchronous and all-or-nothing: a rejected operation leaves no
//! trace in the ledger, the aggregates, or the team records.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregator;
use crate::clock::GameClock;
use crate::error::{Result, SessionError};
use crate::ledger::EventLedger;
use crate::models::{ActionKind, LogEntry, Player, ShotLocation, TeamRecord, TeamSide};

/// Both team records of one game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamPair {
    pub home: TeamRecord,
    pub visitor: TeamRecord,
}

impl TeamPair {
    fn new(home_name: &str, visitor_name: &str) -> Self {
        Self {
            home: TeamRecord::new(TeamSide::Home, home_name),
            visitor: TeamRecord::new(TeamSide::Visitor, visitor_name),
        }
    }

    pub fn side(&self, side: TeamSide) -> &TeamRecord {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Visitor => &self.visitor,
        }
    }

    fn side_mut(&mut self, side: TeamSide) -> &mut TeamRecord {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Visitor => &mut self.visitor,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSession {
    pub(crate) session_id: String,
    /// Unix milliseconds at creation.
    pub(crate) started_at: u64,
    pub(crate) teams: TeamPair,
    pub(crate) players: Vec<Player>,
    pub(crate) log: EventLedger,
    pub(crate) period: u8,
    pub(crate) clock: GameClock,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Fresh empty session with default team names and period length.
    pub fn new() -> Self {
        Self::with_setup("Home", "Visitor", crate::clock::DEFAULT_PERIOD_SECONDS)
    }

    /// Fresh empty session with custom team names and period length.
    pub fn with_setup(home_name: &str, visitor_name: &str, period_length_seconds: u32) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            started_at: crate::save::format::current_timestamp(),
            teams: TeamPair::new(home_name, visitor_name),
            players: Vec::new(),
            log: EventLedger::new(),
            period: 1,
            clock: GameClock::with_period_length(period_length_seconds),
        }
    }

    // ========================
    // Roster Management
    // ========================

    /// Add a player to the roster: fresh id, zero aggregate, benched.
    /// Jersey numbers and names must be non-empty; duplicates are permitted
    /// (the keeper corrects typos by editing, which is out of scope here).
    pub fn add_player(
        &mut self,
        jersey_number: &str,
        display_name: &str,
        side: TeamSide,
    ) -> Result<&Player> {
        if jersey_number.trim().is_empty() {
            return Err(SessionError::InvalidRosterInput { field: "jersey_number" });
        }
        if display_name.trim().is_empty() {
            return Err(SessionError::InvalidRosterInput { field: "display_name" });
        }

        let player = Player::new(jersey_number, display_name, side);
        info!("roster add: #{} {} ({})", jersey_number, display_name, side.label());
        self.players.push(player);
        Ok(self.players.last().expect("player just added"))
    }

    /// Toggle a player's on-court flag. No stat side effects.
    pub fn set_on_court(&mut self, player_id: &str, on_court: bool) -> Result<()> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or_else(|| SessionError::UnknownPlayer { player_id: player_id.to_string() })?;
        player.on_court = on_court;
        Ok(())
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// One side's players in roster-insertion order.
    pub fn roster(&self, side: TeamSide) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.team_id == side)
    }

    // ========================
    // Action Recording
    // ========================

    /// Record one action for a rostered player. Validates first, then the
    /// ledger entry, the player aggregate, and the owning team record
    /// commit together; a rejected call mutates nothing.
    pub fn record_action(
        &mut self,
        player_id: &str,
        action: ActionKind,
        location: Option<ShotLocation>,
    ) -> Result<&LogEntry> {
        let player_idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| SessionError::UnknownPlayer { player_id: player_id.to_string() })?;

        let side = self.players[player_idx].team_id;
        let (aggregate, team) =
            aggregator::apply(&self.players[player_idx].aggregate, self.teams.side(side), action);

        let stamp = self.clock.formatted();
        let entry = self.log.append(player_id, side, action, self.period, stamp, location);
        debug!("recorded {:?} for {} (seq {})", action, player_id, entry.sequence_id);

        self.players[player_idx].aggregate = aggregate;
        *self.teams.side_mut(side) = team;

        Ok(entry)
    }

    // ========================
    // Manual Corrections
    // ========================

    /// Manual score correction outside the action pipeline. Floors at 0.
    /// The resulting score may diverge from the sum of player points; that
    /// divergence is an explicit override and is never auto-reconciled.
    pub fn adjust_score(&mut self, side: TeamSide, delta: i32) {
        let team = self.teams.side_mut(side);
        team.score = apply_delta(team.score, delta);
        info!("manual score adjust: {} {:+} -> {}", side.label(), delta, team.score);
    }

    /// Manual team-foul correction, same override semantics as
    /// [`GameSession::adjust_score`].
    pub fn adjust_team_fouls(&mut self, side: TeamSide, delta: i32) {
        let team = self.teams.side_mut(side);
        team.foul_count = apply_delta(team.foul_count, delta);
        info!("manual foul adjust: {} {:+} -> {}", side.label(), delta, team.foul_count);
    }

    // ========================
    // Period & Clock
    // ========================

    /// Move to the next period and rewind the clock to the period length.
    pub fn advance_period(&mut self) {
        self.period = self.period.saturating_add(1);
        self.clock.reset();
        info!("period advanced to {}", self.period);
    }

    /// One-second tick from the external timer: winds the clock down and
    /// accrues on-court time. This is the only writer of `seconds_played`.
    pub fn tick_clock(&mut self) {
        self.clock.tick();
        for player in self.players.iter_mut().filter(|p| p.on_court) {
            player.aggregate.seconds_played += 1;
        }
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Mutable clock access for manual corrections (stoppages, reviews).
    pub fn clock_mut(&mut self) -> &mut GameClock {
        &mut self.clock
    }

    // ========================
    // Lifecycle
    // ========================

    /// Replace the whole session with a fresh empty one: new session id,
    /// ledger cleared, roster cleared, period back to 1. Destructive and
    /// irreversible; no backup is taken. The clock's period length is the
    /// one piece of configuration that survives.
    pub fn reset(&mut self) {
        info!(
            "session reset: discarding {} ledger entries and {} players",
            self.log.len(),
            self.players.len()
        );
        let period_length = self.clock.period_length_seconds();
        *self = GameSession::new();
        self.clock = GameClock::with_period_length(period_length);
    }

    // ========================
    // Read Accessors
    // ========================

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn started_at(&self) -> u64 {
        self.started_at
    }

    pub fn team(&self, side: TeamSide) -> &TeamRecord {
        self.teams.side(side)
    }

    pub fn set_team_name(&mut self, side: TeamSide, name: &str) {
        self.teams.side_mut(side).display_name = name.to_string();
    }

    pub fn log(&self) -> &EventLedger {
        &self.log
    }

    pub fn period(&self) -> u8 {
        self.period
    }
}

fn apply_delta(value: u32, delta: i32) -> u32 {
    if delta >= 0 {
        value.saturating_add(delta as u32)
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_player() -> (GameSession, String) {
        let mut session = GameSession::new();
        let id = session.add_player("7", "Ana", TeamSide::Home).unwrap().id.clone();
        (session, id)
    }

    #[test]
    fn test_record_action_commits_player_and_team_together() {
        let (mut session, id) = session_with_player();

        session.record_action(&id, ActionKind::TwoPointMade, None).unwrap();

        let player = session.player(&id).unwrap();
        assert_eq!(player.aggregate.points, 2);
        assert_eq!(player.aggregate.fg2m, 1);
        assert_eq!(player.aggregate.fg2a, 1);
        assert_eq!(session.team(TeamSide::Home).score, 2);
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_record_action_stamps_period_and_clock() {
        let (mut session, id) = session_with_player();
        session.advance_period();
        session.tick_clock();
        session.tick_clock();

        let entry = session.record_action(&id, ActionKind::Steal, None).unwrap();
        assert_eq!(entry.period, 2);
        assert_eq!(entry.game_clock, "09:58");
    }

    #[test]
    fn test_unknown_player_rejected_without_mutation() {
        let (mut session, _) = session_with_player();

        let err = session.record_action("ghost", ActionKind::Assist, None).unwrap_err();
        assert_eq!(err, SessionError::UnknownPlayer { player_id: "ghost".to_string() });
        assert!(session.log().is_empty());
        assert_eq!(session.team(TeamSide::Home).score, 0);
    }

    #[test]
    fn test_add_player_rejects_empty_fields() {
        let mut session = GameSession::new();

        let err = session.add_player("", "Ana", TeamSide::Home).unwrap_err();
        assert_eq!(err, SessionError::InvalidRosterInput { field: "jersey_number" });

        let err = session.add_player("7", "  ", TeamSide::Home).unwrap_err();
        assert_eq!(err, SessionError::InvalidRosterInput { field: "display_name" });

        assert!(session.players().is_empty());
    }

    #[test]
    fn test_duplicate_jerseys_are_permitted() {
        let mut session = GameSession::new();
        session.add_player("7", "Ana", TeamSide::Home).unwrap();
        session.add_player("7", "Bea", TeamSide::Home).unwrap();
        assert_eq!(session.roster(TeamSide::Home).count(), 2);
    }

    #[test]
    fn test_set_on_court_has_no_stat_side_effect() {
        let (mut session, id) = session_with_player();
        session.set_on_court(&id, true).unwrap();

        let player = session.player(&id).unwrap();
        assert!(player.on_court);
        assert_eq!(player.aggregate, crate::models::PlayerAggregate::default());
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_adjust_score_floors_at_zero() {
        let mut session = GameSession::new();
        session.adjust_score(TeamSide::Visitor, -5);
        assert_eq!(session.team(TeamSide::Visitor).score, 0);

        session.adjust_score(TeamSide::Visitor, 3);
        session.adjust_score(TeamSide::Visitor, -1);
        assert_eq!(session.team(TeamSide::Visitor).score, 2);
    }

    #[test]
    fn test_adjust_score_may_diverge_from_player_points() {
        let (mut session, id) = session_with_player();
        session.record_action(&id, ActionKind::TwoPointMade, None).unwrap();
        session.adjust_score(TeamSide::Home, 1);

        // Explicit override: 3 on the board, 2 from player points.
        assert_eq!(session.team(TeamSide::Home).score, 3);
        assert_eq!(session.player(&id).unwrap().aggregate.points, 2);
    }

    #[test]
    fn test_adjust_team_fouls_floors_at_zero() {
        let mut session = GameSession::new();
        session.adjust_team_fouls(TeamSide::Home, -2);
        assert_eq!(session.team(TeamSide::Home).foul_count, 0);
    }

    #[test]
    fn test_tick_accrues_seconds_only_on_court() {
        let mut session = GameSession::new();
        let on = session.add_player("4", "Ana", TeamSide::Home).unwrap().id.clone();
        let off = session.add_player("5", "Bea", TeamSide::Home).unwrap().id.clone();
        session.set_on_court(&on, true).unwrap();

        for _ in 0..30 {
            session.tick_clock();
        }

        assert_eq!(session.player(&on).unwrap().aggregate.seconds_played, 30);
        assert_eq!(session.player(&off).unwrap().aggregate.seconds_played, 0);
        assert_eq!(session.clock().formatted(), "09:30");
    }

    #[test]
    fn test_reset_yields_fresh_session() {
        let (mut session, id) = session_with_player();
        session.record_action(&id, ActionKind::ThreePointMade, None).unwrap();
        session.advance_period();
        let old_session_id = session.session_id().to_string();

        session.reset();

        assert_ne!(session.session_id(), old_session_id);
        assert!(session.log().is_empty());
        assert!(session.players().is_empty());
        assert_eq!(session.period(), 1);
        assert_eq!(session.team(TeamSide::Home).score, 0);
    }

    #[test]
    fn test_reset_keeps_period_length_configuration() {
        let mut session = GameSession::with_setup("Lions", "Hawks", 720);
        session.reset();
        assert_eq!(session.clock().period_length_seconds(), 720);
    }

    #[test]
    fn test_sequence_ids_never_repeat_across_recordings() {
        let (mut session, id) = session_with_player();
        let mut seen = Vec::new();
        for _ in 0..5 {
            let seq = session.record_action(&id, ActionKind::Assist, None).unwrap().sequence_id;
            seen.push(seq);
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }

    mod properties {
        use super::*;
        use crate::aggregator::replay_aggregate;
        use proptest::prelude::*;
        use strum::IntoEnumIterator;

        fn action_strategy() -> impl Strategy<Value = ActionKind> {
            prop::sample::select(ActionKind::iter().collect::<Vec<_>>())
        }

        proptest! {
            /// Spec properties: the scoring identity and the
            /// makes-never-exceed-attempts bounds hold after every step,
            /// and replaying the ledger reproduces the live aggregates.
            #[test]
            fn aggregates_stay_consistent_and_replayable(
                actions in prop::collection::vec((0usize..4, action_strategy()), 0..64)
            ) {
                let mut session = GameSession::new();
                let mut ids = Vec::new();
                for (jersey, side) in
                    [("4", TeamSide::Home), ("5", TeamSide::Home),
                     ("6", TeamSide::Visitor), ("7", TeamSide::Visitor)]
                {
                    ids.push(session.add_player(jersey, "Player", side).unwrap().id.clone());
                }

                for (pick, action) in actions {
                    let id = &ids[pick];
                    session.record_action(id, action, None).unwrap();

                    for player in session.players() {
                        prop_assert!(player.aggregate.is_consistent());
                    }
                }

                // Ledger replay in order reproduces every live aggregate.
                for id in &ids {
                    let replayed =
                        replay_aggregate(session.log().entries_for(|e| &e.player_id == id));
                    prop_assert_eq!(&replayed, &session.player(id).unwrap().aggregate);
                }

                // Team scores match player-point sums (no manual overrides here).
                for side in [TeamSide::Home, TeamSide::Visitor] {
                    let summed: u32 =
                        session.roster(side).map(|p| p.aggregate.points).sum();
                    prop_assert_eq!(session.team(side).score, summed);
                }
            }

            /// Sequence ids are strictly increasing over any recording run.
            #[test]
            fn sequence_ids_strictly_increase(
                actions in prop::collection::vec(action_strategy(), 1..64)
            ) {
                let mut session = GameSession::new();
                let id = session.add_player("9", "Player", TeamSide::Home).unwrap().id.clone();

                let mut last = 0u64;
                for action in actions {
                    let seq = session.record_action(&id, action, None).unwrap().sequence_id;
                    prop_assert!(seq > last);
                    last = seq;
                }
            }
        }
    }
}
