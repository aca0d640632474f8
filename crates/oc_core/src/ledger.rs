//! Append-only log of recorded actions: the source of truth for every
//! derived aggregate. Entries are never edited or removed, and ledger
//! order is the only valid replay order.

use serde::{Deserialize, Serialize};

use crate::models::{ActionKind, LogEntry, ShotLocation, TeamSide};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventLedger {
    entries: Vec<LogEntry>,
    /// Next sequence id to assign. Persisted so a restored ledger never
    /// reuses an id.
    next_sequence_id: u64,
}

impl Default for EventLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLedger {
    pub fn new() -> Self {
        Self { entries: Vec::new(), next_sequence_id: 1 }
    }

    /// Append one action, stamping the next sequence id. A location
    /// supplied with a non-field-goal kind is stripped: only the four
    /// field-goal kinds carry chart data.
    pub fn append(
        &mut self,
        player_id: impl Into<String>,
        team_id: TeamSide,
        action: ActionKind,
        period: u8,
        game_clock: impl Into<String>,
        location: Option<ShotLocation>,
    ) -> &LogEntry {
        let location = if action.is_field_goal() { location } else { None };
        let entry = LogEntry {
            sequence_id: self.next_sequence_id,
            player_id: player_id.into(),
            team_id,
            action,
            period,
            game_clock: game_clock.into(),
            location,
        };
        self.next_sequence_id += 1;
        self.entries.push(entry);
        self.entries.last().expect("entry just appended")
    }

    /// Lazy, restartable iteration over matching entries in ledger order.
    pub fn entries_for<P>(&self, mut predicate: P) -> impl Iterator<Item = &LogEntry>
    where
        P: FnMut(&LogEntry) -> bool,
    {
        self.entries.iter().filter(move |entry| predicate(entry))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Ensure the counter is strictly ahead of every stored entry. Used by
    /// snapshot migration when restoring legacy data.
    pub(crate) fn reseat_sequence_counter(&mut self) {
        let max = self.entries.iter().map(|e| e.sequence_id).max().unwrap_or(0);
        if self.next_sequence_id <= max {
            self.next_sequence_id = max + 1;
        }
    }

    #[cfg(test)]
    pub(crate) fn next_sequence_id(&self) -> u64 {
        self.next_sequence_id
    }
}
