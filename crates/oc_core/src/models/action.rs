use serde::{Deserialize, Serialize};

/// Recordable stat actions. Closed set: the aggregator folds over this with
/// an exhaustive match, so adding a kind forces every consumer to handle it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    TwoPointMade,
    TwoPointMissed,
    ThreePointMade,
    ThreePointMissed,
    FreeThrowMade,
    FreeThrowMissed,
    OffensiveRebound,
    DefensiveRebound,
    Assist,
    Steal,
    Block,
    Turnover,
    PersonalFoul,
    /// Foul drawn by this player (committed by an opponent).
    DrawnFoul,
}

impl ActionKind {
    /// The four field-goal kinds are the only ones that may carry a
    /// [`ShotLocation`].
    pub fn is_field_goal(&self) -> bool {
        matches!(
            self,
            ActionKind::TwoPointMade
                | ActionKind::TwoPointMissed
                | ActionKind::ThreePointMade
                | ActionKind::ThreePointMissed
        )
    }

    pub fn is_made_shot(&self) -> bool {
        matches!(
            self,
            ActionKind::TwoPointMade | ActionKind::ThreePointMade | ActionKind::FreeThrowMade
        )
    }

    /// Points the action puts on the board (0 for non-scoring kinds).
    pub fn points(&self) -> u32 {
        match self {
            ActionKind::TwoPointMade => 2,
            ActionKind::ThreePointMade => 3,
            ActionKind::FreeThrowMade => 1,
            _ => 0,
        }
    }
}

/// Shot coordinates normalized to percentage of court width/height (0-100).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ShotLocation {
    pub x: f32,
    pub y: f32,
}

impl ShotLocation {
    /// Clamps into the normalized 0-100 court space.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x: x.clamp(0.0, 100.0), y: y.clamp(0.0, 100.0) }
    }
}
