//! High score and boredom meter, owned by the game and passed by `&mut`.

use crate::entity::EntityKind;
use crate::error::{GameError, Result};

pub const SCORE_REDUCE_DAMSEL_DEATH: u32 = 6;
pub const BOREDOM_REDUCE_DAMSEL_DEATH: u32 = 10;
pub const SCORE_INCREASE_SKELETON_DEATH: u32 = 1;
pub const BOREDOM_INCREASE_SKELETON_DEATH: u32 = 5;

/// Both meters are unsigned, so the "never negative" rule cannot be broken
/// by construction; the setters still take signed input so callers doing
/// arithmetic get a clear rejection instead of a wrap.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScoreController {
    high_score: u32,
    boredom_meter: u32,
}

impl ScoreController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn boredom_meter(&self) -> u32 {
        self.boredom_meter
    }

    /// Rejects negative values and leaves the score unchanged.
    pub fn set_high_score(&mut self, value: i64) -> Result<()> {
        self.high_score = non_negative("high score", value)?;
        Ok(())
    }

    pub fn set_boredom_meter(&mut self, value: i64) -> Result<()> {
        self.boredom_meter = non_negative("boredom meter", value)?;
        Ok(())
    }

    /// A hostile entity was destroyed. Only skeletons score.
    pub fn bad_entity_destroyed_update_score(&mut self, kind: EntityKind) {
        if kind == EntityKind::Skeleton {
            self.high_score = self.high_score.saturating_add(SCORE_INCREASE_SKELETON_DEATH);
            self.boredom_meter = self.boredom_meter.saturating_add(BOREDOM_INCREASE_SKELETON_DEATH);
            log::debug!("[score] skeleton down: {} / boredom {}", self.high_score, self.boredom_meter);
        }
    }

    /// A friendly entity was destroyed. Damsel deaths cost points, clamped
    /// at zero.
    pub fn good_entity_destroyed_update_score(&mut self, kind: EntityKind) {
        if kind == EntityKind::Damsel {
            self.high_score = self.high_score.saturating_sub(SCORE_REDUCE_DAMSEL_DEATH);
            self.boredom_meter = self.boredom_meter.saturating_sub(BOREDOM_REDUCE_DAMSEL_DEATH);
            log::debug!("[score] damsel lost: {} / boredom {}", self.high_score, self.boredom_meter);
        }
    }

    /// Route a death to the right update by the entity's faction.
    pub fn entity_destroyed(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Skeleton => self.bad_entity_destroyed_update_score(kind),
            EntityKind::Damsel => self.good_entity_destroyed_update_score(kind),
            EntityKind::Player => {}
        }
    }
}

fn non_negative(meter: &'static str, value: i64) -> Result<u32> {
    if value < 0 {
        return Err(GameError::NegativeScore { meter, value });
    }
    Ok(u32::try_from(value).unwrap_or(u32::MAX))
}
