use crate::consts::{LEVEL_2_SCORE, LEVEL_3_SCORE, MAX_LEVEL};

/// Tracks the current level; it only ever goes up within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTracker {
    level: u8,
}

impl Default for LevelTracker {
    fn default() -> Self {
        Self { level: 1 }
    }
}

impl LevelTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn level_for_score(score: u32) -> u8 {
        if score >= LEVEL_3_SCORE {
            3
        } else if score >= LEVEL_2_SCORE {
            2
        } else {
            1
        }
    }

    /// Recomputes the level from `score`. Returns true only when it went up.
    pub fn check(&mut self, score: u32) -> bool {
        let target = Self::level_for_score(score).min(MAX_LEVEL);
        if target > self.level {
            log::info!("level up: {} -> {} at score {}", self.level, target, score);
            self.level = target;
            true
        } else {
            false
        }
    }

    pub fn is_boss_level(&self) -> bool {
        self.level == MAX_LEVEL
    }

    pub fn reset(&mut self) {
        self.level = 1;
    }
}
