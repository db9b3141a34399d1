//! Experience points, levels and streaks
//!
//! Levels are a stateless projection of a monotonically increasing XP
//! counter. [`UserStats`] holds the counter; its reducers return nothing
//! and mutate only the value they are called on.

use serde::{Deserialize, Serialize};

/// Experience required to clear one level
pub const XP_PER_LEVEL: u32 = 1000;

/// Level for an XP total, starting at 1
pub fn level_from_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// XP total at which `level` is cleared
pub fn xp_for_level(level: u32) -> u32 {
    level.saturating_mul(XP_PER_LEVEL)
}

/// Progress through the current level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    pub current: u32,
    pub needed: u32,
    pub percentage: f64,
}

/// Compute progress within the current level
pub fn level_progress(xp: u32) -> LevelProgress {
    let level = level_from_xp(xp);
    let current = xp - (level - 1) * XP_PER_LEVEL;
    LevelProgress {
        level,
        current,
        needed: XP_PER_LEVEL,
        percentage: current as f64 / XP_PER_LEVEL as f64 * 100.0,
    }
}

/// Engagement counters kept alongside a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub xp: u32,
    pub level: u32,
    pub streak: u32,
    pub workouts_completed: u32,
    pub meals_tracked: u32,
    pub macros_hit: u32,
    pub badges: Vec<String>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            streak: 0,
            workouts_completed: 0,
            meals_tracked: 0,
            macros_hit: 0,
            badges: Vec::new(),
        }
    }
}

impl UserStats {
    /// Add XP and recompute the level from the new total
    pub fn add_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
        self.level = level_from_xp(self.xp);
    }

    pub fn increment_streak(&mut self) {
        self.streak = self.streak.saturating_add(1);
    }

    pub fn reset_streak(&mut self) {
        self.streak = 0;
    }

    /// Award a badge; returns false when it was already held
    pub fn add_badge(&mut self, badge: &str) -> bool {
        if self.badges.iter().any(|b| b == badge) {
            return false;
        }
        self.badges.push(badge.to_string());
        true
    }

    pub fn progress(&self) -> LevelProgress {
        level_progress(self.xp)
    }
}
