//! Scoring, level progression and gravity speed

use std::time::Duration;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 10;
/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Default gravity interval per level, level 1 first
pub const DEFAULT_DROP_INTERVALS_MS: [u64; MAX_LEVEL as usize] =
    [1000, 850, 720, 610, 520, 440, 380, 330, 290, 250];

/// Points for clearing `lines` rows with a single piece
pub fn reward(lines: usize) -> u64 {
    match lines {
        1 => 100,
        2 => 300,
        3 => 500,
        4 => 800,
        _ => 0,
    }
}

/// Level reached after clearing `lines` rows in total
pub fn level_for_lines(lines: u32) -> u32 {
    (1 + lines / LINES_PER_LEVEL).min(MAX_LEVEL)
}

/// Score tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
    /// Current level, derived from `lines`
    pub level: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            lines: 0,
            level: 1,
        }
    }

    /// Account for `cleared` rows removed by one lock.
    /// Returns the points awarded.
    pub fn add_clear(&mut self, cleared: usize) -> u64 {
        if cleared == 0 {
            return 0;
        }
        let points = reward(cleared);
        self.lines += cleared as u32;
        self.points += points;
        self.level = level_for_lines(self.lines);
        points
    }
}

/// Per-level gravity intervals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropSpeed {
    intervals: [Duration; MAX_LEVEL as usize],
}

impl Default for DropSpeed {
    fn default() -> Self {
        Self {
            intervals: DEFAULT_DROP_INTERVALS_MS.map(Duration::from_millis),
        }
    }
}

impl DropSpeed {
    /// Build a table from millisecond values, level 1 first.
    ///
    /// Returns None unless there is exactly one non-zero entry per level and no
    /// level is slower than the one before it.
    pub fn from_millis(table: &[u64]) -> Option<Self> {
        let intervals: [u64; MAX_LEVEL as usize] = table.try_into().ok()?;
        if intervals.contains(&0) || intervals.windows(2).any(|w| w[1] > w[0]) {
            return None;
        }
        Some(Self {
            intervals: intervals.map(Duration::from_millis),
        })
    }

    /// Gravity interval at `level` (clamped to 1..=MAX_LEVEL)
    pub fn interval(&self, level: u32) -> Duration {
        let index = level.clamp(1, MAX_LEVEL) as usize - 1;
        self.intervals[index]
    }
}
