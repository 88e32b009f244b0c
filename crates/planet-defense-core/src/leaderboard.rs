//! Ranked list of the best finished sessions.
//!
//! The simulation only decides ranking; reading and writing the list is
//! the host's job.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_LEADERBOARD_ENTRIES;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub wave: u32,
    /// Whole-session accuracy in percent.
    pub accuracy: u32,
    /// ISO calendar date (`YYYY-MM-DD`).
    pub date: String,
}

/// At most [`MAX_LEADERBOARD_ENTRIES`] entries, highest score first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, restoring order and the size bound.
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_LEADERBOARD_ENTRIES);
        Self { entries }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `score` would earn a place on the board.
    pub fn is_high_score(&self, score: u32) -> bool {
        if self.entries.len() < MAX_LEADERBOARD_ENTRIES {
            return true;
        }
        self.entries.last().is_some_and(|lowest| score > lowest.score)
    }

    /// Insert an entry below any existing entries with the same score.
    /// Returns the 0-based rank, or `None` if it did not make the board.
    pub fn add_entry(
        &mut self,
        name: &str,
        score: u32,
        wave: u32,
        accuracy: f32,
        date: &str,
    ) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|e| e.score < score)
            .unwrap_or(self.entries.len());
        if rank >= MAX_LEADERBOARD_ENTRIES {
            return None;
        }

        let name = name.trim();
        self.entries.insert(
            rank,
            LeaderboardEntry {
                name: if name.is_empty() { "Anonymous".into() } else { name.to_string() },
                score,
                wave,
                accuracy: (accuracy.clamp(0.0, 1.0) * 100.0).round() as u32,
                date: date.to_string(),
            },
        );
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
        Some(rank)
    }
}
