use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use typing_types::LeaderboardEntry;
use uuid::Uuid;

use crate::scoring::ScoringEngine;

pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board {
    /// Every score recorded since 00:00 UTC today.
    Daily,
    /// Each player's single best score.
    AllTime,
}

/// A score joined with the visible player who set it.
#[derive(Debug, Clone)]
pub struct RankedScore {
    pub player_id: Uuid,
    pub nickname: String,
    pub wpm: f64,
    pub accuracy: f64,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

/// Start of the UTC day containing `now`.
pub fn day_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}

/// Orders scores best-first and keeps the top entries for the board.
///
/// Ties on score go to whoever set it first.
pub fn rank(mut scores: Vec<RankedScore>, board: Board) -> Vec<LeaderboardEntry> {
    scores.sort_by(|a, b| match b.score.cmp(&a.score) {
        Ordering::Equal => a.created_at.cmp(&b.created_at),
        other => other,
    });

    let mut seen_players = HashSet::new();
    scores
        .into_iter()
        .filter(|score| board == Board::Daily || seen_players.insert(score.player_id))
        .take(LEADERBOARD_SIZE)
        .enumerate()
        .map(|(index, score)| LeaderboardEntry {
            rank: (index + 1) as u32,
            player_id: score.player_id,
            nickname: score.nickname,
            wpm: score.wpm,
            accuracy: ScoringEngine::accuracy_percent(score.accuracy),
            score: score.score,
            created_at: score.created_at.to_rfc3339(),
        })
        .collect()
}
