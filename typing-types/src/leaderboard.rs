use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player_id: Uuid,
    pub nickname: String,
    pub wpm: f64,
    pub accuracy: f64, // percent, one decimal place
    pub score: i32,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeaderboardResponse {
    /// UTC day the daily board covers; absent for the all-time board.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub event_id: Option<Uuid>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    pub event_id: Option<String>,
}
