use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::Player;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Score {
    pub id: Uuid,
    pub player_id: Uuid,
    pub prompt_id: Uuid,
    pub event_id: Option<Uuid>,
    pub wpm: f64,
    pub accuracy: f64,
    pub score: i32,
    pub started_at: Option<String>,
    pub created_at: String,
    pub player: Option<Player>,
}

/// Identifiers arrive as strings so a malformed one can be reported by name.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitScoreRequest {
    pub player_id: Option<String>,
    pub prompt_id: Option<String>,
    pub event_id: Option<String>,
    pub wpm: Option<f64>,
    pub accuracy: Option<f64>,
    pub started_at: Option<String>,
}
