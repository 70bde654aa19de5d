use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::EmailClass;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerSummary {
    pub id: Uuid,
    pub email: String,
    pub nickname: String,
    pub email_type: Option<EmailClass>,
    pub games_played: u32,
    pub best_score: i32,
    pub avg_wpm: f64,
    pub avg_accuracy: f64, // percent
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdminStats {
    pub total_players: u32,
    pub total_games: u32,
    pub players_with_games: u32,
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminStatsQuery {
    pub email: Option<String>,
    pub team: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalyzeEmailsRequest {
    pub reanalyze: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalyzeEmailsResponse {
    pub message: String,
    pub analyzed: u32,
    pub updated: u32,
    pub results: BTreeMap<String, EmailClass>,
}
