use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Coarse performance bucket used to pick flavor text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PerformanceTier {
    Legendary,
    Excellent,
    Great,
    Good,
    NeedsPractice,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PerformanceMessageRequest {
    pub nickname: Option<String>,
    pub wpm: Option<f64>,
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PerformanceMessage {
    pub message: String,
    pub tier: PerformanceTier,
    pub ai_generated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
