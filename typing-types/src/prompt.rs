use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub const DEFAULT_CATEGORY: &str = "general";
pub const DEFAULT_DIFFICULTY: &str = "medium";

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Prompt {
    pub id: Uuid,
    pub text: String,
    pub category: String,
    pub difficulty: String,
    pub is_active: bool,
    pub times_used: i32,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreatePromptRequest {
    pub text: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub is_active: Option<bool>,
}

/// Partial update: absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UpdatePromptRequest {
    pub text: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomPromptQuery {
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GeneratePromptRequest {
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GeneratedPrompt {
    pub text: String,
    pub category: String,
    pub difficulty: String,
    pub ai_generated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MessageBody {
    pub message: String,
}
