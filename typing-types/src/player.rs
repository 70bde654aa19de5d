use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::EmailClass;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub id: Uuid,
    pub nickname: String,
    pub email: String,
    pub is_hidden: bool,
    pub email_type: Option<EmailClass>,
    pub created_at: String, // ISO 8601 string
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RegisterPlayerRequest {
    pub nickname: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerListQuery {
    pub include_hidden: Option<bool>,
}
