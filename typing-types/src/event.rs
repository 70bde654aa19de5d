use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Event {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub is_active: bool,
    #[ts(type = "Record<string, unknown>")]
    pub config: serde_json::Value,
    pub created_at: String,
}

/// Shape of the optional `consent` block inside an event's config.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EventConsentConfig {
    #[serde(default)]
    pub enabled: bool,
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateEventRequest {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
    #[ts(type = "Record<string, unknown> | null")]
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    #[ts(type = "Record<string, unknown> | null")]
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecordConsentRequest {
    pub player_id: Option<String>,
    pub consented: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EventConsent {
    pub id: Uuid,
    pub event_id: Uuid,
    pub player_id: Uuid,
    pub consented: Option<bool>,
    pub consent_text: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Event {
    /// Consent label to snapshot when a player answers, if the event asks.
    pub fn consent_label(&self) -> Option<String> {
        let consent: EventConsentConfig =
            serde_json::from_value(self.config.get("consent")?.clone()).ok()?;
        consent.enabled.then_some(consent.label).flatten()
    }
}
