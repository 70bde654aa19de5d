use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use warp::Filter;
use warp::filters::BoxedFilter;
use warp::reply::Response;

use typing_persistence::ConsentRecord;
use typing_types::{CreateEventRequest, RecordConsentRequest, StatusBody, UpdateEventRequest};

use crate::AppState;
use crate::error::{ApiError, ApiResult, created_json, ok_json, respond};
use crate::filters::{client_ip, json_body, parse_id, with_state};

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("slug pattern is a valid regex"));

pub fn routes(state: &AppState) -> BoxedFilter<(Response,)> {
    let by_slug = warp::path!("api" / "events" / String)
        .and(warp::get())
        .and(with_state(state))
        .then(event_by_slug)
        .map(respond);

    let consent = warp::path!("api" / "events" / String / "consent")
        .and(warp::post())
        .and(json_body::<RecordConsentRequest>())
        .and(client_ip())
        .and(with_state(state))
        .then(record_consent)
        .map(respond);

    let list = warp::path!("api" / "events")
        .and(warp::get())
        .and(with_state(state))
        .then(list_events)
        .map(respond);

    let create = warp::path!("api" / "events")
        .and(warp::post())
        .and(json_body::<CreateEventRequest>())
        .and(with_state(state))
        .then(create_event)
        .map(respond);

    let update = warp::path!("api" / "events" / String)
        .and(warp::patch())
        .and(json_body::<UpdateEventRequest>())
        .and(with_state(state))
        .then(update_event)
        .map(respond);

    let delete = warp::path!("api" / "events" / String)
        .and(warp::delete())
        .and(with_state(state))
        .then(delete_event)
        .map(respond);

    let consents = warp::path!("api" / "events" / String / "consents")
        .and(warp::get())
        .and(with_state(state))
        .then(list_consents)
        .map(respond);

    by_slug
        .or(consent)
        .unify()
        .or(list)
        .unify()
        .or(create)
        .unify()
        .or(update)
        .unify()
        .or(delete)
        .unify()
        .or(consents)
        .unify()
        .boxed()
}

fn normalize_slug(raw: &str) -> Result<String, ApiError> {
    let slug = raw.trim().to_lowercase();
    if !SLUG.is_match(&slug) {
        return Err(ApiError::bad_request(
            "Slug may only contain lowercase letters, numbers and hyphens",
        ));
    }
    Ok(slug)
}

fn config_object(config: Value) -> Result<Value, ApiError> {
    match config {
        Value::Object(_) => Ok(config),
        _ => Err(ApiError::bad_request("Config must be a JSON object")),
    }
}

async fn event_by_slug(slug: String, state: AppState) -> ApiResult {
    let slug = slug.trim().to_lowercase();
    let event = state
        .events
        .find_active_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;
    ok_json(&event)
}

async fn record_consent(
    event_id: String,
    body: Result<RecordConsentRequest, ApiError>,
    ip_address: Option<String>,
    state: AppState,
) -> ApiResult {
    let event_id = parse_id(&event_id, "event")?;
    let body = body?;

    let player_id = body
        .player_id
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| ApiError::bad_request("player_id is required"))?;
    let player_id = parse_id(player_id, "player")?;

    let event = state
        .events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;
    if !state.players.exists(player_id).await? {
        return Err(ApiError::not_found("Player not found"));
    }

    state
        .events
        .record_consent(ConsentRecord {
            event_id,
            player_id,
            consented: body.consented,
            consent_text: event.consent_label(),
            ip_address,
        })
        .await?;

    ok_json(&StatusBody::ok())
}

async fn list_events(state: AppState) -> ApiResult {
    state.admin.check()?;
    ok_json(&state.events.list().await?)
}

async fn create_event(body: Result<CreateEventRequest, ApiError>, state: AppState) -> ApiResult {
    state.admin.check()?;
    let body = body?;

    let slug = body.slug.as_deref().map(str::trim).unwrap_or_default();
    let name = body.name.as_deref().map(str::trim).unwrap_or_default();
    if slug.is_empty() || name.is_empty() {
        return Err(ApiError::bad_request("Slug and name are required"));
    }

    let slug = normalize_slug(slug)?;
    let config = config_object(body.config.unwrap_or_else(|| Value::Object(Map::new())))?;

    if state.events.find_by_slug(&slug).await?.is_some() {
        return Err(ApiError::Conflict(
            "An event with this slug already exists".to_string(),
        ));
    }

    let event = state
        .events
        .create(slug, name.to_string(), body.is_active.unwrap_or(true), config)
        .await?;
    created_json(&event)
}

async fn update_event(
    id: String,
    body: Result<UpdateEventRequest, ApiError>,
    state: AppState,
) -> ApiResult {
    state.admin.check()?;
    let id = parse_id(&id, "event")?;
    let body = body?;

    let name = match body.name {
        Some(name) if name.trim().is_empty() => {
            return Err(ApiError::bad_request("Name cannot be empty"));
        }
        Some(name) => Some(name.trim().to_string()),
        None => None,
    };
    let config = body.config.map(config_object).transpose()?;

    let event = state
        .events
        .update(id, name, body.is_active, config)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;
    ok_json(&event)
}

async fn delete_event(id: String, state: AppState) -> ApiResult {
    state.admin.check()?;
    let id = parse_id(&id, "event")?;

    if !state.events.delete(id).await? {
        return Err(ApiError::not_found("Event not found"));
    }
    ok_json(&StatusBody::ok())
}

async fn list_consents(id: String, state: AppState) -> ApiResult {
    state.admin.check()?;
    let id = parse_id(&id, "event")?;

    if state.events.find_by_id(id).await?.is_none() {
        return Err(ApiError::not_found("Event not found"));
    }
    ok_json(&state.events.consents_for(id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("  KubeCon-2026 ").unwrap(), "kubecon-2026");
        assert!(normalize_slug("kube con").is_err());
        assert!(normalize_slug("kube_con").is_err());
    }

    #[test]
    fn test_config_must_be_object() {
        assert!(config_object(serde_json::json!({"subtitle": "Day 1"})).is_ok());
        assert!(config_object(serde_json::json!(["a"])).is_err());
        assert!(config_object(Value::Null).is_err());
    }
}
