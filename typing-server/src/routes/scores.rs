use chrono::{DateTime, FixedOffset, NaiveDateTime};
use warp::Filter;
use warp::filters::BoxedFilter;
use warp::reply::Response;

use typing_core::ScoringEngine;
use typing_persistence::NewScore;
use typing_types::SubmitScoreRequest;

use crate::AppState;
use crate::error::{ApiError, ApiResult, created_json, ok_json, respond};
use crate::filters::{json_body, parse_id, with_state};

pub fn routes(state: &AppState) -> BoxedFilter<(Response,)> {
    let submit = warp::path!("api" / "scores")
        .and(warp::post())
        .and(json_body::<SubmitScoreRequest>())
        .and(with_state(state))
        .then(submit_score)
        .map(respond);

    let by_player = warp::path!("api" / "scores" / "player" / String)
        .and(warp::get())
        .and(with_state(state))
        .then(player_scores)
        .map(respond);

    let get = warp::path!("api" / "scores" / String)
        .and(warp::get())
        .and(with_state(state))
        .then(get_score)
        .map(respond);

    submit.or(by_player).unify().or(get).unify().boxed()
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::bad_request(format!("{} is required", field)))
}

/// ISO 8601 start time from the client. Timestamps without an offset are UTC.
fn parse_started_at(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

async fn submit_score(body: Result<SubmitScoreRequest, ApiError>, state: AppState) -> ApiResult {
    let body = body?;

    let player_id = required(body.player_id, "player_id")?;
    let prompt_id = required(body.prompt_id, "prompt_id")?;
    let wpm = required(body.wpm, "wpm")?;
    let accuracy = required(body.accuracy, "accuracy")?;

    let player_id = parse_id(&player_id, "player")?;
    let prompt_id = parse_id(&prompt_id, "prompt")?;
    let event_id = match body.event_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_id(raw, "event")?),
        _ => None,
    };

    ScoringEngine::validate(wpm, accuracy).map_err(|err| ApiError::bad_request(err.to_string()))?;

    if !state.players.exists(player_id).await? {
        return Err(ApiError::not_found("Player not found"));
    }
    if !state.prompts.exists(prompt_id).await? {
        return Err(ApiError::not_found("Prompt not found"));
    }
    if let Some(event_id) = event_id {
        if state.events.find_by_id(event_id).await?.is_none() {
            return Err(ApiError::not_found("Event not found"));
        }
    }

    // Anything unparseable is dropped rather than failing the submission
    let started_at = body.started_at.as_deref().and_then(parse_started_at);

    let score = state
        .scores
        .create(NewScore {
            player_id,
            prompt_id,
            event_id,
            wpm,
            accuracy,
            score: ScoringEngine::points_for(wpm, accuracy),
            started_at,
        })
        .await?;

    created_json(&score)
}

async fn get_score(id: String, state: AppState) -> ApiResult {
    let id = parse_id(&id, "score")?;
    let score = state
        .scores
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Score not found"))?;
    ok_json(&score)
}

async fn player_scores(player_id: String, state: AppState) -> ApiResult {
    let player_id = parse_id(&player_id, "player")?;
    if !state.players.exists(player_id).await? {
        return Err(ApiError::not_found("Player not found"));
    }
    ok_json(&state.scores.list_for_player(player_id).await?)
}
