use chrono::Utc;
use uuid::Uuid;
use warp::Filter;
use warp::filters::BoxedFilter;
use warp::reply::Response;

use typing_core::{Board, day_start, rank};
use typing_types::{LeaderboardQuery, LeaderboardResponse};

use crate::AppState;
use crate::error::{ApiError, ApiResult, ok_json, respond};
use crate::filters::{parse_id, with_state};

pub fn routes(state: &AppState) -> BoxedFilter<(Response,)> {
    let daily = warp::path!("api" / "leaderboard")
        .and(warp::get())
        .and(warp::query::<LeaderboardQuery>())
        .and(with_state(state))
        .then(|query: LeaderboardQuery, state: AppState| board(query, Board::Daily, state))
        .map(respond);

    let all_time = warp::path!("api" / "leaderboard" / "all-time")
        .and(warp::get())
        .and(warp::query::<LeaderboardQuery>())
        .and(with_state(state))
        .then(|query: LeaderboardQuery, state: AppState| board(query, Board::AllTime, state))
        .map(respond);

    daily.or(all_time).unify().boxed()
}

/// Resolves the optional `event_id` filter, rejecting unknown events.
async fn event_filter(raw: Option<&str>, state: &AppState) -> Result<Option<Uuid>, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    let event_id = parse_id(raw, "event")?;
    match state.events.find_by_id(event_id).await? {
        Some(_) => Ok(Some(event_id)),
        None => Err(ApiError::not_found("Event not found")),
    }
}

async fn board(query: LeaderboardQuery, board: Board, state: AppState) -> ApiResult {
    let event_id = event_filter(query.event_id.as_deref(), &state).await?;

    let now = Utc::now();
    let (since, date) = match board {
        Board::Daily => {
            let start = day_start(now);
            (Some(start), Some(start.format("%Y-%m-%d").to_string()))
        }
        Board::AllTime => (None, None),
    };

    let scores = state.scores.ranked_scores(since, event_id).await?;

    ok_json(&LeaderboardResponse {
        date,
        event_id,
        leaderboard: rank(scores, board),
    })
}
