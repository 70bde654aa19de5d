use warp::Filter;
use warp::filters::BoxedFilter;
use warp::reply::Response;

use typing_types::PerformanceMessageRequest;

use crate::AppState;
use crate::error::{ApiError, ApiResult, ok_json, respond};
use crate::filters::{json_body, with_state};

pub fn routes(state: &AppState) -> BoxedFilter<(Response,)> {
    warp::path!("api" / "ai" / "performance-message")
        .and(warp::post())
        .and(json_body::<PerformanceMessageRequest>())
        .and(with_state(state))
        .then(performance_message)
        .map(respond)
        .boxed()
}

async fn performance_message(
    body: Result<PerformanceMessageRequest, ApiError>,
    state: AppState,
) -> ApiResult {
    let body = body?;

    let nickname = body
        .nickname
        .as_deref()
        .map(str::trim)
        .filter(|nickname| !nickname.is_empty())
        .unwrap_or("Player");
    let wpm = body.wpm.filter(|wpm| wpm.is_finite()).unwrap_or(0.0);
    let accuracy = body
        .accuracy
        .filter(|accuracy| accuracy.is_finite())
        .unwrap_or(0.0);

    ok_json(
        &state
            .ai
            .performance_message(nickname, wpm, accuracy)
            .await,
    )
}
