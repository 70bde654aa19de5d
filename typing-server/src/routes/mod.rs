use sea_orm::ConnectionTrait;
use serde_json::json;
use warp::Filter;
use warp::filters::BoxedFilter;
use warp::http::StatusCode;
use warp::reply::Response;

use crate::AppState;
use crate::error::json_response;
use crate::filters::with_state;

pub mod admin;
pub mod ai;
pub mod events;
pub mod leaderboard;
pub mod players;
pub mod prompts;
pub mod scores;

/// Every `/api` endpoint.
pub fn api(state: &AppState) -> BoxedFilter<(Response,)> {
    health(state)
        .or(players::routes(state))
        .unify()
        .or(prompts::routes(state))
        .unify()
        .or(scores::routes(state))
        .unify()
        .or(leaderboard::routes(state))
        .unify()
        .or(events::routes(state))
        .unify()
        .or(admin::routes(state))
        .unify()
        .or(ai::routes(state))
        .unify()
        .boxed()
}

fn health(state: &AppState) -> BoxedFilter<(Response,)> {
    warp::path!("api" / "health")
        .and(warp::get())
        .and(with_state(state))
        .then(check_health)
        .boxed()
}

async fn check_health(state: AppState) -> Response {
    match state.db.execute_unprepared("SELECT 1").await {
        Ok(_) => json_response(
            &json!({
                "status": "healthy",
                "message": "Typing Master API is running!",
                "database": "ok",
            }),
            StatusCode::OK,
        ),
        Err(err) => {
            tracing::error!("Health check database ping failed: {}", err);
            json_response(
                &json!({
                    "status": "degraded",
                    "message": "Database unavailable",
                    "database": "error",
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            )
        }
    }
}
