use warp::Filter;
use warp::filters::BoxedFilter;
use warp::reply::Response;

use typing_persistence::Registration;
use typing_types::{PlayerListQuery, RegisterPlayerRequest};

use crate::AppState;
use crate::error::{ApiError, ApiResult, created_json, ok_json, respond};
use crate::filters::{json_body, parse_id, with_state};

const MAX_NICKNAME_CHARS: usize = 50;
const MAX_EMAIL_CHARS: usize = 255;

pub fn routes(state: &AppState) -> BoxedFilter<(Response,)> {
    let register = warp::path!("api" / "players")
        .and(warp::post())
        .and(json_body::<RegisterPlayerRequest>())
        .and(with_state(state))
        .then(register_player)
        .map(respond);

    let list = warp::path!("api" / "players")
        .and(warp::get())
        .and(warp::query::<PlayerListQuery>())
        .and(with_state(state))
        .then(list_players)
        .map(respond);

    let get = warp::path!("api" / "players" / String)
        .and(warp::get())
        .and(with_state(state))
        .then(get_player)
        .map(respond);

    let hide = warp::path!("api" / "players" / String / "hide")
        .and(warp::post())
        .and(with_state(state))
        .then(|id: String, state: AppState| set_hidden(id, true, state))
        .map(respond);

    let unhide = warp::path!("api" / "players" / String / "unhide")
        .and(warp::post())
        .and(with_state(state))
        .then(|id: String, state: AppState| set_hidden(id, false, state))
        .map(respond);

    register
        .or(list)
        .unify()
        .or(get)
        .unify()
        .or(hide)
        .unify()
        .or(unhide)
        .unify()
        .boxed()
}

async fn register_player(
    body: Result<RegisterPlayerRequest, ApiError>,
    state: AppState,
) -> ApiResult {
    let body = body?;

    let nickname = body.nickname.as_deref().map(str::trim).unwrap_or_default();
    let email = body
        .email
        .as_deref()
        .map(|email| email.trim().to_lowercase())
        .unwrap_or_default();

    if nickname.is_empty() || email.is_empty() {
        return Err(ApiError::bad_request("Nickname and email are required"));
    }
    if nickname.chars().count() > MAX_NICKNAME_CHARS {
        return Err(ApiError::bad_request(format!(
            "Nickname must be {} characters or less",
            MAX_NICKNAME_CHARS
        )));
    }
    if email.chars().count() > MAX_EMAIL_CHARS {
        return Err(ApiError::bad_request(format!(
            "Email must be {} characters or less",
            MAX_EMAIL_CHARS
        )));
    }

    match state.players.register(nickname, &email).await? {
        Registration::Created(player) => created_json(&player),
        Registration::Existing(player) => ok_json(&player),
    }
}

async fn get_player(id: String, state: AppState) -> ApiResult {
    let id = parse_id(&id, "player")?;
    let player = state
        .players
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Player not found"))?;
    ok_json(&player)
}

async fn list_players(query: PlayerListQuery, state: AppState) -> ApiResult {
    state.admin.check()?;
    let players = state
        .players
        .list(query.include_hidden.unwrap_or(false))
        .await?;
    ok_json(&players)
}

async fn set_hidden(id: String, hidden: bool, state: AppState) -> ApiResult {
    state.admin.check()?;
    let id = parse_id(&id, "player")?;
    let player = state
        .players
        .set_hidden(id, hidden)
        .await?
        .ok_or_else(|| ApiError::not_found("Player not found"))?;

    tracing::info!(
        "Player {} ({}) is now {}",
        player.nickname,
        player.id,
        if hidden { "hidden" } else { "visible" }
    );
    ok_json(&player)
}
