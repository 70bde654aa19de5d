
use serde_json::json;
use test_helpers::*;
use warp::http::StatusCode;

#[tokio::test]
async fn test_register_new_and_returning_player() {
    let state = public_state().await;

    let created = post(
        &state,
        "/api/players",
        json!({ "nickname": "  Ada ", "email": "  Ada@Example.ORG " }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["nickname"], "Ada");
    assert_eq!(created.body["email"], "ada@example.org");
    assert_eq!(created.body["is_hidden"], false);
    assert!(created.body["email_type"].is_null());

    let returning = post(
        &state,
        "/api/players",
        json!({ "nickname": "Countess", "email": "ADA@example.org" }),
    )
    .await;
    assert_eq!(returning.status, StatusCode::OK);
    assert_eq!(returning.body["id"], created.body["id"]);
    assert_eq!(returning.body["nickname"], "Ada");
}

#[tokio::test]
async fn test_register_validation() {
    let state = public_state().await;

    let missing = post(&state, "/api/players", json!({ "nickname": "Ada" })).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.error(), "Nickname and email are required");

    let blank = post(
        &state,
        "/api/players",
        json!({ "nickname": "   ", "email": "ada@example.org" }),
    )
    .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let long = post(
        &state,
        "/api/players",
        json!({ "nickname": "x".repeat(51), "email": "ada@example.org" }),
    )
    .await;
    assert_eq!(long.status, StatusCode::BAD_REQUEST);
    assert_eq!(long.error(), "Nickname must be 50 characters or less");

    let long_email = post(
        &state,
        "/api/players",
        json!({ "nickname": "Ada", "email": format!("{}@example.org", "a".repeat(250)) }),
    )
    .await;
    assert_eq!(long_email.status, StatusCode::BAD_REQUEST);

    let empty = post_raw(&state, "/api/players", "").await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.error(), "No data provided");

    let garbled = post_raw(&state, "/api/players", "{nickname:").await;
    assert_eq!(garbled.status, StatusCode::BAD_REQUEST);
    assert!(garbled.error().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let state = public_state().await;
    let nickname = "a".repeat(20 * 1024);
    let body = format!(r#"{{"nickname":"{}","email":"ada@example.org"}}"#, nickname);

    let response = post_raw(&state, "/api/players", &body).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.error(), "Request body too large");

    let players = state.players.list(true).await.unwrap();
    assert!(players.is_empty());
}

#[tokio::test]
async fn test_get_player() {
    let state = public_state().await;
    let id = register_player(&state, "Ada", "ada@example.org").await;

    let found = get(&state, &format!("/api/players/{}", id)).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["nickname"], "Ada");

    let malformed = get(&state, "/api/players/not-a-uuid").await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.error(), "Invalid player ID");

    let missing = get(&state, &format!("/api/players/{}", uuid::Uuid::new_v4())).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error(), "Player not found");
}

#[tokio::test]
async fn test_random_prompt() {
    let state = public_state().await;

    let none = get(&state, "/api/prompts/random").await;
    assert_eq!(none.status, StatusCode::NOT_FOUND);

    let prompt = create_prompt(&state, "Droplets boot in seconds.", "droplets").await;

    let picked = get(&state, "/api/prompts/random").await;
    assert_eq!(picked.status, StatusCode::OK);
    assert_eq!(picked.body["id"], prompt.id.to_string());
    assert_eq!(picked.body["times_used"], 1);

    let in_category = get(&state, "/api/prompts/random?category=droplets").await;
    assert_eq!(in_category.status, StatusCode::OK);
    assert_eq!(in_category.body["times_used"], 2);

    let other_category = get(&state, "/api/prompts/random?category=spaces").await;
    assert_eq!(other_category.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submit_score() {
    let state = public_state().await;
    let player_id = register_player(&state, "Ada", "ada@example.org").await;
    let prompt = create_prompt(&state, "Kubernetes schedules pods.", "kubernetes").await;

    let response = post(
        &state,
        "/api/scores",
        json!({
            "player_id": player_id,
            "prompt_id": prompt.id,
            "wpm": 72.0,
            "accuracy": 0.9731,
            "started_at": "2026-03-01T09:59:30Z",
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["score"], 7006);
    assert_eq!(response.body["player"]["nickname"], "Ada");
    assert!(response.body["event_id"].is_null());
    assert!(
        response.body["started_at"]
            .as_str()
            .unwrap()
            .starts_with("2026-03-01T09:59:30")
    );

    let score_id = response.body["id"].as_str().unwrap();
    let fetched = get(&state, &format!("/api/scores/{}", score_id)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["player"]["id"], player_id.as_str());

    let history = get(&state, &format!("/api/scores/player/{}", player_id)).await;
    assert_eq!(history.status, StatusCode::OK);
    assert_eq!(history.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_submit_score_required_fields_in_order() {
    let state = public_state().await;

    let cases = [
        (json!({}), "player_id is required"),
        (json!({ "player_id": "x" }), "prompt_id is required"),
        (json!({ "player_id": "x", "prompt_id": "y" }), "wpm is required"),
        (
            json!({ "player_id": "x", "prompt_id": "y", "wpm": 50 }),
            "accuracy is required",
        ),
    ];

    for (body, expected) in cases {
        let response = post(&state, "/api/scores", body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error(), expected);
    }
}

#[tokio::test]
async fn test_submit_score_rejects_bad_input() {
    let state = public_state().await;
    let player_id = register_player(&state, "Ada", "ada@example.org").await;
    let prompt = create_prompt(&state, "Spaces serves files.", "spaces").await;
    let prompt_id = prompt.id.to_string();

    let negative = submit_score(&state, &player_id, &prompt_id, -1.0, 0.9).await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);

    let too_accurate = submit_score(&state, &player_id, &prompt_id, 50.0, 1.5).await;
    assert_eq!(too_accurate.status, StatusCode::BAD_REQUEST);
    assert_eq!(too_accurate.error(), "accuracy must be between 0 and 1");

    let too_fast = submit_score(&state, &player_id, &prompt_id, 1e9, 1.0).await;
    assert_eq!(too_fast.status, StatusCode::BAD_REQUEST);
    assert_eq!(too_fast.error(), "wpm is too large to score");

    let unknown_player =
        submit_score(&state, &uuid::Uuid::new_v4().to_string(), &prompt_id, 50.0, 0.9).await;
    assert_eq!(unknown_player.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown_player.error(), "Player not found");

    let unknown_prompt =
        submit_score(&state, &player_id, &uuid::Uuid::new_v4().to_string(), 50.0, 0.9).await;
    assert_eq!(unknown_prompt.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown_prompt.error(), "Prompt not found");

    let unknown_event = post(
        &state,
        "/api/scores",
        json!({
            "player_id": player_id,
            "prompt_id": prompt_id,
            "event_id": uuid::Uuid::new_v4(),
            "wpm": 50.0,
            "accuracy": 0.9,
        }),
    )
    .await;
    assert_eq!(unknown_event.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown_event.error(), "Event not found");
}

#[tokio::test]
async fn test_unparseable_started_at_is_ignored() {
    let state = public_state().await;
    let player_id = register_player(&state, "Ada", "ada@example.org").await;
    let prompt = create_prompt(&state, "Git tracks history.", "general").await;

    let response = post(
        &state,
        "/api/scores",
        json!({
            "player_id": player_id,
            "prompt_id": prompt.id,
            "wpm": 40.0,
            "accuracy": 1.0,
            "started_at": "yesterday-ish",
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["started_at"].is_null());
}

#[tokio::test]
async fn test_started_at_without_offset_is_utc() {
    let state = public_state().await;
    let player_id = register_player(&state, "Ada", "ada@example.org").await;
    let prompt = create_prompt(&state, "Droplets boot fast.", "general").await;

    let response = post(
        &state,
        "/api/scores",
        json!({
            "player_id": player_id,
            "prompt_id": prompt.id,
            "wpm": 40.0,
            "accuracy": 1.0,
            "started_at": "2026-03-01T10:00:00",
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let started_at = response.body["started_at"].as_str().unwrap();
    assert!(started_at.starts_with("2026-03-01T10:00:00"), "{}", started_at);
}

#[tokio::test]
async fn test_player_scores_for_unknown_player() {
    let state = public_state().await;
    let response = get(
        &state,
        &format!("/api/scores/player/{}", uuid::Uuid::new_v4()),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
