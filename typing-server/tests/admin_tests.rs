
use serde_json::json;
use test_helpers::*;
use typing_server::admin::AdminGate;
use typing_server::ai::AiService;
use warp::http::StatusCode;

#[tokio::test]
async fn test_admin_routes_require_gate() {
    let state = public_state().await;
    let prompt = create_prompt(&state, "Closed gate.", "general").await;
    let id = register_player(&state, "Ada", "ada@example.org").await;

    let responses = [
        get(&state, "/api/players").await,
        post(&state, &format!("/api/players/{}/hide", id), json!({})).await,
        get(&state, "/api/prompts").await,
        post(&state, "/api/prompts", json!({ "text": "New." })).await,
        patch(&state, &format!("/api/prompts/{}", prompt.id), json!({})).await,
        delete(&state, &format!("/api/prompts/{}", prompt.id)).await,
        post(&state, "/api/prompts/generate", json!({})).await,
        get(&state, "/api/events").await,
        post(&state, "/api/events", json!({ "slug": "a", "name": "A" })).await,
        get(&state, "/api/admin/stats").await,
        post(&state, "/api/admin/analyze-emails", json!({})).await,
    ];

    for response in responses {
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.error(), "Admin access required");
    }
}

#[tokio::test]
async fn test_list_hide_and_unhide_players() {
    let state = admin_state().await;
    let ada = register_player(&state, "Ada", "ada@example.org").await;
    register_player(&state, "Grace", "grace@example.org").await;

    let hidden = post(&state, &format!("/api/players/{}/hide", ada), json!({})).await;
    assert_eq!(hidden.status, StatusCode::OK);
    assert_eq!(hidden.body["is_hidden"], true);

    let visible = get(&state, "/api/players").await;
    let visible = visible.body.as_array().unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0]["nickname"], "Grace");

    let everyone = get(&state, "/api/players?include_hidden=true").await;
    let everyone = everyone.body.as_array().unwrap();
    assert_eq!(everyone.len(), 2);
    // newest first
    assert_eq!(everyone[0]["nickname"], "Grace");

    let shown = post(&state, &format!("/api/players/{}/unhide", ada), json!({})).await;
    assert_eq!(shown.body["is_hidden"], false);

    let missing = post(
        &state,
        &format!("/api/players/{}/hide", uuid::Uuid::new_v4()),
        json!({}),
    )
    .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_prompt_crud() {
    let state = admin_state().await;

    let created = post(&state, "/api/prompts", json!({ "text": "  Ship daily.  " })).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["text"], "Ship daily.");
    assert_eq!(created.body["category"], "general");
    assert_eq!(created.body["difficulty"], "medium");
    assert_eq!(created.body["is_active"], true);
    let id = created.body["id"].as_str().unwrap().to_string();

    let missing_text = post(&state, "/api/prompts", json!({ "category": "general" })).await;
    assert_eq!(missing_text.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_text.error(), "Text is required");

    let updated = patch(
        &state,
        &format!("/api/prompts/{}", id),
        json!({ "difficulty": "hard", "is_active": false }),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["difficulty"], "hard");
    assert_eq!(updated.body["is_active"], false);
    assert_eq!(updated.body["text"], "Ship daily.");

    let emptied = patch(&state, &format!("/api/prompts/{}", id), json!({ "text": " " })).await;
    assert_eq!(emptied.status, StatusCode::BAD_REQUEST);

    let listed = get(&state, "/api/prompts").await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    let deleted = delete(&state, &format!("/api/prompts/{}", id)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Prompt deleted");

    let gone = delete(&state, &format!("/api/prompts/{}", id)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_prompt_with_scores_cannot_be_deleted() {
    let state = admin_state().await;
    let prompt = create_prompt(&state, "In use.", "general").await;
    let ada = register_player(&state, "Ada", "ada@example.org").await;
    submit_score(&state, &ada, &prompt.id.to_string(), 40.0, 0.9).await;

    let response = delete(&state, &format!("/api/prompts/{}", prompt.id)).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_generate_prompt() {
    let unavailable = admin_state().await;
    let response = post(&unavailable, "/api/prompts/generate", json!({})).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);

    let state = setup_state(
        AdminGate::open(),
        canned_ai("\"Managed databases handle backups. You focus on queries.\""),
    )
    .await;
    let generated = post(
        &state,
        "/api/prompts/generate",
        json!({ "category": "databases", "difficulty": "easy" }),
    )
    .await;
    assert_eq!(generated.status, StatusCode::OK);
    assert_eq!(
        generated.body["text"],
        "Managed databases handle backups. You focus on queries."
    );
    assert_eq!(generated.body["category"], "databases");
    assert_eq!(generated.body["ai_generated"], true);

    // Generated text is only a suggestion
    let listed = get(&state, "/api/prompts").await;
    assert!(listed.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_stats_aggregates_and_filters() {
    let state = admin_state().await;
    let prompt = create_prompt(&state, "Stats.", "general").await;
    let prompt_id = prompt.id.to_string();

    let staff = register_player(&state, "Sam", "sam@digitalocean.com").await;
    let guest = register_player(&state, "Gus", "gus@acme-corp.io").await;
    let hidden = register_player(&state, "Hal", "hal@acme-corp.io").await;
    register_player(&state, "Idle", "idle@gmail.com").await;

    submit_score(&state, &staff, &prompt_id, 40.0, 0.9).await; // 3600
    submit_score(&state, &staff, &prompt_id, 60.0, 1.0).await; // 6000
    submit_score(&state, &guest, &prompt_id, 30.0, 0.5).await; // 1500
    submit_score(&state, &hidden, &prompt_id, 99.0, 1.0).await;
    state
        .players
        .set_hidden(hidden.parse().unwrap(), true)
        .await
        .unwrap();

    let stats = get(&state, "/api/admin/stats").await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(stats.body["total_players"], 3);
    assert_eq!(stats.body["total_games"], 3);
    assert_eq!(stats.body["players_with_games"], 2);

    let top = &stats.body["players"][0];
    assert_eq!(top["nickname"], "Sam");
    assert_eq!(top["games_played"], 2);
    assert_eq!(top["best_score"], 6000);
    assert_eq!(top["avg_wpm"], 50.0);
    assert_eq!(top["avg_accuracy"], 95.0);

    let team_only = get(&state, "/api/admin/stats?team=only").await;
    assert_eq!(team_only.body["total_players"], 1);

    let outsiders = get(&state, "/api/admin/stats?team=exclude").await;
    assert_eq!(outsiders.body["total_players"], 2);

    let by_domain = get(&state, "/api/admin/stats?email=@ACME-corp.io").await;
    assert_eq!(by_domain.body["total_players"], 1);
    assert_eq!(by_domain.body["players"][0]["nickname"], "Gus");

    let bad_team = get(&state, "/api/admin/stats?team=maybe").await;
    assert_eq!(bad_team.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_emails() {
    let state = admin_state().await;
    register_player(&state, "Sam", "sam@digitalocean.com").await;
    register_player(&state, "Jane", "jane.doe@gmail.com").await;
    register_player(&state, "Test", "test123@acme.io").await;

    let first = post(&state, "/api/admin/analyze-emails", json!({})).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["analyzed"], 3);
    assert_eq!(first.body["updated"], 3);
    assert_eq!(first.body["results"]["sam@digitalocean.com"], "employee");
    assert_eq!(first.body["results"]["jane.doe@gmail.com"], "personal");
    assert_eq!(first.body["results"]["test123@acme.io"], "suspicious");

    let listed = get(&state, "/api/players").await;
    assert!(
        listed
            .body
            .as_array()
            .unwrap()
            .iter()
            .all(|player| !player["email_type"].is_null())
    );

    let second = post_raw(&state, "/api/admin/analyze-emails", "").await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["message"], "No emails to analyze");
    assert_eq!(second.body["analyzed"], 0);

    let redo = post(&state, "/api/admin/analyze-emails", json!({ "reanalyze": true })).await;
    assert_eq!(redo.body["analyzed"], 3);
    assert_eq!(redo.body["updated"], 0);
}

#[tokio::test]
async fn test_disabled_ai_state_still_serves_admin() {
    let state = setup_state(AdminGate::open(), AiService::disabled()).await;
    let response = get(&state, "/api/events").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.as_array().unwrap().is_empty());
}
