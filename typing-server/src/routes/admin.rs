use std::collections::BTreeMap;

use warp::Filter;
use warp::filters::BoxedFilter;
use warp::reply::Response;

use typing_core::{EmailFilter, TeamFilter, summarize};
use typing_types::{AdminStatsQuery, AnalyzeEmailsRequest, AnalyzeEmailsResponse};

use crate::AppState;
use crate::error::{ApiError, ApiResult, ok_json, respond};
use crate::filters::{json_body, with_state};

pub fn routes(state: &AppState) -> BoxedFilter<(Response,)> {
    let stats = warp::path!("api" / "admin" / "stats")
        .and(warp::get())
        .and(warp::query::<AdminStatsQuery>())
        .and(with_state(state))
        .then(admin_stats)
        .map(respond);

    let analyze = warp::path!("api" / "admin" / "analyze-emails")
        .and(warp::post())
        .and(json_body::<AnalyzeEmailsRequest>())
        .and(with_state(state))
        .then(analyze_emails)
        .map(respond);

    stats.or(analyze).unify().boxed()
}

async fn admin_stats(query: AdminStatsQuery, state: AppState) -> ApiResult {
    state.admin.check()?;

    let team = TeamFilter::parse(query.team.as_deref())
        .ok_or_else(|| ApiError::bad_request("team must be one of: all, only, exclude"))?;
    let emails = EmailFilter::parse(query.email.as_deref().unwrap_or_default());

    let players = state
        .players
        .list(false)
        .await?
        .into_iter()
        .filter(|player| emails.admits(&player.email))
        .filter(|player| team.admits(&state.classifier, &player.email))
        .collect();
    let figures = state.scores.all_figures().await?;

    ok_json(&summarize(players, &figures))
}

async fn analyze_emails(body: Result<AnalyzeEmailsRequest, ApiError>, state: AppState) -> ApiResult {
    state.admin.check()?;
    // Analysis without options is the common case; tolerate a missing body
    let reanalyze = match body {
        Ok(body) => body.reanalyze.unwrap_or(false),
        Err(ApiError::BadRequest(message)) if message == "No data provided" => false,
        Err(err) => return Err(err),
    };

    let pending: Vec<_> = state
        .players
        .list(false)
        .await?
        .into_iter()
        .filter(|player| reanalyze || player.email_type.is_none())
        .collect();

    if pending.is_empty() {
        return ok_json(&AnalyzeEmailsResponse {
            message: "No emails to analyze".to_string(),
            analyzed: 0,
            updated: 0,
            results: BTreeMap::new(),
        });
    }

    let mut updated = 0;
    let mut results = BTreeMap::new();
    for player in &pending {
        let label = state.classifier.classify(&player.email);
        if player.email_type != Some(label) {
            state.players.set_email_type(player.id, label).await?;
            updated += 1;
        }
        results.insert(player.email.clone(), label);
    }

    tracing::info!(
        "Analyzed {} player emails, {} labels changed",
        pending.len(),
        updated
    );

    ok_json(&AnalyzeEmailsResponse {
        message: format!("Analyzed {} emails", pending.len()),
        analyzed: pending.len() as u32,
        updated,
        results,
    })
}
