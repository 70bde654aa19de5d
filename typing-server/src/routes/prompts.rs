use warp::Filter;
use warp::filters::BoxedFilter;
use warp::reply::Response;

use typing_persistence::{NewPrompt, PromptChanges, PromptDeletion};
use typing_types::{
    CreatePromptRequest, DEFAULT_CATEGORY, DEFAULT_DIFFICULTY, GeneratePromptRequest, MessageBody,
    RandomPromptQuery, UpdatePromptRequest,
};

use crate::AppState;
use crate::error::{ApiError, ApiResult, created_json, ok_json, respond};
use crate::filters::{json_body, parse_id, with_state};

pub fn routes(state: &AppState) -> BoxedFilter<(Response,)> {
    let random = warp::path!("api" / "prompts" / "random")
        .and(warp::get())
        .and(warp::query::<RandomPromptQuery>())
        .and(with_state(state))
        .then(random_prompt)
        .map(respond);

    let list = warp::path!("api" / "prompts")
        .and(warp::get())
        .and(with_state(state))
        .then(list_prompts)
        .map(respond);

    let create = warp::path!("api" / "prompts")
        .and(warp::post())
        .and(json_body::<CreatePromptRequest>())
        .and(with_state(state))
        .then(create_prompt)
        .map(respond);

    let generate = warp::path!("api" / "prompts" / "generate")
        .and(warp::post())
        .and(json_body::<GeneratePromptRequest>())
        .and(with_state(state))
        .then(generate_prompt)
        .map(respond);

    let update = warp::path!("api" / "prompts" / String)
        .and(warp::patch())
        .and(json_body::<UpdatePromptRequest>())
        .and(with_state(state))
        .then(update_prompt)
        .map(respond);

    let delete = warp::path!("api" / "prompts" / String)
        .and(warp::delete())
        .and(with_state(state))
        .then(delete_prompt)
        .map(respond);

    random
        .or(list)
        .unify()
        .or(create)
        .unify()
        .or(generate)
        .unify()
        .or(update)
        .unify()
        .or(delete)
        .unify()
        .boxed()
}

/// Trimmed value, or `None` when absent or blank.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

async fn random_prompt(query: RandomPromptQuery, state: AppState) -> ApiResult {
    let category = non_blank(query.category);
    let prompt = state
        .prompts
        .take_random(category.as_deref())
        .await?
        .ok_or_else(|| ApiError::not_found("No prompts available"))?;
    ok_json(&prompt)
}

async fn list_prompts(state: AppState) -> ApiResult {
    state.admin.check()?;
    ok_json(&state.prompts.list().await?)
}

async fn create_prompt(body: Result<CreatePromptRequest, ApiError>, state: AppState) -> ApiResult {
    state.admin.check()?;
    let body = body?;

    let text = non_blank(body.text).ok_or_else(|| ApiError::bad_request("Text is required"))?;
    let prompt = state
        .prompts
        .create(NewPrompt {
            text,
            category: non_blank(body.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            difficulty: non_blank(body.difficulty)
                .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string()),
            is_active: body.is_active.unwrap_or(true),
        })
        .await?;

    tracing::info!("Created prompt {} ({})", prompt.id, prompt.category);
    created_json(&prompt)
}

async fn update_prompt(
    id: String,
    body: Result<UpdatePromptRequest, ApiError>,
    state: AppState,
) -> ApiResult {
    state.admin.check()?;
    let id = parse_id(&id, "prompt")?;
    let body = body?;

    let text = match body.text {
        Some(text) => {
            Some(non_blank(Some(text)).ok_or_else(|| ApiError::bad_request("Text cannot be empty"))?)
        }
        None => None,
    };

    let prompt = state
        .prompts
        .update(
            id,
            PromptChanges {
                text,
                category: non_blank(body.category),
                difficulty: non_blank(body.difficulty),
                is_active: body.is_active,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Prompt not found"))?;

    ok_json(&prompt)
}

async fn delete_prompt(id: String, state: AppState) -> ApiResult {
    state.admin.check()?;
    let id = parse_id(&id, "prompt")?;

    match state.prompts.delete(id).await? {
        PromptDeletion::Deleted => ok_json(&MessageBody {
            message: "Prompt deleted".to_string(),
        }),
        PromptDeletion::NotFound => Err(ApiError::not_found("Prompt not found")),
        PromptDeletion::InUse => Err(ApiError::Conflict(
            "Prompt has recorded scores; deactivate it instead".to_string(),
        )),
    }
}

async fn generate_prompt(
    body: Result<GeneratePromptRequest, ApiError>,
    state: AppState,
) -> ApiResult {
    state.admin.check()?;
    // An empty body just means "use the defaults"
    let body = match body {
        Ok(body) => body,
        Err(ApiError::BadRequest(message)) if message == "No data provided" => {
            GeneratePromptRequest {
                category: None,
                difficulty: None,
            }
        }
        Err(err) => return Err(err),
    };

    if !state.ai.is_enabled() {
        return Err(ApiError::Unavailable("AI service not configured".to_string()));
    }

    let category = non_blank(body.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let difficulty = non_blank(body.difficulty).unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string());

    match state.ai.generate_prompt(&category, &difficulty).await {
        Ok(generated) => ok_json(&generated),
        Err(err) => {
            tracing::warn!("Prompt generation failed: {}", err);
            Err(ApiError::Unavailable(format!(
                "AI prompt generation failed: {}",
                err
            )))
        }
    }
}
