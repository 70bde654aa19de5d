use std::sync::Arc;

use sea_orm::DatabaseConnection;
use warp::Filter;

use typing_core::EmailClassifier;
use typing_persistence::{EventRepository, PlayerRepository, PromptRepository, ScoreRepository};

use crate::admin::AdminGate;
use crate::ai::AiService;

pub mod admin;
pub mod ai;
pub mod config;
pub mod error;
pub mod filters;
pub mod routes;
pub mod static_files;

/// Everything a handler may touch; cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub players: Arc<PlayerRepository>,
    pub prompts: Arc<PromptRepository>,
    pub scores: Arc<ScoreRepository>,
    pub events: Arc<EventRepository>,
    pub admin: AdminGate,
    pub ai: Arc<AiService>,
    pub classifier: Arc<EmailClassifier>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        admin: AdminGate,
        ai: AiService,
        classifier: EmailClassifier,
    ) -> Self {
        Self {
            players: Arc::new(PlayerRepository::new(db.clone())),
            prompts: Arc::new(PromptRepository::new(db.clone())),
            scores: Arc::new(ScoreRepository::new(db.clone())),
            events: Arc::new(EventRepository::new(db.clone())),
            db,
            admin,
            ai: Arc::new(ai),
            classifier: Arc::new(classifier),
        }
    }
}

pub fn create_routes(
    state: AppState,
    static_dir: String,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "PATCH", "DELETE"]);

    routes::api(&state)
        .or(static_files::routes(&static_dir))
        .unify()
        .recover(filters::handle_rejection)
        .unify()
        .with(cors)
        .with(warp::log("typing_master"))
}
