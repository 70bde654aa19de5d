pub mod event_repository;
pub mod player_repository;
pub mod prompt_repository;
pub mod score_repository;

pub use event_repository::{ConsentRecord, EventRepository};
pub use player_repository::{PlayerRepository, Registration};
pub use prompt_repository::{NewPrompt, PromptChanges, PromptDeletion, PromptRepository};
pub use score_repository::{NewScore, ScoreRepository};

#[cfg(test)]
pub(crate) mod test_support {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::DatabaseConnection;

    use crate::connection::connect_to_memory_database;

    pub async fn setup_test_db() -> DatabaseConnection {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }
}
