use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use typing_types::{EmailClass, Player};
use uuid::Uuid;

use crate::entities::{players, prelude::*};

/// Outcome of a registration attempt.
#[derive(Debug, Clone)]
pub enum Registration {
    Created(Player),
    /// The email was already registered; the stored player is returned untouched.
    Existing(Player),
}

impl Registration {
    pub fn into_player(self) -> Player {
        match self {
            Registration::Created(player) | Registration::Existing(player) => player,
        }
    }
}

#[derive(Clone)]
pub struct PlayerRepository {
    db: DatabaseConnection,
}

impl PlayerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub(crate) fn model_to_player(model: players::Model) -> Player {
        Player {
            id: model.id,
            nickname: model.nickname,
            email: model.email,
            is_hidden: model.is_hidden,
            email_type: model.email_type.as_deref().and_then(EmailClass::parse),
            created_at: model.created_at.to_rfc3339(),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Player>> {
        let model = Players::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Self::model_to_player))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Player>> {
        let model = Players::find()
            .filter(players::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(Self::model_to_player))
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool> {
        let count = Players::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    /// Returns the player already holding `email`, or creates a new one.
    ///
    /// Callers pass the email already trimmed and lower-cased. Concurrent
    /// registrations of one email settle on the unique index: the loser gets
    /// the winner's row back.
    pub async fn register(&self, nickname: &str, email: &str) -> Result<Registration> {
        let id = Uuid::new_v4();
        let model = players::ActiveModel {
            id: ActiveValue::Set(id),
            nickname: ActiveValue::Set(nickname.to_string()),
            email: ActiveValue::Set(email.to_string()),
            is_hidden: ActiveValue::Set(false),
            email_type: ActiveValue::Set(None),
            created_at: ActiveValue::Set(chrono::Utc::now().into()),
        };
        let inserted = Players::insert(model)
            .on_conflict(
                OnConflict::column(players::Column::Email)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        if inserted == 0 {
            let existing = self
                .find_by_email(email)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Player {} vanished after conflict", email))?;
            return Ok(Registration::Existing(existing));
        }

        let created = Players::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created player"))?;

        tracing::info!("Registered player {} ({})", created.nickname, created.id);
        Ok(Registration::Created(Self::model_to_player(created)))
    }

    /// Players newest first; hidden ones only when asked for.
    pub async fn list(&self, include_hidden: bool) -> Result<Vec<Player>> {
        let mut query = Players::find();
        if !include_hidden {
            query = query.filter(players::Column::IsHidden.eq(false));
        }

        let models = query
            .order_by_desc(players::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Self::model_to_player).collect())
    }

    pub async fn set_hidden(&self, id: Uuid, hidden: bool) -> Result<Option<Player>> {
        let Some(player) = Players::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let updated = players::ActiveModel {
            id: ActiveValue::Unchanged(player.id),
            is_hidden: ActiveValue::Set(hidden),
            ..Default::default()
        };
        let model = Players::update(updated).exec(&self.db).await?;

        Ok(Some(Self::model_to_player(model)))
    }

    pub async fn set_email_type(&self, id: Uuid, email_type: EmailClass) -> Result<()> {
        let updated = players::ActiveModel {
            id: ActiveValue::Unchanged(id),
            email_type: ActiveValue::Set(Some(email_type.as_str().to_string())),
            ..Default::default()
        };
        Players::update(updated).exec(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::setup_test_db;

    async fn setup_repo() -> PlayerRepository {
        PlayerRepository::new(setup_test_db().await)
    }

    #[tokio::test]
    async fn test_register_and_find_player() {
        let repo = setup_repo().await;

        let registration = repo.register("Ada", "ada@example.org").await.unwrap();
        let created = match registration {
            Registration::Created(player) => player,
            Registration::Existing(_) => panic!("expected a new player"),
        };
        assert_eq!(created.nickname, "Ada");
        assert!(!created.is_hidden);
        assert!(created.email_type.is_none());

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.email, "ada@example.org");

        let by_email = repo.find_by_email("ada@example.org").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
        assert!(repo.exists(created.id).await.unwrap());
        assert!(!repo.exists(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_register_existing_email_returns_original() {
        let repo = setup_repo().await;

        let first = repo.register("Ada", "ada@example.org").await.unwrap().into_player();
        let second = repo.register("Someone Else", "ada@example.org").await.unwrap();

        match second {
            Registration::Existing(player) => {
                assert_eq!(player.id, first.id);
                assert_eq!(player.nickname, "Ada");
            }
            Registration::Created(_) => panic!("email should already be registered"),
        }
        assert_eq!(repo.list(true).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_registrations_share_one_row() {
        let repo = setup_repo().await;

        let (first, second) = tokio::join!(
            repo.register("Ada", "ada@example.org"),
            repo.register("Ada Again", "ada@example.org"),
        );
        let first = first.unwrap();
        let second = second.unwrap();

        let created = [&first, &second]
            .iter()
            .filter(|outcome| matches!(outcome, Registration::Created(_)))
            .count();
        assert_eq!(created, 1);
        assert_eq!(first.into_player().id, second.into_player().id);
        assert_eq!(repo.list(true).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_hide_and_list() {
        let repo = setup_repo().await;

        let ada = repo.register("Ada", "ada@example.org").await.unwrap().into_player();
        repo.register("Grace", "grace@example.org").await.unwrap();

        let hidden = repo.set_hidden(ada.id, true).await.unwrap().unwrap();
        assert!(hidden.is_hidden);
        assert_eq!(hidden.nickname, "Ada");

        let visible = repo.list(false).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].nickname, "Grace");
        assert_eq!(repo.list(true).await.unwrap().len(), 2);

        let shown = repo.set_hidden(ada.id, false).await.unwrap().unwrap();
        assert!(!shown.is_hidden);

        assert!(repo.set_hidden(Uuid::new_v4(), true).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_email_type() {
        let repo = setup_repo().await;

        let ada = repo.register("Ada", "ada@gmail.com").await.unwrap().into_player();
        repo.set_email_type(ada.id, EmailClass::Personal).await.unwrap();

        let found = repo.find_by_id(ada.id).await.unwrap().unwrap();
        assert_eq!(found.email_type, Some(EmailClass::Personal));
    }
}
