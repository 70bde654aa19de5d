use anyhow::Result;
use sea_orm::{
    sea_query::{Expr, Order},
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use typing_types::Prompt;
use uuid::Uuid;

use crate::entities::{prelude::*, prompts, scores};

/// A validated prompt ready to be stored.
#[derive(Debug, Clone)]
pub struct NewPrompt {
    pub text: String,
    pub category: String,
    pub difficulty: String,
    pub is_active: bool,
}

/// Field-by-field changes; `None` leaves the column alone.
#[derive(Debug, Clone, Default)]
pub struct PromptChanges {
    pub text: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptDeletion {
    Deleted,
    NotFound,
    /// Scores still point at the prompt.
    InUse,
}

#[derive(Clone)]
pub struct PromptRepository {
    db: DatabaseConnection,
}

impl PromptRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_prompt(model: prompts::Model) -> Prompt {
        Prompt {
            id: model.id,
            text: model.text,
            category: model.category,
            difficulty: model.difficulty,
            is_active: model.is_active,
            times_used: model.times_used,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Prompt>> {
        let model = Prompts::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Self::model_to_prompt))
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool> {
        let count = Prompts::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    pub async fn exists_with_text(&self, text: &str) -> Result<bool> {
        let count = Prompts::find()
            .filter(prompts::Column::Text.eq(text))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Prompts::find().count(&self.db).await?)
    }

    /// Picks a random active prompt and bumps its usage counter.
    pub async fn take_random(&self, category: Option<&str>) -> Result<Option<Prompt>> {
        let txn = self.db.begin().await?;

        let mut query = Prompts::find().filter(prompts::Column::IsActive.eq(true));
        if let Some(category) = category {
            query = query.filter(prompts::Column::Category.eq(category));
        }

        let Some(model) = query
            .order_by(Expr::cust("RANDOM()"), Order::Asc)
            .one(&txn)
            .await?
        else {
            txn.commit().await?;
            return Ok(None);
        };

        let bumped = prompts::ActiveModel {
            id: ActiveValue::Unchanged(model.id),
            times_used: ActiveValue::Set(model.times_used + 1),
            ..Default::default()
        };
        let updated = Prompts::update(bumped).exec(&txn).await?;
        txn.commit().await?;

        Ok(Some(Self::model_to_prompt(updated)))
    }

    pub async fn list(&self) -> Result<Vec<Prompt>> {
        let models = Prompts::find()
            .order_by_desc(prompts::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Self::model_to_prompt).collect())
    }

    pub async fn create(&self, prompt: NewPrompt) -> Result<Prompt> {
        let id = Uuid::new_v4();
        let model = prompts::ActiveModel {
            id: ActiveValue::Set(id),
            text: ActiveValue::Set(prompt.text),
            category: ActiveValue::Set(prompt.category),
            difficulty: ActiveValue::Set(prompt.difficulty),
            is_active: ActiveValue::Set(prompt.is_active),
            times_used: ActiveValue::Set(0),
            created_at: ActiveValue::Set(chrono::Utc::now().into()),
        };
        Prompts::insert(model).exec(&self.db).await?;

        let created = Prompts::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created prompt"))?;

        Ok(Self::model_to_prompt(created))
    }

    pub async fn update(&self, id: Uuid, changes: PromptChanges) -> Result<Option<Prompt>> {
        let Some(existing) = Prompts::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: prompts::ActiveModel = existing.into();
        if let Some(text) = changes.text {
            model.text = ActiveValue::Set(text);
        }
        if let Some(category) = changes.category {
            model.category = ActiveValue::Set(category);
        }
        if let Some(difficulty) = changes.difficulty {
            model.difficulty = ActiveValue::Set(difficulty);
        }
        if let Some(is_active) = changes.is_active {
            model.is_active = ActiveValue::Set(is_active);
        }

        let updated = Prompts::update(model).exec(&self.db).await?;
        Ok(Some(Self::model_to_prompt(updated)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<PromptDeletion> {
        if !self.exists(id).await? {
            return Ok(PromptDeletion::NotFound);
        }

        let references = Scores::find()
            .filter(scores::Column::PromptId.eq(id))
            .count(&self.db)
            .await?;
        if references > 0 {
            return Ok(PromptDeletion::InUse);
        }

        Prompts::delete_by_id(id).exec(&self.db).await?;
        tracing::info!("Deleted prompt {}", id);
        Ok(PromptDeletion::Deleted)
    }
}
