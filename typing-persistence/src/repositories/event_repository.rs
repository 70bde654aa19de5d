use anyhow::Result;
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use typing_types::{Event, EventConsent};
use uuid::Uuid;

use crate::entities::{event_consents, events, prelude::*, scores};

/// A player's answer to an event's consent question.
#[derive(Debug, Clone)]
pub struct ConsentRecord {
    pub event_id: Uuid,
    pub player_id: Uuid,
    pub consented: Option<bool>,
    pub consent_text: Option<String>,
    pub ip_address: Option<String>,
}

#[derive(Clone)]
pub struct EventRepository {
    db: DatabaseConnection,
}

impl EventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_event(model: events::Model) -> Event {
        Event {
            id: model.id,
            slug: model.slug,
            name: model.name,
            is_active: model.is_active,
            config: model.config,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    fn model_to_consent(model: event_consents::Model) -> EventConsent {
        EventConsent {
            id: model.id,
            event_id: model.event_id,
            player_id: model.player_id,
            consented: model.consented,
            consent_text: model.consent_text,
            ip_address: model.ip_address,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let model = Events::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Self::model_to_event))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>> {
        let model = Events::find()
            .filter(events::Column::Slug.eq(slug))
            .one(&self.db)
            .await?;
        Ok(model.map(Self::model_to_event))
    }

    /// Public lookup; inactive events behave as if they did not exist.
    pub async fn find_active_by_slug(&self, slug: &str) -> Result<Option<Event>> {
        let model = Events::find()
            .filter(events::Column::Slug.eq(slug))
            .filter(events::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;
        Ok(model.map(Self::model_to_event))
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        let models = Events::find()
            .order_by_desc(events::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Self::model_to_event).collect())
    }

    pub async fn create(
        &self,
        slug: String,
        name: String,
        is_active: bool,
        config: serde_json::Value,
    ) -> Result<Event> {
        let id = Uuid::new_v4();
        let model = events::ActiveModel {
            id: ActiveValue::Set(id),
            slug: ActiveValue::Set(slug),
            name: ActiveValue::Set(name),
            is_active: ActiveValue::Set(is_active),
            config: ActiveValue::Set(config),
            created_at: ActiveValue::Set(chrono::Utc::now().into()),
        };
        Events::insert(model).exec(&self.db).await?;

        let created = Events::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created event"))?;

        tracing::info!("Created event {} ({})", created.slug, created.id);
        Ok(Self::model_to_event(created))
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        is_active: Option<bool>,
        config: Option<serde_json::Value>,
    ) -> Result<Option<Event>> {
        let Some(existing) = Events::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: events::ActiveModel = existing.into();
        if let Some(name) = name {
            model.name = ActiveValue::Set(name);
        }
        if let Some(is_active) = is_active {
            model.is_active = ActiveValue::Set(is_active);
        }
        if let Some(config) = config {
            model.config = ActiveValue::Set(config);
        }

        let updated = Events::update(model).exec(&self.db).await?;
        Ok(Some(Self::model_to_event(updated)))
    }

    /// Removes the event together with its consents. Scores survive with
    /// their event link cleared.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let txn = self.db.begin().await?;

        if Events::find_by_id(id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Ok(false);
        }

        EventConsents::delete_many()
            .filter(event_consents::Column::EventId.eq(id))
            .exec(&txn)
            .await?;

        Scores::update_many()
            .col_expr(scores::Column::EventId, Expr::value(Option::<Uuid>::None))
            .filter(scores::Column::EventId.eq(id))
            .exec(&txn)
            .await?;

        Events::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!("Deleted event {}", id);
        Ok(true)
    }

    /// Stores the answer, replacing any earlier one from the same player.
    pub async fn record_consent(&self, record: ConsentRecord) -> Result<EventConsent> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let model = event_consents::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            event_id: ActiveValue::Set(record.event_id),
            player_id: ActiveValue::Set(record.player_id),
            consented: ActiveValue::Set(record.consented),
            consent_text: ActiveValue::Set(record.consent_text),
            ip_address: ActiveValue::Set(record.ip_address),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };
        EventConsents::insert(model)
            .on_conflict(
                OnConflict::columns([
                    event_consents::Column::EventId,
                    event_consents::Column::PlayerId,
                ])
                .update_columns([
                    event_consents::Column::Consented,
                    event_consents::Column::ConsentText,
                    event_consents::Column::IpAddress,
                    event_consents::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        let saved = EventConsents::find()
            .filter(event_consents::Column::EventId.eq(record.event_id))
            .filter(event_consents::Column::PlayerId.eq(record.player_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve recorded consent"))?;

        Ok(Self::model_to_consent(saved))
    }

    pub async fn consents_for(&self, event_id: Uuid) -> Result<Vec<EventConsent>> {
        let models = EventConsents::find()
            .filter(event_consents::Column::EventId.eq(event_id))
            .order_by_desc(event_consents::Column::UpdatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Self::model_to_consent).collect())
    }
}
