use anyhow::Result;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use typing_core::{RankedScore, ScoreFigures};
use typing_types::Score;
use uuid::Uuid;

use crate::entities::{players, prelude::*, scores};
use crate::repositories::PlayerRepository;

/// A validated result ready to be stored; `score` is already computed.
#[derive(Debug, Clone)]
pub struct NewScore {
    pub player_id: Uuid,
    pub prompt_id: Uuid,
    pub event_id: Option<Uuid>,
    pub wpm: f64,
    pub accuracy: f64,
    pub score: i32,
    pub started_at: Option<DateTime<FixedOffset>>,
}

#[derive(Clone)]
pub struct ScoreRepository {
    db: DatabaseConnection,
}

impl ScoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_score(model: scores::Model, player: Option<players::Model>) -> Score {
        Score {
            id: model.id,
            player_id: model.player_id,
            prompt_id: model.prompt_id,
            event_id: model.event_id,
            wpm: model.wpm,
            accuracy: model.accuracy,
            score: model.score,
            started_at: model.started_at.map(|started| started.to_rfc3339()),
            created_at: model.created_at.to_rfc3339(),
            player: player.map(PlayerRepository::model_to_player),
        }
    }

    pub async fn create(&self, score: NewScore) -> Result<Score> {
        let id = Uuid::new_v4();
        let model = scores::ActiveModel {
            id: ActiveValue::Set(id),
            player_id: ActiveValue::Set(score.player_id),
            prompt_id: ActiveValue::Set(score.prompt_id),
            event_id: ActiveValue::Set(score.event_id),
            wpm: ActiveValue::Set(score.wpm),
            accuracy: ActiveValue::Set(score.accuracy),
            score: ActiveValue::Set(score.score),
            started_at: ActiveValue::Set(score.started_at),
            created_at: ActiveValue::Set(Utc::now().into()),
        };
        Scores::insert(model).exec(&self.db).await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created score"))
    }

    /// The score with its player embedded.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Score>> {
        let found = Scores::find_by_id(id)
            .find_also_related(Players)
            .one(&self.db)
            .await?;

        Ok(found.map(|(score, player)| Self::model_to_score(score, player)))
    }

    pub async fn list_for_player(&self, player_id: Uuid) -> Result<Vec<Score>> {
        let models = Scores::find()
            .filter(scores::Column::PlayerId.eq(player_id))
            .order_by_desc(scores::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(|model| Self::model_to_score(model, None))
            .collect())
    }

    /// Scores of visible players, optionally limited to one event and to
    /// results recorded at or after `since`.
    pub async fn ranked_scores(
        &self,
        since: Option<DateTime<Utc>>,
        event_id: Option<Uuid>,
    ) -> Result<Vec<RankedScore>> {
        let mut query = Scores::find()
            .find_also_related(Players)
            .filter(players::Column::IsHidden.eq(false));
        if let Some(since) = since {
            let since: DateTime<FixedOffset> = since.into();
            query = query.filter(scores::Column::CreatedAt.gte(since));
        }
        if let Some(event_id) = event_id {
            query = query.filter(scores::Column::EventId.eq(event_id));
        }

        let rows = query.all(&self.db).await?;

        Ok(rows
            .into_iter()
            .filter_map(|(score, player)| {
                let player = player?;
                Some(RankedScore {
                    player_id: score.player_id,
                    nickname: player.nickname,
                    wpm: score.wpm,
                    accuracy: score.accuracy,
                    score: score.score,
                    created_at: score.created_at.with_timezone(&Utc),
                })
            })
            .collect())
    }

    pub async fn all_figures(&self) -> Result<Vec<ScoreFigures>> {
        let models = Scores::find().all(&self.db).await?;

        Ok(models
            .into_iter()
            .map(|model| ScoreFigures {
                player_id: model.player_id,
                wpm: model.wpm,
                accuracy: model.accuracy,
                score: model.score,
            })
            .collect())
    }
}
