use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_players_table::Players;
use crate::m20240101_000002_create_prompts_table::Prompts;
use crate::m20240101_000003_create_events_table::Events;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Scores::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Scores::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Scores::PlayerId).uuid().not_null())
                    .col(ColumnDef::new(Scores::PromptId).uuid().not_null())
                    .col(ColumnDef::new(Scores::EventId).uuid().null())
                    .col(ColumnDef::new(Scores::Wpm).double().not_null())
                    .col(ColumnDef::new(Scores::Accuracy).double().not_null())
                    .col(ColumnDef::new(Scores::Score).integer().not_null())
                    .col(
                        ColumnDef::new(Scores::StartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Scores::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scores_player")
                            .from(Scores::Table, Scores::PlayerId)
                            .to(Players::Table, Players::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scores_prompt")
                            .from(Scores::Table, Scores::PromptId)
                            .to(Prompts::Table, Prompts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scores_event")
                            .from(Scores::Table, Scores::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Leaderboard scans order by score within a time window
        manager
            .create_index(
                Index::create()
                    .name("idx_scores_score")
                    .table(Scores::Table)
                    .col(Scores::Score)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scores_created_at")
                    .table(Scores::Table)
                    .col(Scores::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scores_player_id")
                    .table(Scores::Table)
                    .col(Scores::PlayerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Scores::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Scores {
    Table,
    Id,
    PlayerId,
    PromptId,
    EventId,
    Wpm,
    Accuracy,
    Score,
    StartedAt,
    CreatedAt,
}
