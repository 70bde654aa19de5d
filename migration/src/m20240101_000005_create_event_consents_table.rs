use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_players_table::Players;
use crate::m20240101_000003_create_events_table::Events;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventConsents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventConsents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EventConsents::EventId).uuid().not_null())
                    .col(ColumnDef::new(EventConsents::PlayerId).uuid().not_null())
                    .col(ColumnDef::new(EventConsents::Consented).boolean().null())
                    .col(ColumnDef::new(EventConsents::ConsentText).text().null())
                    .col(ColumnDef::new(EventConsents::IpAddress).string_len(45).null())
                    .col(
                        ColumnDef::new(EventConsents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(EventConsents::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_consents_event")
                            .from(EventConsents::Table, EventConsents::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_consents_player")
                            .from(EventConsents::Table, EventConsents::PlayerId)
                            .to(Players::Table, Players::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One answer per player per event; later answers overwrite
        manager
            .create_index(
                Index::create()
                    .name("uq_event_consents_event_player")
                    .table(EventConsents::Table)
                    .col(EventConsents::EventId)
                    .col(EventConsents::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventConsents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EventConsents {
    Table,
    Id,
    EventId,
    PlayerId,
    Consented,
    ConsentText,
    IpAddress,
    CreatedAt,
    UpdatedAt,
}
