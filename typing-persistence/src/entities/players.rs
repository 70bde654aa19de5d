use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nickname: String,
    #[sea_orm(unique)]
    pub email: String,
    pub is_hidden: bool,
    /// Classification label, unset until the admin analysis runs.
    pub email_type: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::scores::Entity")]
    Scores,
    #[sea_orm(has_many = "super::event_consents::Entity")]
    EventConsents,
}

impl Related<super::scores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scores.def()
    }
}

impl Related<super::event_consents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventConsents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
