use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "alliance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub match_key: String,
    pub is_blue: bool,
    pub score: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event_match::Entity",
        from = "Column::MatchKey",
        to = "super::event_match::Column::Key",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    EventMatch,
    #[sea_orm(has_many = "super::alliance_team::Entity")]
    AllianceTeam,
    #[sea_orm(has_many = "super::report::Entity")]
    Report,
}

impl Related<super::event_match::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventMatch.def()
    }
}

impl Related<super::alliance_team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AllianceTeam.def()
    }
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Report.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
