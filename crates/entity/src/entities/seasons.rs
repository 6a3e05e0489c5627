use sea_orm::entity::prelude::*;

/// A season of the league.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "seasons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Whether this is the season currently being played.
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::matches::Entity")]
    Matches,
    #[sea_orm(has_many = "super::player_season_details::Entity")]
    PlayerSeasonDetails,
    #[sea_orm(has_many = "super::season_stats::Entity")]
    SeasonStats,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matches.def()
    }
}

impl Related<super::player_season_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerSeasonDetails.def()
    }
}

impl Related<super::season_stats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeasonStats.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
