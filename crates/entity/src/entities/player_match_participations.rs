use sea_orm::entity::prelude::*;

/// Links a player to a match they can play in.
///
/// There is at most one row per player and match.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "player_match_participations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(64))")]
    pub player_id: String,
    pub match_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::PlayerId",
        to = "super::players::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Players,
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Matches,
    #[sea_orm(has_one = "super::player_match_stats::Entity")]
    PlayerMatchStats,
}

impl Related<super::players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Players.def()
    }
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matches.def()
    }
}

impl Related<super::player_match_stats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerMatchStats.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
