use sea_orm::entity::prelude::*;

/// A player in the database.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "players")]
pub struct Model {
    /// The player ID.
    #[sea_orm(
        primary_key,
        auto_increment = false,
        column_type = "String(StringLen::N(64))"
    )]
    pub id: String,
    /// The ID of the identity owning this player.
    #[sea_orm(unique, column_type = "String(StringLen::N(64))")]
    pub user_id: String,
    /// The physical size of the player.
    pub size: String,
    /// The usual position of the player on the court.
    pub position: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Users,
    #[sea_orm(has_many = "super::player_season_details::Entity")]
    PlayerSeasonDetails,
    #[sea_orm(has_many = "super::player_match_participations::Entity")]
    PlayerMatchParticipations,
    #[sea_orm(has_many = "super::season_stats::Entity")]
    SeasonStats,
    #[sea_orm(has_one = "super::player_total_stats::Entity")]
    PlayerTotalStats,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::player_season_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerSeasonDetails.def()
    }
}

impl Related<super::player_match_participations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerMatchParticipations.def()
    }
}

impl Related<super::season_stats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeasonStats.def()
    }
}

impl Related<super::player_total_stats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerTotalStats.def()
    }
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        super::player_match_participations::Relation::Matches.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::player_match_participations::Relation::Players.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
