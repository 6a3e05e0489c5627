use sea_orm::entity::prelude::*;

use crate::types::MatchStatus;

/// A match between two teams during a season.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub season_id: i32,
    pub home_team_id: i32,
    pub away_team_id: i32,
    /// The lifecycle state of the match.
    pub status: MatchStatus,
    pub home_score: i32,
    pub away_score: i32,
    /// The winning team, once the match is completed.
    pub winner_id: Option<i32>,
    /// When the match is played.
    pub date: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seasons::Entity",
        from = "Column::SeasonId",
        to = "super::seasons::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Seasons,
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::HomeTeamId",
        to = "super::teams::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    HomeTeam,
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::AwayTeamId",
        to = "super::teams::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    AwayTeam,
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::WinnerId",
        to = "super::teams::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Winner,
    #[sea_orm(has_many = "super::player_match_participations::Entity")]
    PlayerMatchParticipations,
}

impl Related<super::seasons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seasons.def()
    }
}

impl Related<super::player_match_participations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerMatchParticipations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
