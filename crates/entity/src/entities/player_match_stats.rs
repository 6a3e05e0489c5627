use sea_orm::entity::prelude::*;

/// The stats of a player during a match.
///
/// Every counter is kept greater than or equal to 0.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "player_match_stats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The participation these stats belong to.
    #[sea_orm(unique)]
    pub participation_id: i32,
    pub points: i32,
    pub assists: i32,
    pub rebounds: i32,
    pub fouls: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::player_match_participations::Entity",
        from = "Column::ParticipationId",
        to = "super::player_match_participations::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    PlayerMatchParticipations,
}

impl Related<super::player_match_participations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerMatchParticipations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
