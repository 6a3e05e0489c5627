use sea_orm::entity::prelude::*;

/// A team of the league.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::player_season_details::Entity")]
    PlayerSeasonDetails,
}

impl Related<super::player_season_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerSeasonDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
