use entity::{
    matches, player_match_participations, player_match_stats, player_season_details,
    player_total_stats, players, season_stats, seasons, teams, users,
};
use sea_orm::EntityTrait;
use sea_orm_migration::{prelude::*, sea_orm::Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_database_backend();
        let schema = Schema::new(db);

        create_entity_table(manager, &schema, users::Entity).await?;
        create_entity_table(manager, &schema, players::Entity).await?;
        create_entity_table(manager, &schema, seasons::Entity).await?;
        create_entity_table(manager, &schema, teams::Entity).await?;
        create_entity_table(manager, &schema, player_season_details::Entity).await?;

        create_entity_table(manager, &schema, matches::Entity).await?;
        create_entity_table(manager, &schema, player_match_participations::Entity).await?;
        create_entity_table(manager, &schema, player_match_stats::Entity).await?;

        create_entity_table(manager, &schema, season_stats::Entity).await?;
        create_entity_table(manager, &schema, player_total_stats::Entity).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_database_backend();
        let schema = Schema::new(db);

        drop_entity_table(manager, &schema, player_total_stats::Entity).await?;
        drop_entity_table(manager, &schema, season_stats::Entity).await?;

        drop_entity_table(manager, &schema, player_match_stats::Entity).await?;
        drop_entity_table(manager, &schema, player_match_participations::Entity).await?;
        drop_entity_table(manager, &schema, matches::Entity).await?;

        drop_entity_table(manager, &schema, player_season_details::Entity).await?;
        drop_entity_table(manager, &schema, teams::Entity).await?;
        drop_entity_table(manager, &schema, seasons::Entity).await?;
        drop_entity_table(manager, &schema, players::Entity).await?;
        drop_entity_table(manager, &schema, users::Entity).await?;

        Ok(())
    }
}

async fn create_entity_table<'a, E: EntityTrait>(
    manager: &'a SchemaManager<'a>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .create_table(schema.create_table_from_entity(entity))
        .await
}

async fn drop_entity_table<'a, E: EntityTrait>(
    manager: &'a SchemaManager<'a>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    let Some(table) = schema
        .create_table_from_entity(entity)
        .get_table_name()
        .cloned()
    else {
        return Err(DbErr::Custom("entity without table name".to_owned()));
    };

    manager.drop_table(Table::drop().table(table).take()).await
}
