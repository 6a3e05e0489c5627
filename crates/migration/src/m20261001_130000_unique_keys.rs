use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const SEASON_DETAILS_KEY: &str = "uk_player_season_details_player_season";
const PARTICIPATIONS_KEY: &str = "uk_player_match_participations_player_match";
const SEASON_STATS_KEY: &str = "uk_season_stats_player_season";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(SEASON_DETAILS_KEY)
                    .table(PlayerSeasonDetails::Table)
                    .col(PlayerSeasonDetails::PlayerId)
                    .col(PlayerSeasonDetails::SeasonId)
                    .unique()
                    .take(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(PARTICIPATIONS_KEY)
                    .table(PlayerMatchParticipations::Table)
                    .col(PlayerMatchParticipations::PlayerId)
                    .col(PlayerMatchParticipations::MatchId)
                    .unique()
                    .take(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(SEASON_STATS_KEY)
                    .table(SeasonStats::Table)
                    .col(SeasonStats::PlayerId)
                    .col(SeasonStats::SeasonId)
                    .unique()
                    .take(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(SEASON_STATS_KEY)
                    .table(SeasonStats::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(PARTICIPATIONS_KEY)
                    .table(PlayerMatchParticipations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(SEASON_DETAILS_KEY)
                    .table(PlayerSeasonDetails::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum PlayerSeasonDetails {
    Table,
    PlayerId,
    SeasonId,
}

#[derive(DeriveIden)]
enum PlayerMatchParticipations {
    Table,
    PlayerId,
    MatchId,
}

#[derive(DeriveIden)]
enum SeasonStats {
    Table,
    PlayerId,
    SeasonId,
}
