//! The season and career stats of the players.
//!
//! These are sums of the match stats. The ledger keeps them up to date incrementally, in the
//! same transaction as the match counter, and [`recompute_all`] rebuilds them from scratch.

use std::collections::HashMap;

use entity::{
    matches, player_match_participations, player_match_stats, player_total_stats, season_stats,
};
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait as _, ConnectionTrait, EntityTrait as _, JoinType, QueryFilter as _,
    QuerySelect as _, RelationTrait as _, TransactionTrait,
    prelude::Expr,
    sea_query::OnConflict,
};

use crate::{
    error::LeagueResult,
    ledger::{Delta, StatName},
};

/// The four counters of a stats row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    /// The points scored.
    pub points: i32,
    /// The assists.
    pub assists: i32,
    /// The rebounds.
    pub rebounds: i32,
    /// The fouls committed.
    pub fouls: i32,
}

impl Counters {
    /// Returns counters at 0, except for the provided stat set to 1.
    fn single(stat: StatName) -> Self {
        let mut out = Self::default();
        match stat {
            StatName::Points => out.points = 1,
            StatName::Assists => out.assists = 1,
            StatName::Rebounds => out.rebounds = 1,
            StatName::Fouls => out.fouls = 1,
        }
        out
    }

    fn add(&mut self, other: Counters) {
        self.points += other.points;
        self.assists += other.assists;
        self.rebounds += other.rebounds;
        self.fouls += other.fouls;
    }
}

fn season_row(player_id: String, season_id: i32, c: Counters) -> season_stats::ActiveModel {
    season_stats::ActiveModel {
        id: NotSet,
        player_id: Set(player_id),
        season_id: Set(season_id),
        points: Set(c.points),
        assists: Set(c.assists),
        rebounds: Set(c.rebounds),
        fouls: Set(c.fouls),
    }
}

fn total_row(player_id: String, c: Counters) -> player_total_stats::ActiveModel {
    player_total_stats::ActiveModel {
        player_id: Set(player_id),
        points: Set(c.points),
        assists: Set(c.assists),
        rebounds: Set(c.rebounds),
        fouls: Set(c.fouls),
    }
}

/// Applies the change of a match counter to the season and career stats of the player.
///
/// On an increment, the rows are created if they don't exist yet.
pub async fn apply_delta<C: ConnectionTrait>(
    conn: &C,
    player_id: &str,
    season_id: i32,
    stat: StatName,
    delta: Delta,
) -> LeagueResult {
    match delta {
        Delta::Increment => {
            let col = stat.season_column();
            season_stats::Entity::insert(season_row(
                player_id.to_owned(),
                season_id,
                Counters::single(stat),
            ))
            .on_conflict(
                OnConflict::columns([
                    season_stats::Column::PlayerId,
                    season_stats::Column::SeasonId,
                ])
                .value(col, Expr::col((season_stats::Entity, col)).add(1))
                .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;

            let col = stat.total_column();
            player_total_stats::Entity::insert(total_row(
                player_id.to_owned(),
                Counters::single(stat),
            ))
            .on_conflict(
                OnConflict::column(player_total_stats::Column::PlayerId)
                    .value(col, Expr::col((player_total_stats::Entity, col)).add(1))
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
        }
        Delta::Decrement => {
            let col = stat.season_column();
            let season = season_stats::Entity::update_many()
                .col_expr(col, Expr::col(col).sub(1))
                .filter(season_stats::Column::PlayerId.eq(player_id))
                .filter(season_stats::Column::SeasonId.eq(season_id))
                .filter(col.gt(0))
                .exec(conn)
                .await?
                .rows_affected;

            let col = stat.total_column();
            let total = player_total_stats::Entity::update_many()
                .col_expr(col, Expr::col(col).sub(1))
                .filter(player_total_stats::Column::PlayerId.eq(player_id))
                .filter(col.gt(0))
                .exec(conn)
                .await?
                .rows_affected;

            if season == 0 || total == 0 {
                tracing::warn!(
                    "aggregates of player `{player_id}` out of sync on {stat} \
                    (season {season_id}), consider recomputing them"
                );
            }
        }
    }

    Ok(())
}

/// The result of [`recompute_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecomputeReport {
    /// The amount of season stats rows written.
    pub season_rows: usize,
    /// The amount of career stats rows written.
    pub total_rows: usize,
}

/// Rebuilds the season and career stats of every player from the match stats.
pub async fn recompute_all<C>(conn: &C) -> LeagueResult<RecomputeReport>
where
    C: ConnectionTrait + TransactionTrait,
{
    let lines = player_match_stats::Entity::find()
        .join(
            JoinType::InnerJoin,
            player_match_stats::Relation::PlayerMatchParticipations.def(),
        )
        .join(
            JoinType::InnerJoin,
            player_match_participations::Relation::Matches.def(),
        )
        .select_only()
        .column(player_match_participations::Column::PlayerId)
        .column(matches::Column::SeasonId)
        .column(player_match_stats::Column::Points)
        .column(player_match_stats::Column::Assists)
        .column(player_match_stats::Column::Rebounds)
        .column(player_match_stats::Column::Fouls)
        .into_tuple::<(String, i32, i32, i32, i32, i32)>()
        .all(conn)
        .await?;

    let mut by_season = HashMap::<(String, i32), Counters>::new();
    let mut by_player = HashMap::<String, Counters>::new();

    for (player_id, season_id, points, assists, rebounds, fouls) in lines {
        let c = Counters {
            points,
            assists,
            rebounds,
            fouls,
        };
        by_season
            .entry((player_id.clone(), season_id))
            .or_default()
            .add(c);
        by_player.entry(player_id).or_default().add(c);
    }

    let report = RecomputeReport {
        season_rows: by_season.len(),
        total_rows: by_player.len(),
    };

    let txn = conn.begin().await?;

    season_stats::Entity::delete_many().exec(&txn).await?;
    player_total_stats::Entity::delete_many().exec(&txn).await?;

    if !by_season.is_empty() {
        season_stats::Entity::insert_many(
            by_season
                .into_iter()
                .map(|((player_id, season_id), c)| season_row(player_id, season_id, c)),
        )
        .exec_without_returning(&txn)
        .await?;
    }

    if !by_player.is_empty() {
        player_total_stats::Entity::insert_many(
            by_player
                .into_iter()
                .map(|(player_id, c)| total_row(player_id, c)),
        )
        .exec_without_returning(&txn)
        .await?;
    }

    txn.commit().await?;

    tracing::info!(
        "Recomputed {} season stats rows and {} career stats rows",
        report.season_rows,
        report.total_rows
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::Counters;
    use crate::ledger::StatName;

    #[test]
    fn single_counter() {
        assert_eq!(
            Counters::single(StatName::Rebounds),
            Counters {
                rebounds: 1,
                ..Default::default()
            }
        );
    }
}
