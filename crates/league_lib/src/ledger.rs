//! The live stat ledger of a match.
//!
//! While a match is `ONGOING`, the counters of each participating player can be incremented
//! or decremented by one. Every change is a single conditional `UPDATE` in the database, so
//! concurrent changes on the same counter are serialized by the database itself, and a change
//! racing with a status change of the match can't slip through.

use std::{collections::HashMap, fmt, str::FromStr};

use entity::{
    matches, player_match_participations, player_match_stats, player_total_stats, players,
    season_stats, types::MatchStatus, users,
};
use sea_orm::{
    ColumnTrait as _, ConnectionTrait, EntityTrait as _, QueryFilter as _, QuerySelect as _,
    TransactionTrait,
    prelude::Expr,
    sea_query::{Query, SelectStatement},
};
use serde::Serialize;

use crate::{
    aggregate,
    error::{LeagueError, LeagueResult},
    must,
};

/// The name of a counter of the stats of a player during a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatName {
    /// The points scored.
    Points,
    /// The assists.
    Assists,
    /// The rebounds.
    Rebounds,
    /// The fouls committed.
    Fouls,
}

impl StatName {
    /// All the stat names.
    pub const ALL: [StatName; 4] = [Self::Points, Self::Assists, Self::Rebounds, Self::Fouls];

    /// Returns the name of the stat, as sent by the clients.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Points => "points",
            Self::Assists => "assists",
            Self::Rebounds => "rebounds",
            Self::Fouls => "fouls",
        }
    }

    /// Returns the column of the match stats table holding this stat.
    pub const fn match_column(self) -> player_match_stats::Column {
        use player_match_stats::Column as C;
        match self {
            Self::Points => C::Points,
            Self::Assists => C::Assists,
            Self::Rebounds => C::Rebounds,
            Self::Fouls => C::Fouls,
        }
    }

    /// Returns the column of the season stats table holding this stat.
    pub const fn season_column(self) -> season_stats::Column {
        use season_stats::Column as C;
        match self {
            Self::Points => C::Points,
            Self::Assists => C::Assists,
            Self::Rebounds => C::Rebounds,
            Self::Fouls => C::Fouls,
        }
    }

    /// Returns the column of the career stats table holding this stat.
    pub const fn total_column(self) -> player_total_stats::Column {
        use player_total_stats::Column as C;
        match self {
            Self::Points => C::Points,
            Self::Assists => C::Assists,
            Self::Rebounds => C::Rebounds,
            Self::Fouls => C::Fouls,
        }
    }

    /// Returns the value of this stat in the provided stats row.
    pub const fn value_of(self, stats: &player_match_stats::Model) -> i32 {
        match self {
            Self::Points => stats.points,
            Self::Assists => stats.assists,
            Self::Rebounds => stats.rebounds,
            Self::Fouls => stats.fouls,
        }
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatName {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stat| stat.as_str() == s)
            .ok_or_else(|| {
                LeagueError::Validation(format!(
                    "unknown stat `{s}`, expected one of points, assists, rebounds, fouls"
                ))
            })
    }
}

/// The change applied to a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    /// +1
    Increment,
    /// -1
    Decrement,
}

impl Delta {
    /// Returns the signed value of the change.
    pub const fn value(self) -> i32 {
        match self {
            Self::Increment => 1,
            Self::Decrement => -1,
        }
    }
}

impl TryFrom<i32> for Delta {
    type Error = LeagueError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Increment),
            -1 => Ok(Self::Decrement),
            other => Err(LeagueError::Validation(format!(
                "delta must be 1 or -1, got {other}"
            ))),
        }
    }
}

/// Returns the query selecting the IDs of the participations of every ongoing match.
fn ongoing_participations() -> SelectStatement {
    Query::select()
        .column((
            player_match_participations::Entity,
            player_match_participations::Column::Id,
        ))
        .from(player_match_participations::Entity)
        .inner_join(
            matches::Entity,
            Expr::col((matches::Entity, matches::Column::Id)).equals((
                player_match_participations::Entity,
                player_match_participations::Column::MatchId,
            )),
        )
        .and_where(matches::Column::Status.eq(MatchStatus::Ongoing))
        .to_owned()
}

/// Increments or decrements a counter of the stats of a player during a match.
///
/// The match must be `ONGOING`, otherwise [`LeagueError::MatchNotOngoing`] is returned.
/// A decrement on a counter at 0 is rejected with [`LeagueError::StatFloor`] and the counter
/// is left untouched.
///
/// The season and career stats of the player are updated in the same transaction.
///
/// Returns the new value of the counter.
pub async fn adjust_stat<C>(
    conn: &C,
    stats_id: i32,
    stat: StatName,
    delta: Delta,
) -> LeagueResult<i32>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;

    let col = stat.match_column();
    let mut update = player_match_stats::Entity::update_many()
        .col_expr(col, Expr::col(col).add(delta.value()))
        .filter(player_match_stats::Column::Id.eq(stats_id))
        .filter(player_match_stats::Column::ParticipationId.in_subquery(ongoing_participations()));
    if delta == Delta::Decrement {
        update = update.filter(col.gt(0));
    }

    let updated = update.exec(&txn).await?.rows_affected;

    let ctx = must::have_stat_line(&txn, stats_id).await?;

    if updated == 0 {
        // Nothing changed, find out which condition failed. The transaction is rolled back
        // on drop.
        if ctx.r#match.status != MatchStatus::Ongoing {
            return Err(LeagueError::MatchNotOngoing(ctx.r#match.status));
        }
        return Err(LeagueError::StatFloor(stat));
    }

    aggregate::apply_delta(
        &txn,
        &ctx.participation.player_id,
        ctx.r#match.season_id,
        stat,
        delta,
    )
    .await?;

    txn.commit().await?;

    let value = stat.value_of(&ctx.stats);
    tracing::debug!(
        "{stat} of stats {stats_id} is now {value} (match {})",
        ctx.r#match.id
    );

    Ok(value)
}

/// The stats of a player during a match, as shown to the clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatLine {
    /// The ID of the stats row, used to adjust the counters.
    pub participation_stats_id: i32,
    /// The ID of the participation.
    pub participation_id: i32,
    /// The ID of the player.
    pub player_id: String,
    /// The name of the player.
    pub player_name: String,
    /// The points scored.
    pub points: i32,
    /// The assists.
    pub assists: i32,
    /// The rebounds.
    pub rebounds: i32,
    /// The fouls committed.
    pub fouls: i32,
}

/// Returns the stats of every player participating in the provided match, sorted by name.
pub async fn match_stat_lines<C: ConnectionTrait>(
    conn: &C,
    match_id: i32,
) -> LeagueResult<Vec<StatLine>> {
    must::have_match(conn, match_id).await?;

    let participations = player_match_participations::Entity::find()
        .filter(player_match_participations::Column::MatchId.eq(match_id))
        .find_also_related(player_match_stats::Entity)
        .all(conn)
        .await?;

    let player_ids = participations
        .iter()
        .map(|(p, _)| p.player_id.clone())
        .collect::<Vec<_>>();

    let names: HashMap<String, String> = players::Entity::find()
        .filter(players::Column::Id.is_in(player_ids))
        .inner_join(users::Entity)
        .select_only()
        .column(players::Column::Id)
        .column(users::Column::Name)
        .into_tuple::<(String, String)>()
        .all(conn)
        .await?
        .into_iter()
        .collect();

    let mut lines = participations
        .into_iter()
        .filter_map(|(participation, stats)| {
            let stats = stats?;
            Some(StatLine {
                participation_stats_id: stats.id,
                participation_id: participation.id,
                player_name: names
                    .get(&participation.player_id)
                    .cloned()
                    .unwrap_or_default(),
                player_id: participation.player_id,
                points: stats.points,
                assists: stats.assists,
                rebounds: stats.rebounds,
                fouls: stats.fouls,
            })
        })
        .collect::<Vec<_>>();

    lines.sort_by(|a, b| a.player_name.cmp(&b.player_name));

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::{Delta, StatName};
    use crate::error::LeagueError;

    #[test]
    fn parse_stat_name() {
        assert_eq!("points".parse::<StatName>().unwrap(), StatName::Points);
        assert_eq!("fouls".parse::<StatName>().unwrap(), StatName::Fouls);
        assert!(matches!(
            "steals".parse::<StatName>(),
            Err(LeagueError::Validation(_))
        ));
        assert!("Points".parse::<StatName>().is_err());
    }

    #[test]
    fn parse_delta() {
        assert_eq!(Delta::try_from(1).unwrap(), Delta::Increment);
        assert_eq!(Delta::try_from(-1).unwrap(), Delta::Decrement);
        for invalid in [0, 2, -2, i32::MAX] {
            assert!(matches!(
                Delta::try_from(invalid),
                Err(LeagueError::Validation(_))
            ));
        }
    }
}
