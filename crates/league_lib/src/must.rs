//! This module contains utility functions used to retrieve some objects from the database,
//! that must exist. This is why it is called `must`.
//!
//! Unlike the Rust conventions, when such an object doesn't exist, the returned value isn't
//! `Option::None` but the corresponding error (for example, [`LeagueError::PlayerNotFound`]).
//! This keeps the operations readable, as most of them start by loading what they work on.

use entity::{matches, player_match_participations, player_match_stats, players, users};
use sea_orm::{ConnectionTrait, EntityTrait};

use crate::{
    error::{LeagueError, LeagueResult},
    internal,
};

/// Returns the player bound to the provided ID, with the identity that owns it.
pub async fn have_player_with_owner<C: ConnectionTrait>(
    conn: &C,
    player_id: &str,
) -> LeagueResult<(players::Model, users::Model)> {
    let (player, owner) = players::Entity::find_by_id(player_id)
        .find_also_related(users::Entity)
        .one(conn)
        .await?
        .ok_or_else(|| LeagueError::PlayerNotFound(player_id.to_owned()))?;

    let owner = owner.ok_or_else(|| {
        internal!(
            "have_player_with_owner: owner `{}` of player `{player_id}` must be in database",
            player.user_id
        )
    })?;

    Ok((player, owner))
}

/// Returns the identity in the database bound to the provided ID.
pub async fn have_user<C: ConnectionTrait>(conn: &C, user_id: &str) -> LeagueResult<users::Model> {
    users::Entity::find_by_id(user_id)
        .one(conn)
        .await?
        .ok_or_else(|| LeagueError::UserNotFound(user_id.to_owned()))
}

/// Returns the match in the database bound to the provided ID.
pub async fn have_match<C: ConnectionTrait>(
    conn: &C,
    match_id: i32,
) -> LeagueResult<matches::Model> {
    matches::Entity::find_by_id(match_id)
        .one(conn)
        .await?
        .ok_or(LeagueError::MatchNotFound(match_id))
}

/// A stats row, with the participation and the match it belongs to.
#[derive(Debug, Clone)]
pub struct StatLineContext {
    /// The stats row.
    pub stats: player_match_stats::Model,
    /// The participation owning the stats.
    pub participation: player_match_participations::Model,
    /// The match owning the participation.
    pub r#match: matches::Model,
}

/// Returns the stats row bound to the provided ID, with its participation and match.
pub async fn have_stat_line<C: ConnectionTrait>(
    conn: &C,
    stats_id: i32,
) -> LeagueResult<StatLineContext> {
    let (stats, participation) = player_match_stats::Entity::find_by_id(stats_id)
        .find_also_related(player_match_participations::Entity)
        .one(conn)
        .await?
        .ok_or(LeagueError::StatsNotFound(stats_id))?;

    let participation = participation.ok_or_else(|| {
        internal!("have_stat_line: participation of stats {stats_id} must be in database")
    })?;

    let r#match = matches::Entity::find_by_id(participation.match_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            internal!(
                "have_stat_line: match {} of stats {stats_id} must be in database",
                participation.match_id
            )
        })?;

    Ok(StatLineContext {
        stats,
        participation,
        r#match,
    })
}
