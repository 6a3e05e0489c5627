//! The claim of a placeholder player by a real user.
//!
//! An admin can register a player before the person signs up. The player is then owned by a
//! placeholder identity, with no email. When the person signs up with the same phone number,
//! they can claim the player: its ownership is transferred to their identity, and the
//! placeholder is deleted.

use entity::{players, users};
use sea_orm::{
    ColumnTrait as _, ConnectionTrait, EntityTrait as _, QueryFilter as _, SqlErr,
    prelude::Expr,
};

use crate::{
    error::{LeagueError, LeagueResult},
    must, phone, user,
};

/// Transfers the ownership of the provided player to the caller.
///
/// The checks are made in this order:
///
/// 1. the player ID isn't empty, else [`LeagueError::Validation`],
/// 2. the player exists, else [`LeagueError::PlayerNotFound`],
/// 3. the player is owned by a placeholder, else [`LeagueError::PlayerNotUnclaimed`],
/// 4. the caller identity is in the database, else [`LeagueError::InvalidState`],
/// 5. both phone numbers match once normalized, else [`LeagueError::PhoneMismatch`],
/// 6. the caller doesn't own a player already, else [`LeagueError::CallerAlreadyOwnsPlayer`].
///
/// The transfer is conditioned on the player still being owned by the placeholder, so if
/// another claim won the race, this one fails with [`LeagueError::ConcurrentClaim`].
///
/// Returns the ID of the new owner of the player, which is the caller ID.
pub async fn claim_player<C: ConnectionTrait>(
    conn: &C,
    caller_id: &str,
    player_id: &str,
) -> LeagueResult<String> {
    if player_id.is_empty() {
        return Err(LeagueError::Validation("playerId required".to_owned()));
    }

    let (player, placeholder) = must::have_player_with_owner(conn, player_id).await?;

    if placeholder.is_claimed() {
        return Err(LeagueError::PlayerNotUnclaimed);
    }

    let caller = users::Entity::find_by_id(caller_id)
        .one(conn)
        .await?
        .ok_or(LeagueError::InvalidState("caller identity missing"))?;

    if !phone::same_number(placeholder.phone.as_deref(), caller.phone.as_deref()) {
        tracing::warn!(
            "Identity `{caller_id}` tried to claim player `{player_id}` with a different phone number"
        );
        return Err(LeagueError::PhoneMismatch);
    }

    if user::owned_player(conn, caller_id).await?.is_some() {
        return Err(LeagueError::CallerAlreadyOwnsPlayer);
    }

    // The caller may have claimed another player since the check above, which makes the
    // update hit the unique key on `players.user_id`.
    let updated = players::Entity::update_many()
        .col_expr(players::Column::UserId, Expr::value(caller_id))
        .filter(players::Column::Id.eq(player.id.as_str()))
        .filter(players::Column::UserId.eq(placeholder.id.as_str()))
        .exec(conn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => LeagueError::CallerAlreadyOwnsPlayer,
            _ => e.into(),
        })?
        .rows_affected;

    if updated == 0 {
        return Err(LeagueError::ConcurrentClaim);
    }

    if let Err(e) = users::Entity::delete_by_id(&placeholder.id).exec(conn).await {
        tracing::warn!(
            "Couldn't delete placeholder identity `{}` after the claim of player `{player_id}`: {e}",
            placeholder.id
        );
    }

    tracing::info!("Identity `{caller_id}` claimed player `{player_id}`");

    Ok(caller.id)
}
