//! The lifecycle of a match.

use entity::{
    matches, player_match_participations, player_match_stats, player_season_details,
    types::MatchStatus,
};
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait as _, ConnectionTrait, EntityTrait as _, QueryFilter as _, QuerySelect as _,
    TransactionTrait,
    prelude::Expr,
    sea_query::OnConflict,
};

use crate::{
    error::{LeagueError, LeagueResult},
    must,
};

/// Changes the status of a match.
///
/// The transition must be allowed by [`MatchStatus::can_transition_to`]. The update is
/// conditioned on the status read beforehand, so a concurrent change makes it fail with
/// [`LeagueError::ConcurrentStatusChange`].
///
/// When the match starts, every player of the home and away teams for the season of the
/// match gets a participation and a stats row with zeroed counters.
///
/// Returns the updated match.
pub async fn set_match_status<C>(
    conn: &C,
    match_id: i32,
    to: MatchStatus,
) -> LeagueResult<matches::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;

    let r#match = must::have_match(&txn, match_id).await?;
    let from = r#match.status;

    if !from.can_transition_to(to) {
        return Err(LeagueError::IllegalTransition { from, to });
    }

    let updated = matches::Entity::update_many()
        .col_expr(matches::Column::Status, Expr::value(to))
        .filter(matches::Column::Id.eq(match_id))
        .filter(matches::Column::Status.eq(from))
        .exec(&txn)
        .await?
        .rows_affected;

    if updated == 0 {
        return Err(LeagueError::ConcurrentStatusChange);
    }

    if to == MatchStatus::Ongoing {
        let created = ensure_participations(&txn, &r#match).await?;
        tracing::debug!("Ensured {created} participation(s) for match {match_id}");
    }

    txn.commit().await?;

    tracing::info!("Match {match_id} went from {from} to {to}");

    Ok(matches::Model {
        status: to,
        ..r#match
    })
}

/// Creates the missing participations and stats rows of the players of both teams of the
/// match.
///
/// Returns the amount of participations of the match.
async fn ensure_participations<C: ConnectionTrait>(
    conn: &C,
    r#match: &matches::Model,
) -> LeagueResult<usize> {
    let player_ids = player_season_details::Entity::find()
        .filter(player_season_details::Column::SeasonId.eq(r#match.season_id))
        .filter(
            player_season_details::Column::TeamId
                .is_in([r#match.home_team_id, r#match.away_team_id]),
        )
        .select_only()
        .column(player_season_details::Column::PlayerId)
        .into_tuple::<String>()
        .all(conn)
        .await?;

    if !player_ids.is_empty() {
        player_match_participations::Entity::insert_many(player_ids.into_iter().map(
            |player_id| player_match_participations::ActiveModel {
                id: NotSet,
                player_id: Set(player_id),
                match_id: Set(r#match.id),
            },
        ))
        .on_conflict(
            OnConflict::columns([
                player_match_participations::Column::PlayerId,
                player_match_participations::Column::MatchId,
            ])
            .update_column(player_match_participations::Column::MatchId)
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    }

    let participation_ids = player_match_participations::Entity::find()
        .filter(player_match_participations::Column::MatchId.eq(r#match.id))
        .select_only()
        .column(player_match_participations::Column::Id)
        .into_tuple::<i32>()
        .all(conn)
        .await?;

    let count = participation_ids.len();

    if !participation_ids.is_empty() {
        player_match_stats::Entity::insert_many(participation_ids.into_iter().map(
            |participation_id| player_match_stats::ActiveModel {
                id: NotSet,
                participation_id: Set(participation_id),
                points: Set(0),
                assists: Set(0),
                rebounds: Set(0),
                fouls: Set(0),
            },
        ))
        .on_conflict(
            OnConflict::column(player_match_stats::Column::ParticipationId)
                .update_column(player_match_stats::Column::ParticipationId)
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    }

    Ok(count)
}
