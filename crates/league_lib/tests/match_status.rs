use entity::{player_match_participations, types::MatchStatus};
use league_lib::{
    error::{ErrorCategory, LeagueError},
    match_status::set_match_status,
};
use sea_orm::{ColumnTrait as _, EntityTrait as _, PaginatorTrait as _, QueryFilter as _};


#[tokio::test]
async fn start_creates_participations() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let conn = &db.sql_conn;
        let league = base::setup_league(conn).await?;

        let mut roster = Vec::new();
        for (i, team_id) in [league.home_team_id, league.home_team_id, league.away_team_id]
            .into_iter()
            .enumerate()
        {
            let user = base::insert_user(conn, Some(&format!("p{i}@example.com")), None).await?;
            let player = base::insert_player(conn, &user.id).await?;
            base::add_to_team(conn, &player.id, league.season_id, team_id).await?;
            roster.push(player.id);
        }

        // Not on any of both teams
        let bench = base::insert_user(conn, Some("bench@example.com"), None).await?;
        let bench = base::insert_player(conn, &bench.id).await?;

        let m = base::insert_match(conn, &league, MatchStatus::Scheduled).await?;
        let updated = set_match_status(conn, m.id, MatchStatus::Ongoing).await?;
        assert_eq!(updated.status, MatchStatus::Ongoing);

        let count = player_match_participations::Entity::find()
            .filter(player_match_participations::Column::MatchId.eq(m.id))
            .count(conn)
            .await?;
        assert_eq!(count, 3);

        for player_id in &roster {
            let stats = base::stats_of(conn, m.id, player_id).await?;
            assert_eq!(
                (stats.points, stats.assists, stats.rebounds, stats.fouls),
                (0, 0, 0, 0)
            );
        }
        assert!(base::stats_of(conn, m.id, &bench.id).await.is_err());

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn transitions() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let conn = &db.sql_conn;
        let league = base::setup_league(conn).await?;

        let m = base::insert_match(conn, &league, MatchStatus::Scheduled).await?;

        let err = set_match_status(conn, m.id, MatchStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LeagueError::IllegalTransition {
                from: MatchStatus::Scheduled,
                to: MatchStatus::Completed,
            }
        ));
        assert_eq!(err.category(), ErrorCategory::Conflict);

        let err = set_match_status(conn, m.id, MatchStatus::Scheduled)
            .await
            .unwrap_err();
        assert!(matches!(err, LeagueError::IllegalTransition { .. }));

        set_match_status(conn, m.id, MatchStatus::Ongoing).await?;
        set_match_status(conn, m.id, MatchStatus::Completed).await?;

        let err = set_match_status(conn, m.id, MatchStatus::Canceled)
            .await
            .unwrap_err();
        assert!(matches!(err, LeagueError::IllegalTransition { .. }));

        let other = base::insert_match(conn, &league, MatchStatus::Scheduled).await?;
        set_match_status(conn, other.id, MatchStatus::Canceled).await?;

        let err = set_match_status(conn, 4242, MatchStatus::Ongoing)
            .await
            .unwrap_err();
        assert!(matches!(err, LeagueError::MatchNotFound(4242)));

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn restart_keeps_existing_stats() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let conn = &db.sql_conn;
        let live = base::live_match(conn).await?;

        // A second player joins the home team after the start, and a new match starts.
        let user = base::insert_user(conn, Some("late@example.com"), None).await?;
        let late = base::insert_player(conn, &user.id).await?;
        base::add_to_team(
            conn,
            &late.id,
            live.league.season_id,
            live.league.home_team_id,
        )
        .await?;

        let next = base::insert_match(conn, &live.league, MatchStatus::Scheduled).await?;
        set_match_status(conn, next.id, MatchStatus::Ongoing).await?;

        // The first match is untouched
        let count = player_match_participations::Entity::find()
            .filter(player_match_participations::Column::MatchId.eq(live.match_id))
            .count(conn)
            .await?;
        assert_eq!(count, 1);
        let stats = base::stats_of(conn, live.match_id, &live.player_id).await?;
        assert_eq!(stats.id, live.stats_id);

        let count = player_match_participations::Entity::find()
            .filter(player_match_participations::Column::MatchId.eq(next.id))
            .count(conn)
            .await?;
        assert_eq!(count, 2);

        anyhow::Ok(())
    })
    .await
}
