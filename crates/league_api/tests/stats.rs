use actix_web::test;
use serde_json::json;


#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdjustResponse {
    participation_stats_id: i32,
    stat_name: String,
    value: i32,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatLine {
    participation_stats_id: i32,
    player_id: String,
    player_name: String,
    points: i32,
    assists: i32,
    rebounds: i32,
    fouls: i32,
}

fn adjust(stats_id: i32, stat_name: &str, delta: i32) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/matches/stats/adjust")
        .insert_header(base::bearer(base::USER_TOKEN))
        .set_json(json!({
            "participationStatsId": stats_id,
            "statName": stat_name,
            "delta": delta,
        }))
        .to_request()
}

fn set_status(match_id: i32, status: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/matches/status")
        .insert_header(base::bearer(base::ADMIN_TOKEN))
        .set_json(json!({ "matchId": match_id, "status": status }))
        .to_request()
}

#[tokio::test]
async fn adjust_stats() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let conn = db.sql_conn.clone();
        let app = base::get_app(db).await;
        base::insert_identities(&conn).await?;
        let match_id = base::setup_match(&conn).await?;

        let res = test::call_service(&app, set_status(match_id, "ONGOING")).await;
        assert_eq!(res.status(), 200);

        let req = test::TestRequest::get()
            .uri(&format!("/api/matches/{match_id}/stats"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);
        let lines: Vec<StatLine> = base::try_from_slice(&test::read_body(res).await)?;
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.player_name, "Regular user");
        assert_eq!(
            (line.points, line.assists, line.rebounds, line.fouls),
            (0, 0, 0, 0)
        );
        let stats_id = line.participation_stats_id;

        for expected in 1..=2 {
            let res = test::call_service(&app, adjust(stats_id, "points", 1)).await;
            assert_eq!(res.status(), 200);
            let body: AdjustResponse = base::try_from_slice(&test::read_body(res).await)?;
            assert_eq!(body.participation_stats_id, stats_id);
            assert_eq!(body.stat_name, "points");
            assert_eq!(body.value, expected);
        }

        let res = test::call_service(&app, adjust(stats_id, "points", -1)).await;
        let body: AdjustResponse = base::try_from_slice(&test::read_body(res).await)?;
        assert_eq!(body.value, 1);

        // Nothing to remove
        let res = test::call_service(&app, adjust(stats_id, "fouls", -1)).await;
        base::expect_error(res, 400, 403).await?;

        let res = test::call_service(&app, adjust(stats_id, "steals", 1)).await;
        base::expect_error(res, 400, 402).await?;

        let res = test::call_service(&app, adjust(stats_id, "points", 2)).await;
        base::expect_error(res, 400, 402).await?;

        let res = test::call_service(&app, adjust(stats_id + 100, "points", 1)).await;
        base::expect_error(res, 404, 305).await?;

        // The stats are frozen once the match is over
        let res = test::call_service(&app, set_status(match_id, "COMPLETED")).await;
        assert_eq!(res.status(), 200);

        let res = test::call_service(&app, adjust(stats_id, "points", 1)).await;
        base::expect_error(res, 409, 505).await?;

        let req = test::TestRequest::get()
            .uri(&format!("/api/matches/{match_id}/stats"))
            .to_request();
        let res = test::call_service(&app, req).await;
        let lines: Vec<StatLine> = base::try_from_slice(&test::read_body(res).await)?;
        assert_eq!(lines[0].points, 1);
        assert!(!lines[0].player_id.is_empty());

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn adjust_requires_auth() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let app = base::get_app(db).await;

        let req = test::TestRequest::post()
            .uri("/api/matches/stats/adjust")
            .set_json(json!({
                "participationStatsId": 1,
                "statName": "points",
                "delta": 1,
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 401, 201).await?;

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn unknown_match_stats() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let app = base::get_app(db).await;

        let req = test::TestRequest::get()
            .uri("/api/matches/42/stats")
            .to_request();
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 404, 304).await?;

        let req = test::TestRequest::get()
            .uri("/api/matches/not-a-number/stats")
            .to_request();
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 400, 401).await?;

        anyhow::Ok(())
    })
    .await
}
