use actix_web::test;
use serde_json::json;


#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    match_id: i32,
    status: String,
}

fn set_status(token: &str, match_id: i32, status: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/matches/status")
        .insert_header(base::bearer(token))
        .set_json(json!({ "matchId": match_id, "status": status }))
        .to_request()
}

#[tokio::test]
async fn transitions() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let conn = db.sql_conn.clone();
        let app = base::get_app(db).await;
        base::insert_identities(&conn).await?;
        let match_id = base::setup_match(&conn).await?;

        // Cannot skip the ongoing state
        let req = set_status(base::ADMIN_TOKEN, match_id, "COMPLETED");
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 409, 506).await?;

        let req = set_status(base::ADMIN_TOKEN, match_id, "ONGOING");
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);
        let body: StatusResponse = base::try_from_slice(&test::read_body(res).await)?;
        assert_eq!(body.match_id, match_id);
        assert_eq!(body.status, "ONGOING");

        let req = set_status(base::ADMIN_TOKEN, match_id, "CANCELED");
        let res = test::call_service(&app, req).await;
        let body: StatusResponse = base::try_from_slice(&test::read_body(res).await)?;
        assert_eq!(body.status, "CANCELED");

        // Terminal
        let req = set_status(base::ADMIN_TOKEN, match_id, "ONGOING");
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 409, 506).await?;

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn admin_only() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let conn = db.sql_conn.clone();
        let app = base::get_app(db).await;
        base::insert_identities(&conn).await?;
        let match_id = base::setup_match(&conn).await?;

        let req = set_status(base::USER_TOKEN, match_id, "ONGOING");
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 403, 202).await?;

        let req = set_status(base::ADMIN_TOKEN, match_id, "PAUSED");
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 400, 402).await?;

        let req = set_status(base::ADMIN_TOKEN, match_id + 1, "ONGOING");
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 404, 304).await?;

        anyhow::Ok(())
    })
    .await
}
