use actix_web::test;
use entity::teams;
use sea_orm::{EntityTrait as _, PaginatorTrait as _};
use serde_json::json;


#[derive(Debug, serde::Deserialize)]
struct RowError {
    row: usize,
    message: String,
}

#[derive(Debug, serde::Deserialize)]
struct ImportReport {
    inserted: usize,
    errors: Vec<RowError>,
}

#[tokio::test]
async fn import_teams() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let conn = db.sql_conn.clone();
        let app = base::get_app(db).await;
        base::insert_identities(&conn).await?;

        let req = test::TestRequest::post()
            .uri("/api/admin/import")
            .insert_header(base::bearer(base::ADMIN_TOKEN))
            .set_json(json!({
                "kind": "teams",
                "rows": [["Sharks"], ["Owls"], ["Sharks"], ["Too", "many"]],
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);

        let report: ImportReport = base::try_from_slice(&test::read_body(res).await)?;
        assert_eq!(report.inserted, 2);
        assert_eq!(
            report.errors.iter().map(|e| e.row).collect::<Vec<_>>(),
            vec![2, 3]
        );
        assert!(report.errors.iter().all(|e| !e.message.is_empty()));
        assert_eq!(teams::Entity::find().count(&conn).await?, 2);

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn import_rejects_bad_batches() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let conn = db.sql_conn.clone();
        let app = base::get_app(db).await;
        base::insert_identities(&conn).await?;

        let req = test::TestRequest::post()
            .uri("/api/admin/import")
            .insert_header(base::bearer(base::ADMIN_TOKEN))
            .set_json(json!({ "kind": "players", "rows": [] }))
            .to_request();
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 400, 402).await?;

        let req = test::TestRequest::post()
            .uri("/api/admin/import")
            .insert_header(base::bearer(base::ADMIN_TOKEN))
            .set_json(json!({ "kind": "coaches", "rows": [["x"]] }))
            .to_request();
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 400, 401).await?;

        let req = test::TestRequest::post()
            .uri("/api/admin/import")
            .insert_header(base::bearer(base::USER_TOKEN))
            .set_json(json!({ "kind": "teams", "rows": [["Sharks"]] }))
            .to_request();
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 403, 202).await?;

        anyhow::Ok(())
    })
    .await
}
