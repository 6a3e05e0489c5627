use std::sync::Arc;

use actix_web::test;
use league_api_lib::{RemoteIdentityProvider, SharedIdentityProvider};


#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct InfoResponse {
    service_name: String,
    api_version: String,
}

#[tokio::test]
async fn not_found() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let app = base::get_app(db).await;

        let req = test::TestRequest::get().uri("/api/unknown").to_request();
        let res = test::call_service(&app, req).await;
        let err = base::expect_error(res, 404, 301).await?;
        assert!(!err.request_id.is_empty());

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn info() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let app = base::get_app(db).await;

        let req = test::TestRequest::get().uri("/info").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);

        let body = test::read_body(res).await;
        let info: InfoResponse = base::try_from_slice(&body)?;
        assert_eq!(info.service_name, "League API");
        assert_eq!(info.api_version, env!("CARGO_PKG_VERSION"));

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn malformed_body() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let app = base::get_app(db).await;

        let req = test::TestRequest::post()
            .uri("/api/players/claim")
            .insert_header(base::bearer(base::USER_TOKEN))
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 400, 401).await?;

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn unauthenticated() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let app = base::get_app(db).await;

        let req = test::TestRequest::post()
            .uri("/api/user/update")
            .to_request();
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 401, 201).await?;

        let req = test::TestRequest::post()
            .uri("/api/user/update")
            .insert_header(base::bearer("unknown-token"))
            .to_request();
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 401, 201).await?;

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn remote_identity_provider() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let mut server = mockito::Server::new_async().await;
        let _rejected = server
            .mock("GET", "/user")
            .match_header("authorization", "Bearer expired-token")
            .with_status(401)
            .create_async()
            .await;
        let _failing = server
            .mock("GET", "/user")
            .match_header("authorization", "Bearer some-token")
            .with_status(502)
            .create_async()
            .await;

        let provider: SharedIdentityProvider = Arc::new(RemoteIdentityProvider::new(
            reqwest::Client::new(),
            server.url(),
            "secret-key".to_owned(),
        ));
        let app = base::get_app_with(db, provider).await;

        let req = test::TestRequest::post()
            .uri("/api/user/update")
            .insert_header(base::bearer("expired-token"))
            .to_request();
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 401, 201).await?;

        // The provider failure isn't shown to the client
        let req = test::TestRequest::post()
            .uri("/api/user/update")
            .insert_header(base::bearer("some-token"))
            .to_request();
        let res = test::call_service(&app, req).await;
        let err = base::expect_error(res, 500, 107).await?;
        assert_eq!(err.error, "internal error");

        anyhow::Ok(())
    })
    .await
}
