use actix_web::test;
use entity::{players, users};
use sea_orm::EntityTrait as _;
use serde_json::json;


#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedPlayer {
    player_id: String,
    user_id: String,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClaimResponse {
    new_player_user_id: String,
}

#[derive(serde::Deserialize)]
struct UpdateResponse {
    id: String,
}

#[tokio::test]
async fn claim_placeholder() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let conn = db.sql_conn.clone();
        let app = base::get_app(db).await;
        base::insert_identities(&conn).await?;

        // The admin registers a player who hasn't signed up yet
        let req = test::TestRequest::post()
            .uri("/api/admin/players")
            .insert_header(base::bearer(base::ADMIN_TOKEN))
            .set_json(json!({
                "name": "Regular user",
                "phone": "787.555.0101",
                "size": "L",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);
        let created: CreatedPlayer = base::try_from_slice(&test::read_body(res).await)?;
        assert_ne!(created.user_id, base::USER_ID);

        // The user signs up
        let req = test::TestRequest::post()
            .uri("/api/user/update")
            .insert_header(base::bearer(base::USER_TOKEN))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);
        let updated: UpdateResponse = base::try_from_slice(&test::read_body(res).await)?;
        assert_eq!(updated.id, base::USER_ID);

        let claim = || {
            test::TestRequest::post()
                .uri("/api/players/claim")
                .insert_header(base::bearer(base::USER_TOKEN))
                .set_json(json!({ "playerId": created.player_id }))
                .to_request()
        };

        let res = test::call_service(&app, claim()).await;
        assert_eq!(res.status(), 200);
        let claimed: ClaimResponse = base::try_from_slice(&test::read_body(res).await)?;
        assert_eq!(claimed.new_player_user_id, base::USER_ID);

        let player = players::Entity::find_by_id(&created.player_id)
            .one(&conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("player should still exist"))?;
        assert_eq!(player.user_id, base::USER_ID);

        let placeholder = users::Entity::find_by_id(&created.user_id).one(&conn).await?;
        assert!(placeholder.is_none());

        // The player isn't a placeholder anymore
        let res = test::call_service(&app, claim()).await;
        base::expect_error(res, 409, 501).await?;

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn claim_preconditions() -> anyhow::Result<()> {
    test_env::wrap(async |db| {
        let conn = db.sql_conn.clone();
        let app = base::get_app(db).await;
        base::insert_identities(&conn).await?;

        let claim = |player_id: &str| {
            test::TestRequest::post()
                .uri("/api/players/claim")
                .insert_header(base::bearer(base::USER_TOKEN))
                .set_json(json!({ "playerId": player_id }))
                .to_request()
        };

        let res = test::call_service(&app, claim("  ")).await;
        base::expect_error(res, 400, 402).await?;

        let res = test::call_service(&app, claim("unknown")).await;
        base::expect_error(res, 404, 302).await?;

        // A placeholder with another phone number
        let req = test::TestRequest::post()
            .uri("/api/admin/players")
            .insert_header(base::bearer(base::ADMIN_TOKEN))
            .set_json(json!({
                "name": "Somebody else",
                "phone": "787-555-9999",
                "size": "S",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        let created: CreatedPlayer = base::try_from_slice(&test::read_body(res).await)?;

        let res = test::call_service(&app, claim(&created.player_id)).await;
        base::expect_error(res, 409, 502).await?;

        // Only the admins can register players
        let req = test::TestRequest::post()
            .uri("/api/admin/players")
            .insert_header(base::bearer(base::USER_TOKEN))
            .set_json(json!({
                "name": "Somebody else",
                "phone": "787-555-9999",
                "size": "S",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        base::expect_error(res, 403, 202).await?;

        anyhow::Ok(())
    })
    .await
}
