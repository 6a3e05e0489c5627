use actix_web::{
    Responder, Scope,
    web::{self, Json},
};
use league_lib::{Database, claim};
use serde::{Deserialize, Serialize};
use tracing_actix_web::RequestId;

use crate::{ApiResponse, AuthGuard, FitRequestId as _, Res, utils::json};

pub fn player_scope() -> Scope {
    web::scope("/players").route("/claim", web::post().to(post_claim))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClaimBody {
    #[serde(default)]
    player_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClaimResponse {
    new_player_user_id: String,
}

async fn post_claim(
    auth: AuthGuard,
    req_id: RequestId,
    db: Res<Database>,
    Json(body): Json<ClaimBody>,
) -> ApiResponse<impl Responder> {
    let new_player_user_id =
        claim::claim_player(&db.sql_conn, &auth.identity.id, body.player_id.trim())
            .await
            .fit(req_id)?;

    json(ClaimResponse { new_player_user_id })
}
