use actix_web::{Responder, Scope, web};
use league_lib::{Database, user};
use serde::Serialize;
use tracing_actix_web::RequestId;

use crate::{ApiResponse, AuthGuard, FitRequestId as _, Res, utils::json};

pub fn user_scope() -> Scope {
    web::scope("/user").route("/update", web::post().to(update))
}

#[derive(Serialize)]
struct UpdateResponse {
    id: String,
}

/// Inserts or updates the identity row of the caller, from what the identity provider knows.
async fn update(
    auth: AuthGuard,
    req_id: RequestId,
    db: Res<Database>,
) -> ApiResponse<impl Responder> {
    let user = user::sync_identity(&db.sql_conn, &auth.identity)
        .await
        .fit(req_id)?;

    json(UpdateResponse { id: user.id })
}
