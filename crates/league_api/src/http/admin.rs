use actix_web::{
    Responder, Scope,
    web::{self, Json},
};
use league_lib::{
    Database,
    import::{self, ImportKind},
    user::{self, NewPlayer},
};
use serde::Deserialize;
use tracing_actix_web::RequestId;

use crate::{ApiResponse, AuthGuard, FitRequestId as _, Res, auth::privilege, utils::json};

type AdminGuard = AuthGuard<{ privilege::ADMIN }>;

pub fn admin_scope() -> Scope {
    web::scope("/admin")
        .route("/players", web::post().to(create_player))
        .route("/import", web::post().to(import_rows))
}

/// Registers a player who hasn't signed up yet.
async fn create_player(
    auth: AdminGuard,
    req_id: RequestId,
    db: Res<Database>,
    Json(body): Json<NewPlayer>,
) -> ApiResponse<impl Responder> {
    let created = user::create_placeholder_player(&db.sql_conn, &body)
        .await
        .fit(req_id)?;

    tracing::info!(
        "Admin `{}` created the placeholder player `{}`",
        auth.identity.id,
        created.player_id
    );

    json(created)
}

#[derive(Deserialize)]
struct ImportBody {
    kind: ImportKind,
    rows: Vec<Vec<String>>,
}

async fn import_rows(
    auth: AdminGuard,
    req_id: RequestId,
    db: Res<Database>,
    Json(body): Json<ImportBody>,
) -> ApiResponse<impl Responder> {
    let report = import::import_rows(&db.sql_conn, body.kind, &body.rows)
        .await
        .fit(req_id)?;

    tracing::info!(
        "Admin `{}` imported {} {:?} row(s)",
        auth.identity.id,
        report.inserted,
        body.kind
    );

    json(report)
}
