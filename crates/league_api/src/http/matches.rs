use actix_web::{
    Responder, Scope,
    web::{self, Json, Path},
};
use entity::types::MatchStatus;
use league_lib::{
    Database,
    error::LeagueError,
    ledger::{self, Delta, StatName},
    match_status,
};
use serde::{Deserialize, Serialize};
use tracing_actix_web::RequestId;

use crate::{
    ApiResponse, AuthGuard, FitRequestId as _, Res,
    auth::privilege,
    utils::json,
};

pub fn matches_scope() -> Scope {
    web::scope("/matches")
        .route("/stats/adjust", web::post().to(adjust))
        .route("/status", web::post().to(status))
        .route("/{match_id}/stats", web::get().to(stats))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdjustBody {
    participation_stats_id: i32,
    stat_name: String,
    delta: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdjustResponse {
    participation_stats_id: i32,
    stat_name: StatName,
    value: i32,
}

async fn adjust(
    _: AuthGuard,
    req_id: RequestId,
    db: Res<Database>,
    Json(body): Json<AdjustBody>,
) -> ApiResponse<impl Responder> {
    let stat_name = body.stat_name.parse::<StatName>().fit(req_id)?;
    let delta = Delta::try_from(body.delta).fit(req_id)?;

    let value = ledger::adjust_stat(&db.sql_conn, body.participation_stats_id, stat_name, delta)
        .await
        .fit(req_id)?;

    json(AdjustResponse {
        participation_stats_id: body.participation_stats_id,
        stat_name,
        value,
    })
}

async fn stats(
    req_id: RequestId,
    db: Res<Database>,
    match_id: Path<i32>,
) -> ApiResponse<impl Responder> {
    let lines = ledger::match_stat_lines(&db.sql_conn, match_id.into_inner())
        .await
        .fit(req_id)?;
    json(lines)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    match_id: i32,
    status: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    match_id: i32,
    status: MatchStatus,
}

async fn status(
    _: AuthGuard<{ privilege::ADMIN }>,
    req_id: RequestId,
    db: Res<Database>,
    Json(body): Json<StatusBody>,
) -> ApiResponse<impl Responder> {
    let to = body
        .status
        .parse::<MatchStatus>()
        .map_err(|e| LeagueError::Validation(e.to_string()))
        .fit(req_id)?;

    let updated = match_status::set_match_status(&db.sql_conn, body.match_id, to)
        .await
        .fit(req_id)?;

    json(StatusResponse {
        match_id: updated.id,
        status: updated.status,
    })
}
