//! Module used to serve the routes of the API. Each submodule is specific for a route segment.

use actix_web::{
    HttpRequest, Responder, Scope,
    web::{self, JsonConfig, PathConfig},
};
use serde::Serialize;

use crate::{ApiError, ApiErrorKind, ApiResponse, must, utils::json};

use self::{
    admin::admin_scope, matches::matches_scope, player::player_scope, user::user_scope,
};

pub mod admin;
pub mod matches;
pub mod player;
pub mod user;

/// The maximum size of a JSON body, sized for the bulk imports.
const JSON_LIMIT: usize = 256 * 1024;

fn invalid_request(message: String, req: &HttpRequest) -> actix_web::Error {
    ApiError {
        request_id: must::have_request_id(req),
        kind: ApiErrorKind::InvalidRequest(message),
    }
    .into()
}

pub fn api_route() -> Scope {
    let json_config = JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, req| invalid_request(err.to_string(), req));
    let path_config =
        PathConfig::default().error_handler(|err, req| invalid_request(err.to_string(), req));

    let api = web::scope("/api")
        .service(player_scope())
        .service(user_scope())
        .service(matches_scope())
        .service(admin_scope());

    web::scope("")
        .app_data(json_config)
        .app_data(path_config)
        .route("/info", web::get().to(info))
        .service(api)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InfoResponse {
    service_name: &'static str,
    api_version: &'static str,
}

async fn info() -> ApiResponse<impl Responder> {
    json(InfoResponse {
        service_name: "League API",
        api_version: env!("CARGO_PKG_VERSION"),
    })
}
