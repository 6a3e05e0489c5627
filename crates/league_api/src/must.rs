//! See [`league_lib::must`] module documentation.

use actix_web::{HttpMessage as _, HttpRequest};
use league_lib::Database;
use tracing_actix_web::RequestId;

use crate::SharedIdentityProvider;

pub fn have_request_id(req: &HttpRequest) -> RequestId {
    *req.extensions()
        .get::<RequestId>()
        .expect("RequestId should be present")
}

pub fn have_db(req: &HttpRequest) -> Database {
    req.app_data::<Database>()
        .expect("Database app data should be present")
        .clone()
}

pub fn have_identity_provider(req: &HttpRequest) -> SharedIdentityProvider {
    req.app_data::<SharedIdentityProvider>()
        .expect("identity provider app data should be present")
        .clone()
}
