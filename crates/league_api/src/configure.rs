use actix_web::{Responder, web};
use league_lib::Database;
use tracing_actix_web::{DefaultRootSpanBuilder, RequestId, RootSpanBuilder};

use crate::{ApiErrorKind, ApiResponse, FitRequestId as _, SharedIdentityProvider};

/// The actix route handler for the Not Found response.
async fn not_found(req_id: RequestId) -> ApiResponse<impl Responder> {
    Err::<String, _>(ApiErrorKind::EndpointNotFound).fit(req_id)
}

/// Returns the size and the number of idle connections of the SQL pool.
fn pool_stats(db: &Database) -> (u32, usize) {
    #[allow(unreachable_patterns)]
    match db.sql_conn {
        #[cfg(feature = "mysql")]
        sea_orm::DatabaseConnection::SqlxMySqlPoolConnection(_) => {
            let pool = db.sql_conn.get_mysql_connection_pool();
            (pool.size(), pool.num_idle())
        }
        #[cfg(feature = "postgres")]
        sea_orm::DatabaseConnection::SqlxPostgresPoolConnection(_) => {
            let pool = db.sql_conn.get_postgres_connection_pool();
            (pool.size(), pool.num_idle())
        }
        #[cfg(feature = "sqlite")]
        sea_orm::DatabaseConnection::SqlxSqlitePoolConnection(_) => {
            let pool = db.sql_conn.get_sqlite_connection_pool();
            (pool.size(), pool.num_idle())
        }
        _ => (0, 0),
    }
}

pub struct CustomRootSpanBuilder;

impl RootSpanBuilder for CustomRootSpanBuilder {
    fn on_request_start(request: &actix_web::dev::ServiceRequest) -> tracing::Span {
        let (pool_size, pool_num_idle) = request
            .app_data::<Database>()
            .map(pool_stats)
            .unwrap_or_default();

        tracing_actix_web::root_span!(
            request,
            pool_size = pool_size,
            pool_num_idle = pool_num_idle,
        )
    }

    fn on_request_end<B: actix_web::body::MessageBody>(
        span: tracing::Span,
        outcome: &Result<actix_web::dev::ServiceResponse<B>, actix_web::Error>,
    ) {
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}

/// Registers the app data and the routes of the API.
pub fn configure(cfg: &mut web::ServiceConfig, db: Database, provider: SharedIdentityProvider) {
    cfg.app_data(db)
        .app_data(provider)
        .service(crate::api_route())
        .default_service(web::to(not_found));
}
