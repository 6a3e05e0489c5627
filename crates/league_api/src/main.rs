//! The league API program.
//!
//! The program also includes a [library](league_api_lib). Overall, it uses the [`league_lib`]
//! crate as a main dependency.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer};
use anyhow::Context;
use league_api_lib::{RemoteIdentityProvider, SharedIdentityProvider, configure};
use league_lib::Database;
use migration::MigratorTrait;
use mkenv::prelude::*;
use reqwest::Client;
use tracing::level_filters::LevelFilter;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// The main entry point.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Err(err) if !err.not_found() => return Err(err).context("cannot retrieve .env files"),
        _ => (),
    }
    let env = league_api_lib::init_env()?;

    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let db = Database::from_db_url(
        env.db_env.db_url.db_url.get(),
        env.db_env.redis_url.redis_url.get(),
    )
    .await?;

    migration::Migrator::up(&db.sql_conn, None).await?;

    let provider: SharedIdentityProvider = Arc::new(
        RemoteIdentityProvider::new(
            Client::new(),
            env.auth_url.get(),
            env.auth_key.auth_api_key.get(),
        )
        .with_cache(db.redis_pool.clone(), env.identity_cache_ttl.get()),
    );

    let port = env.port.get();
    tracing::info!("Listening on port {port}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec!["accept", "authorization", "content-type"])
            .max_age(3600);
        #[cfg(debug_assertions)]
        let cors = cors.allow_any_origin();
        #[cfg(not(debug_assertions))]
        let cors = cors.allowed_origin(&league_api_lib::env().host.host.get());

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::<configure::CustomRootSpanBuilder>::new())
            .configure(|cfg| configure::configure(cfg, db.clone(), provider.clone()))
    })
    .bind(("0.0.0.0", port))
    .context("Cannot bind 0.0.0.0 address")?
    .run()
    .await
    .context("Cannot create actix-web server")?;

    Ok(())
}
