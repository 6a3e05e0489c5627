use std::{env, panic};

use anyhow::Context as _;
use futures::FutureExt as _;
use league_lib::Database;
use migration::MigratorTrait as _;
use sea_orm::DbConn;
use tracing_subscriber::fmt::TestWriter;

/// The Redis URL used when none is configured. The pool is lazy, so no server is needed
/// unless a test sends a Redis command.
#[cfg_attr(any(feature = "mysql", feature = "postgres"), allow(dead_code))]
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

#[cfg_attr(
    all(not(feature = "mysql"), not(feature = "postgres")),
    allow(dead_code)
)]
fn is_db_drop_forced() -> bool {
    env::args_os().any(|arg| arg == "--force-drop-db")
}

pub trait IntoResult {
    type Out;

    fn into_result(self) -> anyhow::Result<Self::Out>;
}

impl IntoResult for () {
    type Out = ();

    fn into_result(self) -> anyhow::Result<Self::Out> {
        Ok(())
    }
}

impl<T, E> IntoResult for Result<T, E>
where
    anyhow::Error: From<E>,
{
    type Out = T;

    fn into_result(self) -> anyhow::Result<Self::Out> {
        self.map_err(From::from)
    }
}

pub fn init_env() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Err(err) if !err.not_found() => return Err(err).context("cannot retrieve .env files"),
        _ => (),
    }

    let _ = tracing_subscriber::fmt()
        .with_writer(TestWriter::new())
        .try_init();

    Ok(())
}

type TestOutcome<T> = Result<anyhow::Result<T>, Box<dyn std::any::Any + Send>>;

async fn run_test<F, R>(db: Database, test: F) -> TestOutcome<R::Out>
where
    F: AsyncFnOnce(Database) -> R,
    R: IntoResult,
{
    panic::AssertUnwindSafe(test(db))
        .catch_unwind()
        .await
        .map(IntoResult::into_result)
}

/// Runs the provided test with a fresh migrated database.
///
/// Without the `mysql` or `postgres` feature, the database is an in-memory SQLite database.
/// Otherwise, a new database is created from the `DATABASE_URL` server, and dropped after the
/// test if it succeeded.
pub async fn wrap<F, R>(test: F) -> anyhow::Result<<R as IntoResult>::Out>
where
    F: AsyncFnOnce(Database) -> R,
    R: IntoResult,
{
    init_env()?;
    wrap_impl(test).await
}

#[cfg(not(any(feature = "mysql", feature = "postgres")))]
async fn wrap_impl<F, R>(test: F) -> anyhow::Result<<R as IntoResult>::Out>
where
    F: AsyncFnOnce(Database) -> R,
    R: IntoResult,
{
    let options = sea_orm::ConnectOptions::new("sqlite::memory:")
        .max_connections(1)
        .to_owned();
    let db: DbConn = sea_orm::Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;

    let redis_url = env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_owned());
    let db = Database::from_db_conn(db, redis_url)?;

    match run_test(db, test).await {
        Ok(out) => out,
        Err(e) => panic::resume_unwind(e),
    }
}

#[cfg(any(feature = "mysql", feature = "postgres"))]
async fn wrap_impl<F, R>(test: F) -> anyhow::Result<<R as IntoResult>::Out>
where
    F: AsyncFnOnce(Database) -> R,
    R: IntoResult,
{
    use league_lib::{DbEnv, pool::get_redis_pool};
    use mkenv::prelude::*;
    use sea_orm::ConnectionTrait as _;

    let env = DbEnv::define();

    let master_db = sea_orm::Database::connect(&env.db_url.db_url.get()).await?;

    // On MySQL/MariaDB, a schema name with some capital letters may produce the error
    // code 1932 (42S02) "Table 'X' doesn't exist in engine".
    let db_name = format!("_test_db_{}", league_lib::gen_random_str(10).to_lowercase());

    master_db
        .execute_unprepared(&format!("create database {db_name}"))
        .await?;
    tracing::info!("Created database {db_name}");

    let db = match master_db {
        #[cfg(feature = "mysql")]
        sea_orm::DatabaseConnection::SqlxMySqlPoolConnection(_) => {
            use sea_orm::sqlx;

            let connect_options = master_db.get_mysql_connection_pool().connect_options();
            let connect_options = (*connect_options).clone();
            let options = connect_options.database(&db_name);
            let db = sqlx::mysql::MySqlPool::connect_with(options).await?;
            DbConn::from(db)
        }
        #[cfg(feature = "postgres")]
        sea_orm::DatabaseConnection::SqlxPostgresPoolConnection(_) => {
            use sea_orm::sqlx;

            let connect_options = master_db.get_postgres_connection_pool().connect_options();
            let connect_options = (*connect_options).clone();
            let options = connect_options.database(&db_name);
            let db = sqlx::postgres::PgPool::connect_with(options).await?;
            DbConn::from(db)
        }
        _ => anyhow::bail!("DATABASE_URL must point to a MySQL or PostgreSQL server"),
    };

    migration::Migrator::up(&db, None).await?;

    let db = Database {
        sql_conn: db,
        redis_pool: get_redis_pool(env.redis_url.redis_url.get())?,
    };

    let r = run_test(db, test).await;

    if is_db_drop_forced() {
        master_db
            .execute_unprepared(&format!("drop database {db_name}"))
            .await?;
        tracing::info!("Database {db_name} force-deleted");
        match r {
            Ok(out) => out,
            Err(e) => {
                tracing::info!("Test failed");
                panic::resume_unwind(e)
            }
        }
    } else {
        match r {
            Ok(Ok(out)) => {
                master_db
                    .execute_unprepared(&format!("drop database {db_name}"))
                    .await?;
                Ok(out)
            }
            other => {
                tracing::info!(
                    "Test failed, leaving database {db_name} as-is. \
                    Run with `--force-drop-db` to drop the database everytime."
                );
                match other {
                    Ok(Err(e)) => Err(e),
                    Err(e) => panic::resume_unwind(e),
                    Ok(Ok(_)) => unreachable!(),
                }
            }
        }
    }
}
