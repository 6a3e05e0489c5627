use clap::Parser;
use mkenv::prelude::*;
use league_lib::{Database, DbEnv};

use self::{role::RoleCommand, stats::StatsCommand};

mod role;
mod stats;

#[derive(clap::Parser)]
enum Command {
    #[clap(subcommand)]
    Role(RoleCommand),
    #[clap(subcommand)]
    Stats(StatsCommand),
}

mkenv::make_config! {
    struct Env {
        db_env: { DbEnv },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Err(err) if !err.not_found() => return Err(err.into()),
        _ => (),
    }
    tracing_subscriber::fmt()
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("unable to init tracing_subscriber: {e}"))?;
    let env = Env::define();
    env.init();

    let db = Database::from_db_url(
        env.db_env.db_url.db_url.get(),
        env.db_env.redis_url.redis_url.get(),
    )
    .await?;

    let cmd = Command::parse();

    match cmd {
        Command::Role(cmd) => role::role(db, cmd).await,
        Command::Stats(cmd) => stats::stats(db, cmd).await,
    }
}
