use league_lib::{Database, aggregate, ledger};

#[derive(clap::Subcommand)]
pub enum StatsCommand {
    /// Rebuilds the season and career stats of every player from the match stats.
    Recompute,

    /// Shows the stats of the players of a match.
    Show {
        /// The match ID.
        match_id: i32,
    },
}

async fn recompute(db: &Database) -> anyhow::Result<()> {
    tracing::info!("Rebuilding season and career stats...");
    let report = aggregate::recompute_all(&db.sql_conn).await?;

    let mut table = prettytable::Table::init(vec![prettytable::row!["Table", "Rows"]]);
    table.add_row(prettytable::row!["season_stats", report.season_rows]);
    table.add_row(prettytable::row!["player_total_stats", report.total_rows]);
    println!("{table}");

    Ok(())
}

async fn show(db: &Database, match_id: i32) -> anyhow::Result<()> {
    let lines = ledger::match_stat_lines(&db.sql_conn, match_id).await?;
    tracing::debug!("Match {match_id} has {} participation(s)", lines.len());

    let mut table = prettytable::Table::init(vec![prettytable::row![
        "#", "Player", "PTS", "AST", "REB", "FLS"
    ]]);

    for (i, line) in lines.into_iter().enumerate() {
        table.add_row(prettytable::row![
            i + 1,
            line.player_name,
            line.points,
            line.assists,
            line.rebounds,
            line.fouls
        ]);
    }

    println!("Match {match_id}");
    println!("{table}");

    Ok(())
}

pub async fn stats(db: Database, cmd: StatsCommand) -> anyhow::Result<()> {
    match cmd {
        StatsCommand::Recompute => recompute(&db).await,
        StatsCommand::Show { match_id } => show(&db, match_id).await,
    }
}
