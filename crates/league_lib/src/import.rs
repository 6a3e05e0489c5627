//! The bulk import of players and teams by the admins.
//!
//! The rows are sent as arrays of strings, like the lines of a spreadsheet. Each row is
//! validated into a typed record. Malformed rows are reported with their index, and the valid
//! ones are inserted.

use std::collections::HashSet;

use entity::teams;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait as _, ConnectionTrait, EntityTrait as _, QueryFilter as _, QuerySelect as _,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{LeagueError, LeagueResult},
    user::{self, NewPlayer},
};

/// The maximum amount of rows accepted in a single import.
pub const MAX_IMPORT_ROWS: usize = 1000;

/// The kind of records being imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// Placeholder players: `[name, phone, size, position?]`.
    Players,
    /// Teams: `[name]`.
    Teams,
}

/// A validated row.
#[derive(Debug, Clone)]
pub enum ImportRow {
    /// A placeholder player, with its normalized phone number.
    Player(NewPlayer, String),
    /// A team name.
    Team(String),
}

/// The error of a single row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// The index of the row in the request, starting at 0.
    pub row: usize,
    /// The reason of the rejection.
    pub message: String,
}

/// The result of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// The amount of inserted rows.
    pub inserted: usize,
    /// The rejected rows.
    pub errors: Vec<RowError>,
}

fn cell(cells: &[String], i: usize) -> Option<&str> {
    cells.get(i).map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Validates a single row.
pub fn parse_row(kind: ImportKind, cells: &[String]) -> Result<ImportRow, String> {
    match kind {
        ImportKind::Players => {
            if !(3..=4).contains(&cells.len()) {
                return Err(format!(
                    "expected 3 or 4 columns (name, phone, size, position), got {}",
                    cells.len()
                ));
            }
            let player = NewPlayer {
                name: cell(cells, 0).unwrap_or_default().to_owned(),
                phone: cell(cells, 1).unwrap_or_default().to_owned(),
                size: cell(cells, 2).unwrap_or_default().to_owned(),
                position: cell(cells, 3).map(ToOwned::to_owned),
            };
            let phone = player.validate().map_err(|e| e.to_string())?;
            Ok(ImportRow::Player(player, phone))
        }
        ImportKind::Teams => {
            if cells.len() != 1 {
                return Err(format!("expected 1 column (name), got {}", cells.len()));
            }
            cell(cells, 0)
                .map(|name| ImportRow::Team(name.to_owned()))
                .ok_or_else(|| "name required".to_owned())
        }
    }
}

/// Splits the rows into the valid ones, with their index, and the errors.
pub fn parse_rows(
    kind: ImportKind,
    rows: &[Vec<String>],
) -> (Vec<(usize, ImportRow)>, Vec<RowError>) {
    let mut valid = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();

    for (row, cells) in rows.iter().enumerate() {
        match parse_row(kind, cells) {
            Ok(parsed) => valid.push((row, parsed)),
            Err(message) => errors.push(RowError { row, message }),
        }
    }

    (valid, errors)
}

/// Validates and inserts the provided rows.
///
/// Fails with [`LeagueError::Validation`] if there are more than [`MAX_IMPORT_ROWS`] rows.
/// Otherwise, every rejected row is listed in the returned report, and the valid rows are
/// inserted in a single transaction.
pub async fn import_rows<C>(
    conn: &C,
    kind: ImportKind,
    rows: &[Vec<String>],
) -> LeagueResult<ImportReport>
where
    C: ConnectionTrait + TransactionTrait,
{
    if rows.is_empty() {
        return Err(LeagueError::Validation("rows required".to_owned()));
    }
    if rows.len() > MAX_IMPORT_ROWS {
        return Err(LeagueError::Validation(format!(
            "too many rows ({}), the maximum is {MAX_IMPORT_ROWS}",
            rows.len()
        )));
    }

    let (valid, mut errors) = parse_rows(kind, rows);

    let txn = conn.begin().await?;
    let mut inserted = 0;

    match kind {
        ImportKind::Players => {
            for (_, row) in valid {
                if let ImportRow::Player(player, phone) = row {
                    user::insert_placeholder_player(&txn, &player, phone).await?;
                    inserted += 1;
                }
            }
        }
        ImportKind::Teams => {
            let names = valid
                .iter()
                .filter_map(|(_, row)| match row {
                    ImportRow::Team(name) => Some(name.clone()),
                    ImportRow::Player(..) => None,
                })
                .collect::<Vec<_>>();

            let mut taken = teams::Entity::find()
                .filter(teams::Column::Name.is_in(names))
                .select_only()
                .column(teams::Column::Name)
                .into_tuple::<String>()
                .all(&txn)
                .await?
                .into_iter()
                .collect::<HashSet<_>>();

            let mut new_teams = Vec::new();
            for (row, parsed) in valid {
                let ImportRow::Team(name) = parsed else {
                    continue;
                };
                if !taken.insert(name.clone()) {
                    errors.push(RowError {
                        row,
                        message: LeagueError::TeamAlreadyExists(name).to_string(),
                    });
                    continue;
                }
                new_teams.push(teams::ActiveModel {
                    id: NotSet,
                    name: Set(name),
                });
            }

            inserted = new_teams.len();
            if !new_teams.is_empty() {
                teams::Entity::insert_many(new_teams)
                    .exec_without_returning(&txn)
                    .await?;
            }
        }
    }

    txn.commit().await?;

    errors.sort_by_key(|e| e.row);

    tracing::info!(
        "Imported {inserted} {kind:?} row(s), rejected {}",
        errors.len()
    );

    Ok(ImportReport { inserted, errors })
}
