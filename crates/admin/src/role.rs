use entity::types::Role;
use league_lib::{Database, user};

#[derive(clap::Subcommand)]
pub enum RoleCommand {
    /// Gives the admin role to a user.
    Promote {
        /// The ID of the user.
        user_id: String,
    },

    /// Takes the admin role back from a user.
    Demote {
        /// The ID of the user.
        user_id: String,
    },
}

pub async fn role(db: Database, cmd: RoleCommand) -> anyhow::Result<()> {
    let (user_id, role) = match cmd {
        RoleCommand::Promote { user_id } => (user_id, Role::Admin),
        RoleCommand::Demote { user_id } => (user_id, Role::User),
    };

    tracing::info!("Setting role of user `{user_id}` to {role}");
    let user = user::set_role(&db.sql_conn, &user_id, role).await?;

    let mut table = prettytable::Table::init(vec![prettytable::row!["ID", "Name", "Role"]]);
    table.add_row(prettytable::row![user.id, user.name, user.role]);
    println!("{table}");

    Ok(())
}
