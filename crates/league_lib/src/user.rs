//! Identities and players, as seen by the accounts and admin operations.

use entity::{players, types::Role, users};
use sea_orm::{
    ActiveModelTrait as _, ActiveValue::Set, ColumnTrait as _, ConnectionTrait, EntityTrait as _,
    IntoActiveModel as _, QueryFilter as _, QuerySelect as _, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{LeagueError, LeagueResult},
    gen_id, must, phone,
};

/// An identity, as resolved from a bearer token by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// The identity ID.
    pub id: String,
    /// The email of the user.
    #[serde(default)]
    pub email: Option<String>,
    /// The phone number of the user, not normalized.
    #[serde(default)]
    pub phone: Option<String>,
    /// The display name of the user.
    #[serde(default)]
    pub name: Option<String>,
}

impl Identity {
    fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| {
                self.email
                    .as_deref()
                    .and_then(|email| email.split('@').next())
                    .map(ToOwned::to_owned)
            })
            .unwrap_or_default()
    }
}

/// Returns the normalized phone number, or `None` if nothing remains after normalization.
fn normalized_phone(raw: Option<&str>) -> Option<String> {
    raw.map(phone::normalize).filter(|p| !p.is_empty())
}

/// Inserts or updates the identity row of the provided identity.
///
/// New rows get the [`Role::User`] role. The email of an already claimed row isn't overwritten:
/// a different email is stored as a pending change in `new_email` instead.
pub async fn sync_identity<C: ConnectionTrait>(
    conn: &C,
    identity: &Identity,
) -> LeagueResult<users::Model> {
    let phone = normalized_phone(identity.phone.as_deref());

    let Some(existing) = users::Entity::find_by_id(&identity.id).one(conn).await? else {
        let user = users::ActiveModel {
            id: Set(identity.id.clone()),
            email: Set(identity.email.clone()),
            new_email: Set(None),
            phone: Set(phone),
            name: Set(identity.display_name()),
            role: Set(Role::User),
        }
        .insert(conn)
        .await?;

        tracing::info!("Inserted new identity `{}`", user.id);
        return Ok(user);
    };

    let mut user = existing.clone().into_active_model();

    match (&existing.email, &identity.email) {
        (None, Some(email)) => user.email = Set(Some(email.clone())),
        (Some(current), Some(email)) if current != email => {
            user.new_email = Set(Some(email.clone()))
        }
        (Some(_), _) => user.new_email = Set(None),
        (None, None) => {}
    }

    if phone.is_some() {
        user.phone = Set(phone);
    }
    if let Some(name) = &identity.name {
        user.name = Set(name.clone());
    }

    Ok(user.update(conn).await?)
}

/// The input of a new placeholder player.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayer {
    /// The name of the player.
    pub name: String,
    /// The phone number of the player, used later to match them when they sign up.
    pub phone: String,
    /// The physical size of the player.
    pub size: String,
    /// The usual position of the player.
    #[serde(default)]
    pub position: Option<String>,
}

impl NewPlayer {
    /// Checks the fields, and returns the normalized phone number.
    pub fn validate(&self) -> LeagueResult<String> {
        if self.name.trim().is_empty() {
            return Err(LeagueError::Validation("name required".to_owned()));
        }
        if self.size.trim().is_empty() {
            return Err(LeagueError::Validation("size required".to_owned()));
        }
        let phone = phone::normalize(&self.phone);
        if phone.is_empty() {
            return Err(LeagueError::Validation("phone required".to_owned()));
        }
        Ok(phone)
    }
}

/// The IDs of a newly created placeholder player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPlayer {
    /// The ID of the player.
    pub player_id: String,
    /// The ID of its placeholder identity.
    pub user_id: String,
}

/// Creates a player owned by a new placeholder identity, with no email.
pub async fn create_placeholder_player<C>(
    conn: &C,
    new_player: &NewPlayer,
) -> LeagueResult<CreatedPlayer>
where
    C: ConnectionTrait + TransactionTrait,
{
    let phone = new_player.validate()?;

    let txn = conn.begin().await?;
    let created = insert_placeholder_player(&txn, new_player, phone).await?;
    txn.commit().await?;

    tracing::info!(
        "Created placeholder player `{}` (identity `{}`)",
        created.player_id,
        created.user_id
    );

    Ok(created)
}

/// Inserts the placeholder identity and its player, without any validation.
pub(crate) async fn insert_placeholder_player<C: ConnectionTrait>(
    conn: &C,
    new_player: &NewPlayer,
    phone: String,
) -> LeagueResult<CreatedPlayer> {
    let user_id = gen_id();
    let player_id = gen_id();

    users::Entity::insert(users::ActiveModel {
        id: Set(user_id.clone()),
        email: Set(None),
        new_email: Set(None),
        phone: Set(Some(phone)),
        name: Set(new_player.name.trim().to_owned()),
        role: Set(Role::User),
    })
    .exec_without_returning(conn)
    .await?;

    players::Entity::insert(players::ActiveModel {
        id: Set(player_id.clone()),
        user_id: Set(user_id.clone()),
        size: Set(new_player.size.trim().to_owned()),
        position: Set(new_player
            .position
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToOwned::to_owned)),
    })
    .exec_without_returning(conn)
    .await?;

    Ok(CreatedPlayer { player_id, user_id })
}

/// Returns the role of the identity, or `None` if it isn't in the database.
pub async fn role_of<C: ConnectionTrait>(conn: &C, user_id: &str) -> LeagueResult<Option<Role>> {
    let role = users::Entity::find_by_id(user_id)
        .select_only()
        .column(users::Column::Role)
        .into_tuple::<Role>()
        .one(conn)
        .await?;
    Ok(role)
}

/// Sets the role of the identity.
pub async fn set_role<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    role: Role,
) -> LeagueResult<users::Model> {
    let user = must::have_user(conn, user_id).await?;
    if user.role == role {
        return Ok(user);
    }

    let mut user = user.into_active_model();
    user.role = Set(role);
    let user = user.update(conn).await?;

    tracing::info!("Identity `{}` now has the {:?} role", user.id, user.role);

    Ok(user)
}

/// Returns the player owned by the provided identity, if any.
pub async fn owned_player<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> LeagueResult<Option<players::Model>> {
    let player = players::Entity::find()
        .filter(players::Column::UserId.eq(user_id))
        .one(conn)
        .await?;
    Ok(player)
}
