use sea_orm::entity::prelude::*;

use crate::types::Role;

/// An identity in the database.
///
/// An identity either comes from the identity provider, when a real user signed in,
/// or was created by an admin as a placeholder for a player who hasn't signed up yet.
/// Placeholders have no email.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// The identity ID, issued by the identity provider or generated for placeholders.
    #[sea_orm(
        primary_key,
        auto_increment = false,
        column_type = "String(StringLen::N(64))"
    )]
    pub id: String,
    /// The email of the identity. `None` means the identity is a placeholder.
    #[sea_orm(unique)]
    pub email: Option<String>,
    /// An email change waiting for confirmation.
    pub new_email: Option<String>,
    /// The normalized phone number, used to match placeholders with real users.
    pub phone: Option<String>,
    /// The display name.
    pub name: String,
    /// The role of the identity.
    pub role: Role,
}

impl Model {
    /// Returns whether this identity belongs to a real user.
    #[inline]
    pub fn is_claimed(&self) -> bool {
        self.email.is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::players::Entity")]
    Players,
}

impl Related<super::players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Players.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
