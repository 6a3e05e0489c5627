use std::fmt;

use sea_orm::entity::prelude::*;

/// The role of an identity.
///
/// Every identity starts as a [`Role::User`]. Admins are promoted manually, with the
/// admin CLI for example.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// A regular user.
    #[default]
    #[sea_orm(string_value = "USER")]
    User,
    /// An admin of the league.
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        })
    }
}
