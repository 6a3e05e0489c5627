//! This module contains the Redis keys constructors.
//!
//! Redis is only used as a short-lived cache by the league services. For example, the identity
//! resolved from a bearer token is stored under the key returned by [`identity_key`], so the
//! identity provider isn't called on every request.

use core::fmt;

use deadpool_redis::redis::{RedisWrite, ToRedisArgs};

const KEY_PREFIX: &str = "league";

const IDENTITY_KEY_PREFIX: &str = "identity";

macro_rules! create_key {
    (
        $(#[$($attr:tt)*])*
        struct $name:ident$(<$l:lifetime => $_:lifetime>)? = $fn_name:ident {
            $(
                $(#[$($field_attr:tt)*])*
                $field:ident: $field_ty:ty
            ),* $(,)?
        }
        |$self:ident, $f:ident| $fmt_expr:expr
    ) => {
        #[doc = concat!("The `", stringify!($name), "` Redis key.")]
        $(#[$($attr)*])*
        #[derive(Debug)]
        pub struct $name$(<$l>)? {
            $(
                $(#[$($field_attr)*])*
                pub $field: $field_ty
            ),*
        }

        #[doc = concat!("The constructor of the `", stringify!($name), "` Redis key.")]
        #[inline(always)]
        pub fn $fn_name$(<$l>)?($($field: $field_ty),*) -> $name$(<$l>)? {
            $name { $($field),* }
        }

        impl ToRedisArgs for $name$(<$_>)? {
            #[inline(always)]
            fn write_redis_args<W>(&self, out: &mut W)
            where
                W: ?Sized + RedisWrite,
            {
                out.write_arg_fmt(self);
            }
        }

        impl fmt::Display for $name$(<$_>)? {
            fn fmt(&$self, $f: &mut fmt::Formatter<'_>) -> fmt::Result {
                $fmt_expr
            }
        }
    }
}

create_key! {
    ///
    /// The identity key returns a JSON string containing the identity bound to a bearer token.
    /// The token itself is never stored, only its SHA-256 digest.
    struct IdentityKey<'a => '_> = identity_key {
        /// The hex SHA-256 digest of the bearer token.
        token_digest: &'a str,
    }
    |self, f| write!(f, "{KEY_PREFIX}:{IDENTITY_KEY_PREFIX}:{}", self.token_digest)
}
