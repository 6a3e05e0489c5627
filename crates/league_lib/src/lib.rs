//! The main crate of the league API infrastructure.
//!
//! This crate contains everything the services of the league share: the environment setup,
//! the database pools, and the domain operations, like the claim of a placeholder player
//! or the live stat ledger of a match.
//!
//! If you wish to see the crate of the server program itself, take a look
//! at the [`league_api`](../league_api_lib/index.html) package.

#![warn(missing_docs)]

mod env;

pub mod aggregate;
pub mod claim;
pub mod error;
pub mod import;
pub mod ledger;
pub mod match_status;
pub mod must;
pub mod phone;
pub mod pool;
pub mod redis_key;
pub mod user;

/// The Redis pool type.
pub type RedisPool = deadpool_redis::Pool;

pub use env::*;
pub use pool::Database;

use rand::Rng as _;

/// Returns a randomly-generated string with the `len` length. It contains alphanumeric characters.
pub fn gen_random_str(len: usize) -> String {
    rand::rng()
        .sample_iter(rand::distr::Alphanumeric)
        .map(char::from)
        .take(len)
        .collect()
}

/// Returns a new random ID, used for players and placeholder identities.
pub fn gen_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
