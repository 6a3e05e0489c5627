//! The league API library.
//!
//! It contains the request handlers of the API, the authentication with the identity provider,
//! and the mapping of the errors of the [`league_lib`] crate to HTTP responses. The program
//! itself only reads the environment and starts the server.

pub mod auth;
pub mod configure;
mod env;
mod error;
mod http;
mod must;
mod utils;

pub use auth::{
    AuthGuard, IdentityProvider, RemoteIdentityProvider, SharedIdentityProvider,
    StaticIdentityProvider,
};
pub use env::*;
pub use error::*;
pub use http::api_route;
pub use utils::*;
