//! The authentication system.
//!
//! The API doesn't issue any session by itself. Every request that needs authentication carries
//! an `Authorization: Bearer <token>` header, with a token issued by the external identity
//! provider. The token is resolved into an [`Identity`] by an [`IdentityProvider`].
//!
//! For the routes reserved to the admins, the role of the caller is read from the database on
//! each request, so a promotion or a demotion takes effect immediately.

use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};
use deadpool_redis::redis::AsyncCommands as _;
use entity::types::Role;
use futures::future::BoxFuture;
use league_lib::{Database, RedisPool, redis_key::identity_key, user::Identity};
use tracing_actix_web::RequestId;

use crate::{ApiErrorKind, ApiResponse, ApiResult, FitRequestId as _, LeagueResultExt as _, must};

#[allow(dead_code)] // Allow unused flags
pub mod privilege {
    pub type Flags = u8;

    pub const USER: Flags = 0b01;
    pub const ADMIN: Flags = 0b11;
}

/// Resolves a bearer token into the identity of the caller.
pub trait IdentityProvider: Send + Sync {
    /// Returns the identity bound to the provided token, or `None` if the token isn't valid.
    fn current_identity<'a>(
        &'a self,
        token: &'a str,
    ) -> BoxFuture<'a, ApiResult<Option<Identity>>>;
}

/// The identity provider shared by the request handlers.
pub type SharedIdentityProvider = Arc<dyn IdentityProvider>;

/// The identity provider used in production, which requests the external service.
///
/// The resolved identities are cached in Redis, with the SHA-256 digest of the token as key.
pub struct RemoteIdentityProvider {
    client: reqwest::Client,
    auth_url: String,
    api_key: String,
    cache: Option<IdentityCache>,
}

struct IdentityCache {
    redis_pool: RedisPool,
    ttl: u64,
}

impl RemoteIdentityProvider {
    pub fn new(client: reqwest::Client, auth_url: String, api_key: String) -> Self {
        Self {
            client,
            auth_url: auth_url.trim_end_matches('/').to_owned(),
            api_key,
            cache: None,
        }
    }

    /// Caches the resolved identities in Redis for `ttl` seconds.
    pub fn with_cache(mut self, redis_pool: RedisPool, ttl: u64) -> Self {
        self.cache = (ttl > 0).then_some(IdentityCache { redis_pool, ttl });
        self
    }

    async fn fetch(&self, token: &str) -> ApiResult<Option<Identity>> {
        let res = self
            .client
            .get(format!("{}/user", self.auth_url))
            .bearer_auth(token)
            .header("apikey", &self.api_key)
            .send()
            .await?;

        match res.status() {
            s if s.is_success() => Ok(Some(res.json().await?)),
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => Ok(None),
            s => Err(ApiErrorKind::IdentityProviderStatus(s)),
        }
    }

    async fn resolve(&self, token: &str) -> ApiResult<Option<Identity>> {
        let Some(cache) = &self.cache else {
            return self.fetch(token).await;
        };

        let digest = sha256::digest(token);
        let key = identity_key(&digest);
        let mut redis_conn = cache.redis_pool.get().await.with_api_err()?;

        let cached: Option<String> = redis_conn.get(&key).await.with_api_err()?;
        if let Some(cached) = cached {
            return Ok(Some(serde_json::from_str(&cached)?));
        }

        let identity = self.fetch(token).await?;
        if let Some(identity) = &identity {
            let _: () = redis_conn
                .set_ex(&key, serde_json::to_string(identity)?, cache.ttl)
                .await
                .with_api_err()?;
        }

        Ok(identity)
    }
}

impl IdentityProvider for RemoteIdentityProvider {
    fn current_identity<'a>(
        &'a self,
        token: &'a str,
    ) -> BoxFuture<'a, ApiResult<Option<Identity>>> {
        Box::pin(self.resolve(token))
    }
}

/// An identity provider with a fixed set of tokens, used for tests and local runs.
#[derive(Default)]
pub struct StaticIdentityProvider {
    identities: HashMap<String, Identity>,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the provided token to the identity.
    pub fn with(mut self, token: impl Into<String>, identity: Identity) -> Self {
        self.identities.insert(token.into(), identity);
        self
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn current_identity<'a>(
        &'a self,
        token: &'a str,
    ) -> BoxFuture<'a, ApiResult<Option<Identity>>> {
        let identity = self.identities.get(token).cloned();
        Box::pin(async move { Ok(identity) })
    }
}

/// Returns the bearer token of the request, if any.
fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToOwned::to_owned)
}

/// An extractor that authenticates the caller, and checks that they have the required role.
pub struct AuthGuard<const ROLE: privilege::Flags = { privilege::USER }> {
    pub identity: Identity,
}

impl<const MIN_ROLE: privilege::Flags> FromRequest for AuthGuard<MIN_ROLE> {
    type Error = crate::ApiError;

    type Future = Pin<Box<dyn Future<Output = ApiResponse<Self>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        async fn check<const ROLE: privilege::Flags>(
            request_id: RequestId,
            db: Database,
            provider: SharedIdentityProvider,
            token: Option<String>,
        ) -> ApiResponse<AuthGuard<ROLE>> {
            let Some(token) = token else {
                return Err(ApiErrorKind::Unauthorized).fit(request_id);
            };

            let Some(identity) = provider.current_identity(&token).await.fit(request_id)? else {
                return Err(ApiErrorKind::Unauthorized).fit(request_id);
            };

            if ROLE == privilege::ADMIN {
                let role = league_lib::user::role_of(&db.sql_conn, &identity.id)
                    .await
                    .fit(request_id)?;
                if role != Some(Role::Admin) {
                    tracing::warn!("Identity `{}` tried to access an admin route", identity.id);
                    return Err(ApiErrorKind::Forbidden).fit(request_id);
                }
            }

            Ok(AuthGuard { identity })
        }

        Box::pin(check(
            must::have_request_id(req),
            must::have_db(req),
            must::have_identity_provider(req),
            bearer_token(req),
        ))
    }
}
