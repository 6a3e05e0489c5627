use std::fmt;

use actix_web::{HttpResponse, http::StatusCode};
use league_lib::error::LeagueError;
use tracing_actix_web::RequestId;

/// The message sent to the clients in place of any internal error.
const MASKED_MESSAGE: &str = "internal error";

#[derive(thiserror::Error, Debug)]
#[rustfmt::skip]
pub enum ApiErrorKind {
    // Caution: when creating a new error, you must ensure its code isn't
    // in conflict with another one in `get_err_type_and_status_code`.

    // --------
    // --- Internal server errors
    // --------

    #[error("error when requesting the identity provider: {0}")]
    IdentityProvider(#[from] reqwest::Error),
    #[error("identity provider responded with status {0}")]
    IdentityProviderStatus(reqwest::StatusCode),
    #[error("invalid cached identity: {0}")]
    CachedIdentity(#[from] serde_json::Error),

    // --------
    // --- Authentication errors
    // --------

    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,

    // --------
    // --- Logical errors
    // --------

    #[error("not found")]
    EndpointNotFound,
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Lib(#[from] LeagueError),
}

impl ApiErrorKind {
    /// Returns the error code sent to the clients, and the HTTP status of the response.
    pub fn get_err_type_and_status_code(&self) -> (i32, StatusCode) {
        use ApiErrorKind as E;
        use LeagueError as LE;
        use StatusCode as S;

        match self {
            E::Lib(LE::DbError(_)) => (101, S::INTERNAL_SERVER_ERROR),
            E::Lib(LE::Redis(_)) => (102, S::INTERNAL_SERVER_ERROR),
            E::Lib(LE::PoolError(_)) => (103, S::INTERNAL_SERVER_ERROR),
            E::Lib(LE::Internal(_)) => (104, S::INTERNAL_SERVER_ERROR),
            E::Lib(LE::InvalidState(_)) => (105, S::INTERNAL_SERVER_ERROR),
            E::IdentityProvider(_) => (106, S::INTERNAL_SERVER_ERROR),
            E::IdentityProviderStatus(_) => (107, S::INTERNAL_SERVER_ERROR),
            E::CachedIdentity(_) => (108, S::INTERNAL_SERVER_ERROR),

            E::Unauthorized => (201, S::UNAUTHORIZED),
            E::Forbidden => (202, S::FORBIDDEN),

            E::EndpointNotFound => (301, S::NOT_FOUND),
            E::Lib(LE::PlayerNotFound(_)) => (302, S::NOT_FOUND),
            E::Lib(LE::UserNotFound(_)) => (303, S::NOT_FOUND),
            E::Lib(LE::MatchNotFound(_)) => (304, S::NOT_FOUND),
            E::Lib(LE::StatsNotFound(_)) => (305, S::NOT_FOUND),

            E::InvalidRequest(_) => (401, S::BAD_REQUEST),
            E::Lib(LE::Validation(_)) => (402, S::BAD_REQUEST),
            E::Lib(LE::StatFloor(_)) => (403, S::BAD_REQUEST),

            E::Lib(LE::PlayerNotUnclaimed) => (501, S::CONFLICT),
            E::Lib(LE::PhoneMismatch) => (502, S::CONFLICT),
            E::Lib(LE::CallerAlreadyOwnsPlayer) => (503, S::CONFLICT),
            E::Lib(LE::ConcurrentClaim) => (504, S::CONFLICT),
            E::Lib(LE::MatchNotOngoing(_)) => (505, S::CONFLICT),
            E::Lib(LE::IllegalTransition { .. }) => (506, S::CONFLICT),
            E::Lib(LE::ConcurrentStatusChange) => (507, S::CONFLICT),
            E::Lib(LE::TeamAlreadyExists(_)) => (508, S::CONFLICT),
        }
    }

    /// Returns whether the message of the error must be hidden from the clients.
    pub(crate) fn is_masked(&self) -> bool {
        use ApiErrorKind as E;
        use LeagueError as LE;

        matches!(
            self,
            E::IdentityProvider(_)
                | E::IdentityProviderStatus(_)
                | E::CachedIdentity(_)
                | E::Lib(LE::DbError(_) | LE::Redis(_) | LE::PoolError(_) | LE::Internal(_))
        )
    }
}

/// An error bound to the ID of the request that produced it.
#[derive(Debug)]
pub struct ApiError {
    pub request_id: RequestId,
    pub kind: ApiErrorKind,
}

impl fmt::Display for ApiError {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub request_id: String,
    pub r#type: i32,
    pub error: String,
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.kind.get_err_type_and_status_code().1
    }

    fn error_response(&self) -> HttpResponse {
        let (r#type, status_code) = self.kind.get_err_type_and_status_code();

        let error = if self.kind.is_masked() {
            tracing::error!(
                request_id = %self.request_id,
                "Internal error (type {type}): {}",
                self.kind
            );
            MASKED_MESSAGE.to_owned()
        } else {
            if status_code.is_server_error() {
                tracing::error!(request_id = %self.request_id, "{}", self.kind);
            }
            self.kind.to_string()
        };

        HttpResponse::build(status_code).json(ErrorResponse {
            request_id: self.request_id.to_string(),
            r#type,
            error,
        })
    }
}

pub type ApiResult<T> = Result<T, ApiErrorKind>;

pub type ApiResponse<T> = Result<T, ApiError>;

/// Binds the error of a result to the ID of the current request.
pub trait FitRequestId<T> {
    fn fit(self, request_id: RequestId) -> ApiResponse<T>;
}

impl<T, E> FitRequestId<T> for Result<T, E>
where
    ApiErrorKind: From<E>,
{
    fn fit(self, request_id: RequestId) -> ApiResponse<T> {
        self.map_err(|e| ApiError {
            request_id,
            kind: e.into(),
        })
    }
}

/// Converts a `Result<T, E>` in which `E` is convertible to [`LeagueError`]
/// into an [`ApiResult<T>`].
pub trait LeagueResultExt<T> {
    fn with_api_err(self) -> ApiResult<T>;
}

impl<T, E> LeagueResultExt<T> for Result<T, E>
where
    LeagueError: From<E>,
{
    fn with_api_err(self) -> ApiResult<T> {
        self.map_err(LeagueError::from).map_err(Into::into)
    }
}
