use league_lib::DbEnv;
use mkenv::{error::ConfigInitError, prelude::*};
use once_cell::sync::OnceCell;

#[cfg(not(debug_assertions))]
mkenv::make_config! {
    pub struct AuthKeyEnv {
        pub auth_api_key: {
            var_name: "LEAGUE_AUTH_API_KEY_FILE",
            layers: [file_read()],
            description: "The path to the file containing the API key of the identity provider",
        },
    }
}

#[cfg(debug_assertions)]
mkenv::make_config! {
    pub struct AuthKeyEnv {
        pub auth_api_key: {
            var_name: "LEAGUE_AUTH_API_KEY",
            layers: [or_default()],
            description: "The API key of the identity provider",
            default_val_fmt: "empty",
        },
    }
}

#[cfg(debug_assertions)]
mkenv::make_config! {
    pub struct Hostname {}
}

#[cfg(not(debug_assertions))]
mkenv::make_config! {
    pub struct Hostname {
        pub host: {
            var_name: "LEAGUE_API_HOST",
            description: "The origin of the website using the API (e.g. https://league.example.com)",
        }
    }
}

mkenv::make_config! {
    pub struct ApiEnv {
        pub db_env: { DbEnv },

        pub auth_key: { AuthKeyEnv },

        pub auth_url: {
            var_name: "LEAGUE_AUTH_URL",
            description: "The base URL of the identity provider (e.g. https://auth.example.com/auth/v1)",
        },

        pub port: {
            var_name: "LEAGUE_API_PORT",
            layers: [
                parsed_from_str<u16>(),
                or_default_val(|| 3000),
            ],
            description: "The port used to expose the API",
            default_val_fmt: "3000",
        },

        pub host: { Hostname },

        pub identity_cache_ttl: {
            var_name: "LEAGUE_API_IDENTITY_CACHE_TTL",
            layers: [
                parsed_from_str<u64>(),
                or_default_val(|| 60),
            ],
            description: "The TTL (time-to-live) of a cached identity resolved from a bearer token (in seconds)",
            default_val_fmt: "60",
        },
    }
}

static ENV: OnceCell<ApiEnv> = OnceCell::new();

/// Returns the environment of the API.
///
/// # Panics
///
/// If [`init_env`] wasn't called before.
pub fn env() -> &'static ApiEnv {
    ENV.get()
        .unwrap_or_else(|| panic!("environment of the API must be initialized"))
}

/// Reads the environment of the API, and stores it globally.
pub fn init_env() -> anyhow::Result<&'static ApiEnv> {
    fn map_err(err: ConfigInitError<'_>) -> anyhow::Error {
        anyhow::anyhow!("{err}")
    }

    let env = ApiEnv::define();
    env.try_init().map_err(map_err)?;
    Ok(ENV.get_or_init(|| env))
}
