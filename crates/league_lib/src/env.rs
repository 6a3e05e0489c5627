#[cfg(debug_assertions)]
mkenv::make_config! {
    /// The environment used to set up a connection to the SQL database.
    pub struct DbUrlEnv {
        /// The database URL.
        pub db_url: {
            var_name: "DATABASE_URL",
            description: "The URL to the SQL database",
        }
    }
}
#[cfg(not(debug_assertions))]
mkenv::make_config! {
    /// The environment used to set up a connection to the SQL database.
    pub struct DbUrlEnv {
        /// The path to the file containing the database URL.
        pub db_url: {
            var_name: "DATABASE_URL",
            layers: [
                file_read(),
            ],
            description: "The path to the file containing the URL to the SQL database",
        }
    }
}

mkenv::make_config! {
    /// The environment used to set up a connection with the Redis database.
    pub struct RedisUrlEnv {
        /// The URL to the Redis database.
        pub redis_url: {
            var_name: "REDIS_URL",
            description: "The URL to the Redis database",
        }
    }
}

mkenv::make_config! {
    /// The environment used to set up a connection to the databases of the API.
    pub struct DbEnv {
        /// The environment for the SQL database.
        pub db_url: { DbUrlEnv },
        /// The environment for the Redis database.
        pub redis_url: { RedisUrlEnv },
    }
}
