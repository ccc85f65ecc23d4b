const DEFAULT_DATABASE_PATH: &str = "getrankd.db";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSettings {
    pub starting_rating: f64,
    /// Per-pair K-factor before it is split across the opponents of a match.
    pub k_factor: f64,
    /// Rating difference at which the stronger side is expected to score 10:1.
    pub rating_scale: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            starting_rating: 1500.0,
            k_factor: 32.0,
            rating_scale: 400.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSettings {
    pub path: String,
    pub pool_size: u32,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string()),
            pool_size: 8,
            busy_timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub recent_matches_limit: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            recent_matches_limit: 10,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub database: DatabaseSettings,
    pub server: ServerSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the database location, e.g. from a `--database` flag.
    pub fn with_database_path(mut self, path: Option<String>) -> Self {
        if let Some(path) = path {
            self.database.path = path;
        }
        self
    }
}
