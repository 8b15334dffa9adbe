use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// Lifetime of an issued session token
    pub session_ttl_hours: i64,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://library.db?mode=rwc".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .filter(|h: &i64| *h > 0)
                .unwrap_or(8),
            seed_demo: env::var("SEED_DEMO").is_ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            port: 8000,
            cors_allowed_origins: Vec::new(),
            session_ttl_hours: 8,
            seed_demo: false,
        }
    }
}
