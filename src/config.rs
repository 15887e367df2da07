use std::env;
use std::fmt;

/// Runtime settings, read once at startup and shared through `web::Data`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid(key, value) => write!(f, "{} has an invalid value: {}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    /// Loads settings from the process environment (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET", "empty".to_string()));
        }

        let token_ttl_hours = match env::var("TOKEN_TTL_HOURS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|hours| *hours > 0)
                .ok_or(ConfigError::Invalid("TOKEN_TTL_HOURS", raw))?,
            Err(_) => 24 * 7,
        };

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|cost| (4..=31).contains(cost))
                .ok_or(ConfigError::Invalid("BCRYPT_COST", raw))?,
            Err(_) => 10,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://workout.db".to_string()),
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            jwt_secret,
            token_ttl_hours,
            bcrypt_cost,
        })
    }
}
