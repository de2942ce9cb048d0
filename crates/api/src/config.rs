use std::time::Duration;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Weather collaborator endpoint and timeout.
    pub weather: WeatherConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            weather: WeatherConfig::from_env(),
        }
    }
}

/// Default weather endpoint: a static JSON list of `{date, weather}` entries.
const DEFAULT_WEATHER_URL: &str = "https://f-api.github.io/f-api/weather.json";

/// Default timeout for one weather lookup, in seconds.
const DEFAULT_WEATHER_TIMEOUT_SECS: u64 = 10;

/// Configuration for the HTTP weather collaborator.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub url: String,
    pub timeout: Duration,
}

impl WeatherConfig {
    /// Load weather settings from environment variables.
    ///
    /// | Env Var                | Default                                     |
    /// |------------------------|---------------------------------------------|
    /// | `WEATHER_API_URL`      | `https://f-api.github.io/f-api/weather.json` |
    /// | `WEATHER_TIMEOUT_SECS` | `10`                                        |
    pub fn from_env() -> Self {
        let url = std::env::var("WEATHER_API_URL").unwrap_or_else(|_| DEFAULT_WEATHER_URL.into());

        let timeout_secs: u64 = std::env::var("WEATHER_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_WEATHER_TIMEOUT_SECS.to_string())
            .parse()
            .expect("WEATHER_TIMEOUT_SECS must be a valid u64");

        Self {
            url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
