//! Weather collaborator used to snapshot the day's weather onto new todos.
//!
//! The production source is a JSON document listing one entry per calendar
//! day (`[{"date": "01-15", "weather": "Sunny"}, ...]`). The value is treated
//! as an opaque string; nothing downstream parses it.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::WeatherConfig;

/// Errors from the weather lookup.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The weather service returned a non-2xx status code.
    #[error("Weather service returned HTTP {0}")]
    Status(u16),

    /// The document had no entry for the requested day.
    #[error("No weather entry for {0}")]
    NotFound(String),
}

/// Source of today's weather.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn today_weather(&self) -> Result<String, WeatherError>;
}

/// One day in the weather document.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherEntry {
    /// Day of year as `MM-dd`.
    pub date: String,
    pub weather: String,
}

/// HTTP client for the weather document.
pub struct HttpWeatherClient {
    client: reqwest::Client,
    url: String,
}

impl HttpWeatherClient {
    /// Build a client with the configured per-request timeout.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    async fn fetch_entries(&self) -> Result<Vec<WeatherEntry>, WeatherError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        Ok(response.json::<Vec<WeatherEntry>>().await?)
    }
}

#[async_trait]
impl WeatherProvider for HttpWeatherClient {
    async fn today_weather(&self) -> Result<String, WeatherError> {
        let entries = self.fetch_entries().await?;
        let today = chrono::Local::now().date_naive();
        let weather = weather_for(&entries, today)?;
        tracing::debug!(%today, %weather, "Resolved today's weather");
        Ok(weather)
    }
}

/// Pick the entry for `day`, matching on its `MM-dd` key.
pub fn weather_for(entries: &[WeatherEntry], day: NaiveDate) -> Result<String, WeatherError> {
    let key = day.format("%m-%d").to_string();
    entries
        .iter()
        .find(|entry| entry.date == key)
        .map(|entry| entry.weather.clone())
        .ok_or(WeatherError::NotFound(key))
}
