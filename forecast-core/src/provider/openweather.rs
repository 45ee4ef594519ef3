use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Deserializer, de};
use tracing::{debug, instrument, warn};

use crate::{
    error::WeatherError,
    model::{CurrentConditions, ForecastEntry, Query},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_LANG: &str = "en";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    lang: String,
    http: Client,
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .field("lang", &self.lang)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: DEFAULT_LANG.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = lang.to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base}/{endpoint}` for the query. Returns the status and raw body.
    async fn get(&self, endpoint: &str, query: &Query) -> Result<(u16, String), WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(url = %url, "Requesting OpenWeather data");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query.location()),
                ("appid", self.api_key.as_str()),
                ("units", query.units().as_str()),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, endpoint, "OpenWeather responded");

        if !status.is_success() {
            warn!(%status, endpoint, body = %truncate_body(&body), "OpenWeather request failed");
        }

        Ok((status.as_u16(), body))
    }
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    #[serde(deserialize_with = "first_condition")]
    weather: OwCondition,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_max: f64,
    temp_min: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastItem {
    #[serde(with = "chrono::serde::ts_seconds")]
    dt: DateTime<Utc>,
    main: OwForecastMain,
    #[serde(deserialize_with = "first_condition")]
    weather: OwCondition,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastItem>,
}

/// The provider sends a list of conditions; only `weather[0]` is used.
fn first_condition<'de, D>(deserializer: D) -> Result<OwCondition, D::Error>
where
    D: Deserializer<'de>,
{
    let mut conditions = Vec::<OwCondition>::deserialize(deserializer)?;
    if conditions.is_empty() {
        return Err(de::Error::invalid_length(0, &"at least one weather condition"));
    }
    Ok(conditions.swap_remove(0))
}

impl From<OwCurrentResponse> for CurrentConditions {
    fn from(parsed: OwCurrentResponse) -> Self {
        CurrentConditions {
            city_name: parsed.name,
            country_code: parsed.sys.country,
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            description: parsed.weather.description,
            icon_id: parsed.weather.icon,
            humidity: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
            pressure: parsed.main.pressure,
        }
    }
}

impl From<OwForecastItem> for ForecastEntry {
    fn from(item: OwForecastItem) -> Self {
        ForecastEntry {
            timestamp: item.dt,
            temp_max: item.main.temp_max,
            temp_min: item.main.temp_min,
            description: item.weather.description,
            icon_id: item.weather.icon,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip_all, fields(location = %query.location(), units = %query.units()))]
    async fn current_conditions(&self, query: &Query) -> Result<CurrentConditions, WeatherError> {
        let (status, body) = self.get("weather", query).await?;
        if !(200..300).contains(&status) {
            return Err(WeatherError::from_current_status(status));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        Ok(parsed.into())
    }

    #[instrument(skip_all, fields(location = %query.location(), units = %query.units()))]
    async fn forecast_entries(&self, query: &Query) -> Result<Vec<ForecastEntry>, WeatherError> {
        let (status, body) = self.get("forecast", query).await?;
        if !(200..300).contains(&status) {
            return Err(WeatherError::from_forecast_status(status));
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body)?;
        debug!(slots = parsed.list.len(), "Parsed forecast");
        Ok(parsed.list.into_iter().map(ForecastEntry::from).collect())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
