use crate::{
    Config,
    error::WeatherError,
    model::{CurrentConditions, ForecastEntry, Query},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::debug;

pub mod openweather;

/// Source of the two read-only datasets a query cycle needs.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_conditions(&self, query: &Query) -> Result<CurrentConditions, WeatherError>;

    /// 3-hour forecast slots in ascending time order.
    async fn forecast_entries(&self, query: &Query) -> Result<Vec<ForecastEntry>, WeatherError>;
}

/// Construct the OpenWeatherMap provider from config.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let api_key = config.api_key().ok_or_else(|| {
        WeatherError::Config(
            "No API key configured.\n\
             Hint: run `forecast configure` or set OPENWEATHER_API_KEY."
                .to_string(),
        )
    })?;

    let provider = OpenWeatherProvider::new(api_key.to_owned())
        .with_base_url(&config.base_url)
        .with_lang(&config.lang);
    debug!(base_url = provider.base_url(), "Using OpenWeather provider");

    Ok(Box::new(provider))
}
