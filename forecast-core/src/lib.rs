//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap provider and the fetch cycle over it
//! - Daily forecast reduction and the display model handed to renderers
//! - The query lifecycle owning the currently displayed state
//!
//! It is used by `forecast-cli`, but can also be reused by other shells.

pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod provider;
pub mod session;
pub mod view;

pub use config::Config;
pub use error::WeatherError;
pub use fetch::{fetch_weather, fetch_weather_in};
pub use model::{CurrentConditions, DailyForecast, ForecastEntry, Query, UnitSystem, WeatherReport};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use session::{QueryState, WeatherSession};
pub use view::{DisplayModel, MAX_FORECAST_DAYS, reduce_to_daily_forecast};
