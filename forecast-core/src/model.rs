use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Measurement convention requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Value of the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    pub fn wind_speed_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "km/h",
            UnitSystem::Imperial => "mph",
        }
    }

    /// Convert a provider wind speed to the unit named by [`Self::wind_speed_label`].
    ///
    /// The provider reports metric wind speed in m/s and imperial in mph.
    pub fn wind_speed_for_display(&self, provider_speed: f64) -> f64 {
        match self {
            UnitSystem::Metric => provider_speed * 3.6,
            UnitSystem::Imperial => provider_speed,
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial]
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(format!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// A single location lookup. The location is trimmed and never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    location: String,
    units: UnitSystem,
}

impl Query {
    pub fn new(location: &str, units: UnitSystem) -> Result<Self, WeatherError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(WeatherError::EmptyLocation);
        }

        Ok(Self {
            location: location.to_string(),
            units,
        })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city_name: String,
    pub country_code: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub description: String,
    pub icon_id: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub pressure: u32,
}

/// One 3-hour slot of the provider forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temp_max: f64,
    pub temp_min: f64,
    pub description: String,
    pub icon_id: String,
}

/// The first forecast slot seen for a calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temp_max: f64,
    pub temp_min: f64,
    pub description: String,
    pub icon_id: String,
}

/// Result of one successful fetch: current conditions plus the daily reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
}
