//! Projection of fetched weather data into the shape handed to a renderer.

use std::collections::HashSet;

use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::model::{DailyForecast, ForecastEntry, UnitSystem, WeatherReport};

/// Upper bound on the number of days kept by [`reduce_to_daily_forecast`].
pub const MAX_FORECAST_DAYS: usize = 5;

/// Keep the first entry seen for each calendar date in `tz`, in encounter order,
/// capped at [`MAX_FORECAST_DAYS`].
///
/// Later samples for an already-seen date are dropped; nothing is averaged.
pub fn reduce_to_daily_forecast<Tz: TimeZone>(
    entries: &[ForecastEntry],
    tz: &Tz,
) -> Vec<DailyForecast> {
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    let mut daily = Vec::with_capacity(MAX_FORECAST_DAYS);

    for entry in entries {
        let date = entry.timestamp.with_timezone(tz).date_naive();
        if !seen.insert(date) {
            continue;
        }

        daily.push(DailyForecast {
            date,
            temp_max: entry.temp_max,
            temp_min: entry.temp_min,
            description: entry.description.clone(),
            icon_id: entry.icon_id.clone(),
        });

        if daily.len() == MAX_FORECAST_DAYS {
            break;
        }
    }

    daily
}

/// Round half toward positive infinity, so `-2.5` becomes `-2` and `2.5` becomes `3`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentView {
    pub city_name: String,
    pub country_code: String,
    pub temperature: i64,
    pub feels_like: i64,
    pub description: String,
    pub icon_id: String,
    pub humidity: u8,
    pub wind_speed: i64,
    pub pressure: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyView {
    pub date: NaiveDate,
    pub temp_max: i64,
    pub temp_min: i64,
    pub description: String,
    pub icon_id: String,
}

/// Everything a renderer needs for one successful query cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub units: UnitSystem,
    pub current: CurrentView,
    pub forecast: Vec<DailyView>,
}

impl DisplayModel {
    pub fn project(report: &WeatherReport, units: UnitSystem) -> Self {
        let current = &report.current;

        let current = CurrentView {
            city_name: current.city_name.clone(),
            country_code: current.country_code.clone(),
            temperature: round_half_up(current.temperature),
            feels_like: round_half_up(current.feels_like),
            description: current.description.clone(),
            icon_id: current.icon_id.clone(),
            humidity: current.humidity,
            wind_speed: round_half_up(units.wind_speed_for_display(current.wind_speed)),
            pressure: current.pressure,
        };

        let forecast = report
            .forecast
            .iter()
            .map(|day| DailyView {
                date: day.date,
                temp_max: round_half_up(day.temp_max),
                temp_min: round_half_up(day.temp_min),
                description: day.description.clone(),
                icon_id: day.icon_id.clone(),
            })
            .collect();

        Self {
            units,
            current,
            forecast,
        }
    }
}
