//! One query cycle against a [`WeatherProvider`]: current conditions first, then the
//! forecast, reduced to one entry per day.

use chrono::{Local, TimeZone};
use tracing::{debug, info};

use crate::{
    error::WeatherError,
    model::{Query, UnitSystem, WeatherReport},
    provider::WeatherProvider,
    view::reduce_to_daily_forecast,
};

/// Fetch current conditions and the daily forecast, grouping days in local time.
///
/// A blank `location` fails with [`WeatherError::EmptyLocation`] before any request
/// is made.
pub async fn fetch_weather(
    provider: &dyn WeatherProvider,
    location: &str,
    units: UnitSystem,
) -> Result<WeatherReport, WeatherError> {
    let query = Query::new(location, units)?;
    fetch_weather_in(provider, &query, &Local).await
}

/// Same as [`fetch_weather`] with an explicit time zone for calendar dates.
///
/// The forecast request is only issued once current conditions succeeded, and a
/// forecast failure voids the whole cycle.
pub async fn fetch_weather_in<Tz>(
    provider: &dyn WeatherProvider,
    query: &Query,
    tz: &Tz,
) -> Result<WeatherReport, WeatherError>
where
    Tz: TimeZone + Sync,
{
    info!(location = query.location(), units = %query.units(), "Fetching weather");

    let current = provider.current_conditions(query).await?;
    let entries = provider.forecast_entries(query).await?;

    let forecast = reduce_to_daily_forecast(&entries, tz);
    debug!(slots = entries.len(), days = forecast.len(), "Reduced forecast");

    Ok(WeatherReport { current, forecast })
}
