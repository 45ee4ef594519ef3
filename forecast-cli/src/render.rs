//! Plain-text rendering of a [`DisplayModel`].

use std::fmt::{self, Display};

use chrono::{DateTime, TimeZone};
use forecast_core::DisplayModel;

pub fn render<Tz>(model: &DisplayModel, now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    Rendered { model, now }.to_string()
}

/// A display model paired with the time shown in its header.
struct Rendered<'a, Tz: TimeZone> {
    model: &'a DisplayModel,
    now: DateTime<Tz>,
}

impl<Tz> Display for Rendered<'_, Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.model;
        let temp = model.units.temperature_symbol();
        let wind = model.units.wind_speed_label();
        let current = &model.current;

        writeln!(f, "{}, {}", current.city_name, current.country_code)?;
        writeln!(f, "{}", self.now.format("%A, %B %-d, %Y %H:%M"))?;
        writeln!(f)?;
        writeln!(f, "  {}{temp}  {}", current.temperature, current.description)?;
        writeln!(f, "  Feels like  {}{temp}", current.feels_like)?;
        writeln!(f, "  Humidity    {}%", current.humidity)?;
        writeln!(f, "  Wind        {} {wind}", current.wind_speed)?;
        writeln!(f, "  Pressure    {} hPa", current.pressure)?;

        if model.forecast.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "Forecast")?;
        for day in &model.forecast {
            let date = day.date.format("%a %b %-d").to_string();
            let range = format!("{}{temp} / {}{temp}", day.temp_max, day.temp_min);
            writeln!(f, "  {date:<10}  {range:<14}  {}", day.description)?;
        }

        Ok(())
    }
}
