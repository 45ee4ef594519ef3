use thiserror::Error;

/// Failure of a single query cycle. Each variant renders one user-facing message.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Please enter a city name.")]
    EmptyLocation,

    #[error("City not found. Check the name and try again.")]
    LocationNotFound,

    #[error("Invalid API key. Check your configuration.")]
    Authentication,

    /// Non-success status on the current-conditions request, other than 404/401.
    #[error("Could not fetch weather data (HTTP {status}). Try again later.")]
    Provider { status: u16 },

    /// Non-success status on the forecast request.
    #[error("Could not fetch the forecast (HTTP {status}).")]
    ForecastUnavailable { status: u16 },

    #[error("Could not reach the weather service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from the weather service: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Config(String),
}

impl WeatherError {
    /// Map a non-success status on the current-conditions endpoint.
    pub fn from_current_status(status: u16) -> Self {
        match status {
            404 => WeatherError::LocationNotFound,
            401 => WeatherError::Authentication,
            _ => WeatherError::Provider { status },
        }
    }

    /// Map a non-success status on the forecast endpoint.
    pub fn from_forecast_status(status: u16) -> Self {
        WeatherError::ForecastUnavailable { status }
    }
}
