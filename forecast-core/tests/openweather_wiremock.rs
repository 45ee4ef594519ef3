//! Integration tests for the OpenWeatherMap provider using wiremock.
//!
//! These drive full query cycles against a mock HTTP server to check request
//! shape, status classification and the end-to-end display projection.

use chrono::{NaiveDate, Utc};
use forecast_core::{
    DisplayModel, OpenWeatherProvider, Query, QueryState, UnitSystem, WeatherError,
    WeatherSession, fetch_weather, fetch_weather_in,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn sample_current_response() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": 2.35, "lat": 48.85 },
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
        "main": {
            "temp": 21.4,
            "feels_like": 20.9,
            "temp_min": 19.0,
            "temp_max": 23.0,
            "pressure": 1016,
            "humidity": 40
        },
        "wind": { "speed": 3.6, "deg": 200 },
        "dt": 1705320000,
        "sys": { "country": "FR", "sunrise": 1705303000, "sunset": 1705335000 },
        "timezone": 3600,
        "name": "Paris",
        "cod": 200
    })
}

/// Three slots on 2024-01-15 (09:00, 12:00, 15:00 UTC) followed by one on the 16th.
fn sample_forecast_response() -> serde_json::Value {
    let slot = |dt: i64, temp_max: f64, description: &str| {
        serde_json::json!({
            "dt": dt,
            "main": { "temp": temp_max - 1.0, "temp_max": temp_max, "temp_min": temp_max - 4.0 },
            "weather": [{ "description": description, "icon": "02d" }],
            "dt_txt": ""
        })
    };

    serde_json::json!({
        "cod": "200",
        "cnt": 4,
        "list": [
            slot(1_705_309_200, 25.0, "few clouds"),
            slot(1_705_320_000, 27.0, "clear sky"),
            slot(1_705_330_800, 23.0, "light rain"),
            slot(1_705_395_600, 18.0, "overcast clouds"),
        ],
        "city": { "name": "Paris", "country": "FR", "timezone": 3600 }
    })
}

fn create_test_provider(mock_server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::new("TEST_KEY".to_string())
        .with_base_url(&mock_server.uri())
        .with_lang("es")
}

async fn mount(mock_server: &MockServer, endpoint: &str, response: ResponseTemplate, expected: u64) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(response)
        .expect(expected)
        .mount(mock_server)
        .await;
}

fn paris() -> Query {
    Query::new("Paris", UnitSystem::Metric).expect("valid query")
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn sends_expected_query_parameters() {
    let mock_server = MockServer::start().await;

    for endpoint in ["/weather", "/forecast"] {
        let body = if endpoint == "/weather" {
            sample_current_response()
        } else {
            sample_forecast_response()
        };
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(query_param("q", "New York"))
            .and(query_param("appid", "TEST_KEY"))
            .and(query_param("units", "imperial"))
            .and(query_param("lang", "es"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let provider = create_test_provider(&mock_server);
    let result = fetch_weather(&provider, "  New York ", UnitSystem::Imperial).await;

    assert!(result.is_ok(), "unexpected error: {result:?}");
}

#[tokio::test]
async fn end_to_end_display_model() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/weather",
        ResponseTemplate::new(200).set_body_json(sample_current_response()),
        1,
    )
    .await;
    mount(
        &mock_server,
        "/forecast",
        ResponseTemplate::new(200).set_body_json(sample_forecast_response()),
        1,
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let report = fetch_weather_in(&provider, &paris(), &Utc)
        .await
        .expect("should succeed");
    let model = DisplayModel::project(&report, UnitSystem::Metric);

    assert_eq!(model.current.city_name, "Paris");
    assert_eq!(model.current.country_code, "FR");
    assert_eq!(model.current.temperature, 21);
    assert_eq!(model.current.feels_like, 21);
    assert_eq!(model.current.humidity, 40);
    assert_eq!(model.current.pressure, 1016);
    // 3.6 m/s rendered as km/h
    assert_eq!(model.current.wind_speed, 13);

    assert_eq!(model.forecast.len(), 2);
    let first = &model.forecast[0];
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"));
    assert_eq!(first.temp_max, 25);
    assert_eq!(first.description, "few clouds");
    assert_eq!(model.forecast[1].temp_max, 18);
}

#[tokio::test]
async fn empty_forecast_list_is_not_an_error() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/weather",
        ResponseTemplate::new(200).set_body_json(sample_current_response()),
        1,
    )
    .await;
    mount(
        &mock_server,
        "/forecast",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "cod": "200", "list": [] })),
        1,
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let report = fetch_weather_in(&provider, &paris(), &Utc)
        .await
        .expect("should succeed");

    assert!(report.forecast.is_empty());
}

// ============================================================================
// Error scenarios
// ============================================================================

#[tokio::test]
async fn not_found_skips_forecast() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/weather",
        ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })),
        1,
    )
    .await;
    mount(&mock_server, "/forecast", ResponseTemplate::new(200), 0).await;

    let provider = create_test_provider(&mock_server);
    let err = fetch_weather_in(&provider, &paris(), &Utc).await.unwrap_err();

    assert!(matches!(err, WeatherError::LocationNotFound));
}

#[tokio::test]
async fn unauthorized_is_authentication_error() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, "/weather", ResponseTemplate::new(401), 1).await;
    mount(&mock_server, "/forecast", ResponseTemplate::new(200), 0).await;

    let provider = create_test_provider(&mock_server);
    let err = fetch_weather_in(&provider, &paris(), &Utc).await.unwrap_err();

    assert!(matches!(err, WeatherError::Authentication));
}

#[tokio::test]
async fn other_status_is_provider_error() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, "/weather", ResponseTemplate::new(503), 1).await;
    mount(&mock_server, "/forecast", ResponseTemplate::new(200), 0).await;

    let provider = create_test_provider(&mock_server);
    let err = fetch_weather_in(&provider, &paris(), &Utc).await.unwrap_err();

    assert!(matches!(err, WeatherError::Provider { status: 503 }));
}

#[tokio::test]
async fn forecast_failure_yields_no_partial_result() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/weather",
        ResponseTemplate::new(200).set_body_json(sample_current_response()),
        1,
    )
    .await;
    mount(&mock_server, "/forecast", ResponseTemplate::new(500), 1).await;

    let session = WeatherSession::new(Box::new(create_test_provider(&mock_server)));
    let outcome = session.search_in("Paris", UnitSystem::Metric, &Utc).await;

    assert_eq!(
        outcome,
        QueryState::Failed(WeatherError::ForecastUnavailable { status: 500 }.to_string())
    );
    assert_eq!(session.state(), outcome);
}

#[tokio::test]
async fn missing_field_is_parse_error() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/weather",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "name": "Paris" })),
        1,
    )
    .await;
    mount(&mock_server, "/forecast", ResponseTemplate::new(200), 0).await;

    let provider = create_test_provider(&mock_server);
    let err = fetch_weather_in(&provider, &paris(), &Utc).await.unwrap_err();

    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn empty_location_never_hits_the_network() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, "/weather", ResponseTemplate::new(200), 0).await;
    mount(&mock_server, "/forecast", ResponseTemplate::new(200), 0).await;

    let provider = create_test_provider(&mock_server);
    let err = fetch_weather(&provider, "", UnitSystem::Metric).await.unwrap_err();

    assert!(matches!(err, WeatherError::EmptyLocation));
}
