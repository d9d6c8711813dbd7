//! End-to-end tests of the fetch pipeline against a mock api.weather.gov.

use balmy_core::{
    Coordinate, Endpoints, Error, HttpSource, IconTable, Pipeline, SeriesId, StaticSource,
    config::ApiConfig,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header_exists, method, path},
};

const HERE: Coordinate = Coordinate::new(-93.2054, 44.9475);

fn point_response() -> serde_json::Value {
    json!({
        "id": "https://api.weather.gov/points/44.9475,-93.2054",
        "type": "Feature",
        "properties": {
            "cwa": "MPX",
            "gridId": "MPX",
            "gridX": 107,
            "gridY": 69,
            "forecast": "https://api.weather.gov/gridpoints/MPX/107,69/forecast",
            "forecastGridData": "https://api.weather.gov/gridpoints/MPX/107,69",
            "observationStations": "https://api.weather.gov/gridpoints/MPX/107,69/stations"
        }
    })
}

fn station_feature() -> serde_json::Value {
    json!({
        "id": "https://api.weather.gov/stations/KMSP",
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [-93.22, 44.88] },
        "properties": {
            "stationIdentifier": "KMSP",
            "name": "Minneapolis-St Paul International Airport",
            "timeZone": "America/Chicago",
            "elevation": { "unitCode": "wmoUnit:m", "value": 265.176 }
        }
    })
}

fn stations_response() -> serde_json::Value {
    json!({ "type": "FeatureCollection", "features": [station_feature()] })
}

fn observation_response() -> serde_json::Value {
    json!({
        "properties": {
            "timestamp": "2024-01-15T17:53:00+00:00",
            "textDescription": "Cloudy",
            "icon": "https://api.weather.gov/icons/land/day/ovc?size=medium",
            "temperature": { "unitCode": "wmoUnit:degC", "value": -3.9 },
            "dewpoint": { "unitCode": "wmoUnit:degC", "value": -8.3 },
            "windDirection": { "unitCode": "wmoUnit:degree_(angle)", "value": 320 },
            "windSpeed": { "unitCode": "wmoUnit:km_h-1", "value": 24.1 },
            "windGust": { "unitCode": "wmoUnit:km_h-1", "value": null },
            "barometricPressure": { "unitCode": "wmoUnit:Pa", "value": 102370 },
            "visibility": { "unitCode": "wmoUnit:m", "value": 16090 },
            "relativeHumidity": { "unitCode": "wmoUnit:percent", "value": 71.4 },
            "windChill": { "unitCode": "wmoUnit:degC", "value": -10.0 },
            "heatIndex": { "unitCode": "wmoUnit:degC", "value": null }
        }
    })
}

fn period(
    number: u32,
    name: &str,
    is_daytime: bool,
    temperature: i32,
    short: &str,
    icon: &str,
) -> serde_json::Value {
    let time_of_day = if is_daytime { "day" } else { "night" };
    json!({
        "number": number,
        "name": name,
        "startTime": "2024-01-15T06:00:00-06:00",
        "endTime": "2024-01-15T18:00:00-06:00",
        "isDaytime": is_daytime,
        "temperature": temperature,
        "temperatureUnit": "F",
        "windSpeed": "10 to 15 mph",
        "windDirection": "NW",
        "icon": format!("https://api.weather.gov/icons/land/{time_of_day}/{icon}?size=medium"),
        "shortForecast": short,
        "detailedForecast": format!("{short}. High near {temperature}.")
    })
}

fn forecast_response() -> serde_json::Value {
    json!({
        "properties": {
            "periods": [
                period(1, "Today", true, 27, "Snow Showers then Mostly Cloudy", "snow,40/bkn"),
                period(2, "Tonight", false, 12, "Mostly Cloudy", "bkn"),
                period(3, "Tuesday", true, 20, "Sunny", "skc"),
                period(4, "Tuesday Night", false, 5, "Clear", "skc"),
                period(5, "Wednesday", true, 18, "Chance Volcanic Ash", "ash,20")
            ]
        }
    })
}

fn gridpoint_response() -> serde_json::Value {
    json!({
        "properties": {
            "temperature": {
                "uom": "wmoUnit:degC",
                "values": [
                    { "validTime": "2024-01-15T18:00:00+00:00/PT1H", "value": -3.3 },
                    { "validTime": "2024-01-15T19:00:00+00:00/PT2H", "value": -2.8 }
                ]
            },
            "windSpeed": {
                "values": [
                    { "validTime": "2024-01-15T18:00:00+00:00/PT3H", "value": 10 }
                ]
            },
            "skyCover": {
                "uom": "wmoUnit:percent",
                "values": [
                    { "validTime": "2024-01-15T18:00:00+00:00/PT1H", "value": 100 }
                ]
            },
            "probabilityOfPrecipitation": {
                "uom": "wmoUnit:percent",
                "values": [
                    { "validTime": "2024-01-15T18:00:00+00:00/PT6H", "value": 40 }
                ]
            }
        }
    })
}

async fn mount(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_all(server: &MockServer) {
    mount(server, "/points/44.9475,-93.2054", point_response()).await;
    mount(server, "/gridpoints/MPX/107,69/stations", stations_response()).await;
    mount(server, "/stations/KMSP", station_feature()).await;
    mount(server, "/stations/KMSP/observations/latest", observation_response()).await;
    mount(server, "/gridpoints/MPX/107,69/forecast", forecast_response()).await;
    mount(server, "/gridpoints/MPX/107,69", gridpoint_response()).await;
}

fn http_pipeline(server: &MockServer) -> Pipeline {
    let config = ApiConfig {
        base_url: server.uri(),
        user_agent: "balmy-tests".to_string(),
        timeout_secs: 5,
    };
    let source = HttpSource::new(&config).expect("client should build");
    Pipeline::new(Box::new(source), Endpoints::new(server.uri()), IconTable::standard())
}

fn static_pipeline() -> Pipeline {
    let endpoints = Endpoints::new("https://api.weather.gov");
    let source = StaticSource::new()
        .with(endpoints.point(HERE), point_response())
        .with(endpoints.grid_stations("MPX/107,69"), stations_response())
        .with(endpoints.station("KMSP"), station_feature())
        .with(endpoints.latest_observation("KMSP"), observation_response())
        .with(endpoints.forecast("MPX/107,69"), forecast_response())
        .with(endpoints.gridpoint("MPX/107,69"), gridpoint_response());
    Pipeline::new(Box::new(source), endpoints, IconTable::standard())
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn full_cycle_over_http() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let report = http_pipeline(&server)
        .fetch_report(HERE)
        .await
        .expect("pipeline should succeed");

    assert_eq!(report.station_info.id, "KMSP");
    assert!((7_000.0..8_000.0).contains(&report.station_info.distance));

    let current = &report.current_conditions;
    assert_eq!(current.icon.as_deref(), Some("/icons/overcast.svg"));
    assert_eq!(current.feels_like.as_ref().and_then(|m| m.value), Some(-10.0));
    assert_eq!(current.wind_gust.value, None);

    let names: Vec<_> = report.daily_forecast.iter().map(|d| d.day.name.as_str()).collect();
    assert_eq!(names, vec!["Today", "Tuesday", "Wednesday"]);

    let today = &report.daily_forecast[0];
    assert_eq!(today.day.short_forecast, "Snow Showers");
    assert_eq!(today.day.precip, Some(40));
    assert_eq!(today.day.icon.as_deref(), Some("/icons/snow.svg"));
    assert_eq!((today.day.min_temp, today.day.max_temp), (Some(12), Some(27)));
    assert_eq!(today.night.as_ref().map(|n| n.name.as_str()), Some("Tonight"));

    let wednesday = &report.daily_forecast[2];
    assert!(wednesday.night.is_none());
    assert_eq!(wednesday.day.icon.as_deref(), Some("ash"));

    let wind = report.hourly_forecast.get(SeriesId::WindSpeed);
    assert_eq!(wind.data[0].value, Some(12.0));
    let temps: Vec<_> = report
        .hourly_forecast
        .temperature
        .data
        .iter()
        .map(|s| s.value)
        .collect();
    assert_eq!(temps, vec![Some(26.0), Some(27.0)]);
    assert_eq!(report.hourly_forecast.sky_cover.data[0].value, Some(100.0));
}

#[tokio::test]
async fn report_serializes_for_presentation() {
    let report = static_pipeline().fetch_report(HERE).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["stationInfo"]["id"], "KMSP");
    assert_eq!(json["dailyForecast"][0]["name"], "Today");
    assert_eq!(json["dailyForecast"][0]["night"]["name"], "Tonight");
    assert_eq!(json["dailyForecast"][2]["night"], serde_json::Value::Null);
    assert_eq!(json["hourlyForecast"]["windSpeed"]["id"], "windSpeed");
    assert_eq!(
        json["hourlyForecast"]["probabilityOfPrecipitation"]["id"],
        "probabilityOfPrecipitation"
    );
    assert_eq!(json["currentConditions"]["windGust"]["value"], serde_json::Value::Null);
}

#[tokio::test]
async fn rerunning_the_pipeline_is_idempotent() {
    let pipeline = static_pipeline();

    let first = pipeline.fetch_report(HERE).await.unwrap();
    let second = pipeline.fetch_report(HERE).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// ============================================================================
// Error handling scenarios
// ============================================================================

#[tokio::test]
async fn failed_branch_fails_the_whole_cycle() {
    let server = MockServer::start().await;
    mount(&server, "/points/44.9475,-93.2054", point_response()).await;
    mount(&server, "/gridpoints/MPX/107,69/stations", stations_response()).await;
    mount(&server, "/stations/KMSP", station_feature()).await;
    mount(&server, "/stations/KMSP/observations/latest", observation_response()).await;
    mount(&server, "/gridpoints/MPX/107,69", gridpoint_response()).await;
    Mock::given(method("GET"))
        .and(path("/gridpoints/MPX/107,69/forecast"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let result = http_pipeline(&server).fetch_report(HERE).await;

    match result {
        Err(Error::Status { status, ref url, .. }) => {
            assert_eq!(status, 503);
            assert!(url.ends_with("/gridpoints/MPX/107,69/forecast"));
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn failed_location_lookup_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/points/44.9475,-93.2054"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "title": "Data Unavailable For Requested Point"
        })))
        .mount(&server)
        .await;

    let err = http_pipeline(&server).fetch_report(HERE).await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 404, .. }), "got: {err:?}");
    assert!(err.is_remote_failure());
}

#[tokio::test]
async fn non_json_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/points/44.9475,-93.2054"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = http_pipeline(&server).fetch_report(HERE).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "got: {err:?}");
}
