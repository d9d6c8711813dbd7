//! Wire schemas for the api.weather.gov resources this crate reads.
//!
//! Only the fields the pipeline uses are declared; serde ignores the rest.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

use crate::model::{Measurement, Unit};

/// `GET /points/{lat},{lon}`
#[derive(Debug, Deserialize)]
pub struct PointResponse {
    pub properties: PointProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointProperties {
    pub grid_id: String,
    pub grid_x: i64,
    pub grid_y: i64,
}

impl PointProperties {
    /// Grid identifier in the `WFO/X,Y` form the gridpoint endpoints take.
    pub fn grid_id(&self) -> String {
        format!("{}/{},{}", self.grid_id, self.grid_x, self.grid_y)
    }
}

#[derive(Debug, Deserialize)]
pub struct PointGeometry {
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

/// `GET /gridpoints/{grid}/stations`
#[derive(Debug, Deserialize)]
pub struct StationCollection {
    #[serde(default)]
    pub features: Vec<StationFeature>,
}

/// A station feature; also the body of `GET /stations/{id}`.
#[derive(Debug, Deserialize)]
pub struct StationFeature {
    pub geometry: PointGeometry,
    pub properties: StationProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationProperties {
    pub station_identifier: String,
    pub name: String,
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// `GET /stations/{id}/observations/latest`
#[derive(Debug, Deserialize)]
pub struct ObservationResponse {
    pub properties: ObservationProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationProperties {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub text_description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub temperature: Measurement,
    #[serde(default)]
    pub dewpoint: Measurement,
    #[serde(default)]
    pub relative_humidity: Measurement,
    #[serde(default)]
    pub barometric_pressure: Measurement,
    #[serde(default)]
    pub visibility: Measurement,
    #[serde(default)]
    pub wind_speed: Measurement,
    #[serde(default)]
    pub wind_gust: Measurement,
    #[serde(default)]
    pub wind_direction: Measurement,
    #[serde(default)]
    pub wind_chill: Measurement,
    #[serde(default)]
    pub heat_index: Measurement,
}

/// `GET /gridpoints/{grid}/forecast`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
pub struct ForecastProperties {
    pub periods: Vec<PeriodRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecord {
    pub number: u32,
    pub name: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub is_daytime: bool,
    #[serde(default)]
    pub temperature: Option<i32>,
    #[serde(default)]
    pub temperature_unit: String,
    #[serde(default)]
    pub wind_speed: Option<String>,
    #[serde(default)]
    pub wind_direction: Option<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub short_forecast: String,
    #[serde(default)]
    pub detailed_forecast: String,
}

/// `GET /gridpoints/{grid}`
#[derive(Debug, Deserialize)]
pub struct GridpointResponse {
    pub properties: GridpointProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridpointProperties {
    pub wind_speed: GridLayer,
    pub temperature: GridLayer,
    pub sky_cover: GridLayer,
    pub probability_of_precipitation: GridLayer,
}

#[derive(Debug, Deserialize)]
pub struct GridLayer {
    #[serde(default)]
    pub uom: Option<Unit>,
    #[serde(default)]
    pub values: Vec<GridValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridValue {
    /// ISO 8601 interval, `<start>/<duration>`.
    pub valid_time: String,
    pub value: Option<f64>,
}
