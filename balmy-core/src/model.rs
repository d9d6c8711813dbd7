use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Unit tag attached to every NWS measurement (`unitCode` / `uom`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    Celsius,
    Fahrenheit,
    Pascal,
    Meter,
    MetersPerSecond,
    KilometersPerHour,
    Knots,
    Degree,
    Percent,
    /// No unit code was present in the payload.
    #[default]
    Unspecified,
    Other(String),
}

impl Unit {
    pub fn as_code(&self) -> &str {
        match self {
            Unit::Celsius => "wmoUnit:degC",
            Unit::Fahrenheit => "wmoUnit:degF",
            Unit::Pascal => "wmoUnit:Pa",
            Unit::Meter => "wmoUnit:m",
            Unit::MetersPerSecond => "wmoUnit:m_s-1",
            Unit::KilometersPerHour => "wmoUnit:km_h-1",
            Unit::Knots => "wmoUnit:kn",
            Unit::Degree => "wmoUnit:degree_(angle)",
            Unit::Percent => "wmoUnit:percent",
            Unit::Unspecified => "",
            Unit::Other(code) => code,
        }
    }
}

impl From<String> for Unit {
    fn from(code: String) -> Self {
        let bare = code
            .strip_prefix("wmoUnit:")
            .or_else(|| code.strip_prefix("unit:"))
            .unwrap_or(&code);

        match bare {
            "degC" => Unit::Celsius,
            "degF" => Unit::Fahrenheit,
            "Pa" => Unit::Pascal,
            "m" => Unit::Meter,
            "m_s-1" => Unit::MetersPerSecond,
            "km_h-1" => Unit::KilometersPerHour,
            "kn" | "kt" => Unit::Knots,
            "degree_(angle)" => Unit::Degree,
            "percent" => Unit::Percent,
            "" => Unit::Unspecified,
            _ => Unit::Other(code),
        }
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.as_code().to_string()
    }
}

/// A single reading as reported by the API. The value is absent when the
/// station did not report it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(rename = "unitCode", default)]
    pub unit: Unit,
}

impl Measurement {
    pub fn new(value: Option<f64>, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// Observation station metadata, annotated relative to the requested point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationInfo {
    pub id: String,
    pub name: String,
    pub time_zone: Option<String>,
    pub coordinate: Coordinate,
    /// Great-circle distance from the requested point, in meters.
    pub distance: f64,
    /// Initial bearing from the requested point to the station, degrees from north.
    pub bearing: f64,
}

/// Latest observation with its derived fields attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub timestamp: Option<DateTime<Utc>>,
    pub text_description: Option<String>,
    pub temperature: Measurement,
    pub dewpoint: Measurement,
    pub relative_humidity: Measurement,
    pub barometric_pressure: Measurement,
    pub visibility: Measurement,
    pub wind_speed: Measurement,
    pub wind_gust: Measurement,
    pub wind_direction: Measurement,
    pub wind_chill: Measurement,
    pub heat_index: Measurement,
    pub icon: Option<String>,
    pub feels_like: Option<Measurement>,
}

/// One named forecast window with its derived bounds and icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub number: u32,
    pub name: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub is_daytime: bool,
    pub temperature: Option<i32>,
    pub temperature_unit: String,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub short_forecast: String,
    pub detailed_forecast: String,
    /// The icon reference exactly as the API returned it.
    pub icon_code: String,
    pub icon: Option<String>,
    pub min_temp: Option<i32>,
    pub max_temp: Option<i32>,
    pub precip: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    #[serde(flatten)]
    pub day: ForecastPeriod,
    pub night: Option<ForecastPeriod>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesId {
    WindSpeed,
    Temperature,
    SkyCover,
    ProbabilityOfPrecipitation,
}

impl SeriesId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesId::WindSpeed => "windSpeed",
            SeriesId::Temperature => "temperature",
            SeriesId::SkyCover => "skyCover",
            SeriesId::ProbabilityOfPrecipitation => "probabilityOfPrecipitation",
        }
    }

    pub const fn all() -> &'static [SeriesId] {
        &[
            SeriesId::WindSpeed,
            SeriesId::Temperature,
            SeriesId::SkyCover,
            SeriesId::ProbabilityOfPrecipitation,
        ]
    }
}

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySeries {
    pub id: SeriesId,
    pub data: Vec<Sample>,
}

impl HourlySeries {
    /// Samples whose timestamp falls in `[start, end)`.
    pub fn between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Iterator<Item = &Sample> + '_ {
        self.data
            .iter()
            .filter(move |s| s.timestamp >= start && s.timestamp < end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecast {
    pub wind_speed: HourlySeries,
    pub temperature: HourlySeries,
    pub sky_cover: HourlySeries,
    pub probability_of_precipitation: HourlySeries,
}

impl HourlyForecast {
    pub fn get(&self, id: SeriesId) -> &HourlySeries {
        match id {
            SeriesId::WindSpeed => &self.wind_speed,
            SeriesId::Temperature => &self.temperature,
            SeriesId::SkyCover => &self.sky_cover,
            SeriesId::ProbabilityOfPrecipitation => &self.probability_of_precipitation,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &HourlySeries> + '_ {
        SeriesId::all().iter().map(|id| self.get(*id))
    }
}

/// Everything one fetch cycle produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub station_info: StationInfo,
    pub current_conditions: Observation,
    pub daily_forecast: Vec<DailyForecast>,
    pub hourly_forecast: HourlyForecast,
}
