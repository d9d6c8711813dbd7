//! Core library for the `balmy` forecast viewer.
//!
//! This crate defines:
//! - Configuration handling
//! - Typed schemas for the api.weather.gov resources
//! - Unit conversion and icon resolution
//! - The fetch pipeline producing current conditions, a daily forecast and
//!   hourly chart series
//!
//! It is used by `balmy-cli`, but carries no presentation logic of its own.

pub mod api;
pub mod config;
pub mod current;
pub mod error;
pub mod forecast;
pub mod geo;
pub mod hourly;
pub mod icons;
pub mod location;
pub mod model;
pub mod pipeline;
pub mod refresh;
pub mod source;
pub mod units;

pub use config::Config;
pub use current::ConditionsSummary;
pub use error::Error;
pub use geo::Coordinate;
pub use icons::IconTable;
pub use model::{
    DailyForecast, ForecastPeriod, HourlyForecast, HourlySeries, Measurement, Observation,
    SeriesId, StationInfo, Unit, WeatherReport,
};
pub use pipeline::Pipeline;
pub use refresh::RefreshPolicy;
pub use source::{Endpoints, HttpSource, JsonSource, StaticSource};
