//! Hourly chart series from the raw gridpoint forecast.

use chrono::{DateTime, Utc};
use tracing::{instrument, warn};

use crate::{
    api::{GridLayer, GridpointProperties, GridpointResponse},
    error::{Error, Result},
    model::{HourlyForecast, HourlySeries, Measurement, Sample, SeriesId, Unit},
    source::{JsonSource, fetch},
};

#[instrument(skip(source))]
pub async fn fetch_hourly_forecast(source: &dyn JsonSource, url: &str) -> Result<HourlyForecast> {
    let response: GridpointResponse = fetch(source, url).await?;
    build_hourly_forecast(response.properties)
}

pub fn build_hourly_forecast(props: GridpointProperties) -> Result<HourlyForecast> {
    Ok(HourlyForecast {
        wind_speed: build_series(SeriesId::WindSpeed, &props.wind_speed)?,
        temperature: build_series(SeriesId::Temperature, &props.temperature)?,
        sky_cover: build_series(SeriesId::SkyCover, &props.sky_cover)?,
        probability_of_precipitation: build_series(
            SeriesId::ProbabilityOfPrecipitation,
            &props.probability_of_precipitation,
        )?,
    })
}

/// Convert one gridpoint layer. Wind speed ends up in mph and temperature
/// in °F; percentages are left as they are.
pub fn build_series(id: SeriesId, layer: &GridLayer) -> Result<HourlySeries> {
    let unit = series_unit(id, layer.uom.as_ref());

    let data = layer
        .values
        .iter()
        .map(|v| {
            Ok(Sample {
                timestamp: interval_start(&v.valid_time)?,
                value: convert(id, &unit, v.value),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(HourlySeries { id, data })
}

/// The declared unit when this series can convert it, otherwise the
/// series' default so that present values are never dropped.
fn series_unit(id: SeriesId, declared: Option<&Unit>) -> Unit {
    match declared {
        None | Some(Unit::Unspecified) => default_unit(id),
        Some(unit) if accepts(id, unit) => unit.clone(),
        Some(unit) => {
            let fallback = default_unit(id);
            warn!(
                series = %id,
                declared = unit.as_code(),
                fallback = fallback.as_code(),
                "unsupported layer unit, assuming default"
            );
            fallback
        }
    }
}

fn accepts(id: SeriesId, unit: &Unit) -> bool {
    match id {
        SeriesId::WindSpeed => matches!(
            unit,
            Unit::Knots | Unit::KilometersPerHour | Unit::MetersPerSecond
        ),
        SeriesId::Temperature => matches!(unit, Unit::Celsius | Unit::Fahrenheit),
        SeriesId::SkyCover | SeriesId::ProbabilityOfPrecipitation => true,
    }
}

/// The grid layers have historically been published in these units.
fn default_unit(id: SeriesId) -> Unit {
    match id {
        SeriesId::WindSpeed => Unit::Knots,
        SeriesId::Temperature => Unit::Celsius,
        SeriesId::SkyCover | SeriesId::ProbabilityOfPrecipitation => Unit::Percent,
    }
}

fn convert(id: SeriesId, unit: &Unit, value: Option<f64>) -> Option<f64> {
    let measurement = Measurement::new(value, unit.clone());
    match id {
        SeriesId::WindSpeed => measurement.mph(),
        SeriesId::Temperature => measurement.fahrenheit(),
        SeriesId::SkyCover | SeriesId::ProbabilityOfPrecipitation => value,
    }
}

/// Start of an ISO 8601 `<start>/<duration>` interval.
pub fn interval_start(valid_time: &str) -> Result<DateTime<Utc>> {
    let start = valid_time.split('/').next().unwrap_or_default();
    DateTime::parse_from_rfc3339(start)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::InvalidTimestamp {
            value: valid_time.to_string(),
        })
}
