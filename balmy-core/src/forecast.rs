//! Multi-day forecast built from the period forecast.
//!
//! The API returns alternating day and night periods ("Today", "Tonight",
//! "Monday", "Monday Night", ...). Each period gets a temperature band from
//! its neighbours and a resolved icon; daytime periods then absorb their
//! matching night and the night periods are dropped from the sequence.

use tracing::instrument;

use crate::{
    api::{ForecastResponse, PeriodRecord},
    error::Result,
    icons::IconTable,
    model::{DailyForecast, ForecastPeriod},
    source::{JsonSource, fetch},
};

const FORECAST_SEPARATOR: &str = " then ";

#[instrument(skip(source, icons))]
pub async fn fetch_daily_forecast(
    source: &dyn JsonSource,
    url: &str,
    icons: &IconTable,
) -> Result<Vec<DailyForecast>> {
    let response: ForecastResponse = fetch(source, url).await?;
    Ok(build_daily_forecast(response.properties.periods, icons))
}

pub fn build_daily_forecast(periods: Vec<PeriodRecord>, icons: &IconTable) -> Vec<DailyForecast> {
    let periods = augment_periods(periods, icons);

    periods
        .iter()
        .filter(|p| p.is_daytime)
        .map(|day| {
            let night = periods.iter().find(|p| is_night_of(&day.name, &p.name)).cloned();
            let mut day = day.clone();
            day.short_forecast = headline(&day.short_forecast).to_string();
            DailyForecast { day, night }
        })
        .collect()
}

/// Attach temperature bounds, precipitation and the resolved icon to every
/// period, in input order.
pub fn augment_periods(periods: Vec<PeriodRecord>, icons: &IconTable) -> Vec<ForecastPeriod> {
    let temps: Vec<Option<i32>> = periods.iter().map(|p| p.temperature).collect();
    let bounds = temperature_bounds(&temps);

    periods
        .into_iter()
        .zip(bounds)
        .map(|(p, (min_temp, max_temp))| {
            let primary = icons.primary(&p.icon);
            ForecastPeriod {
                number: p.number,
                name: p.name,
                start_time: p.start_time,
                end_time: p.end_time,
                is_daytime: p.is_daytime,
                temperature: p.temperature,
                temperature_unit: p.temperature_unit,
                wind_speed: p.wind_speed,
                wind_direction: p.wind_direction,
                short_forecast: p.short_forecast,
                detailed_forecast: p.detailed_forecast,
                precip: primary.as_ref().and_then(|i| i.percent),
                icon: primary.map(|i| i.icon),
                icon_code: p.icon,
                min_temp,
                max_temp,
            }
        })
        .collect()
}

/// Min and max over each entry and its immediate neighbours, ignoring
/// missing temperatures.
pub fn temperature_bounds(temps: &[Option<i32>]) -> Vec<(Option<i32>, Option<i32>)> {
    (0..temps.len())
        .map(|i| {
            let window = &temps[i.saturating_sub(1)..(i + 2).min(temps.len())];
            let defined = window.iter().flatten().copied();
            (defined.clone().min(), defined.max())
        })
        .collect()
}

/// `Monday` ↔ `Monday Night`, and `Today` ↔ `Tonight`.
pub fn is_night_of(day_name: &str, candidate: &str) -> bool {
    candidate.strip_suffix(" Night") == Some(day_name)
        || (day_name == "Today" && candidate == "Tonight")
}

/// The part of a short forecast before the first " then ".
pub fn headline(short_forecast: &str) -> &str {
    short_forecast
        .split_once(FORECAST_SEPARATOR)
        .map_or(short_forecast, |(head, _)| head)
}
