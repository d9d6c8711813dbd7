//! Plain-text rendering of a weather report.

use balmy_core::{
    ConditionsSummary, DailyForecast, HourlySeries, Observation, StationInfo, WeatherReport,
    units::{cardinal_direction, meters_to_miles},
};
use chrono::{Duration, Local};

/// How far ahead the hourly temperature strip reaches.
const HOURLY_WINDOW_HOURS: i64 = 24;

pub fn report(report: &WeatherReport) -> String {
    let mut lines = Vec::new();
    lines.push(station(&report.station_info));
    lines.push(String::new());
    lines.extend(current(&report.current_conditions));
    lines.push(String::new());
    lines.extend(report.daily_forecast.iter().map(day));
    lines.push(String::new());
    lines.extend(hourly_temperatures(&report.hourly_forecast.temperature));
    lines.join("\n")
}

fn station(info: &StationInfo) -> String {
    format!(
        "{} ({}), {} mi {}",
        info.name,
        info.id,
        meters_to_miles(info.distance),
        cardinal_direction(info.bearing),
    )
}

fn current(obs: &Observation) -> Vec<String> {
    let s = ConditionsSummary::from(obs);
    let mut lines = Vec::new();

    let mut headline = match s.temperature_f {
        Some(t) => format!("{t}°F"),
        None => "--°F".to_string(),
    };
    if let Some(desc) = &s.description {
        headline.push_str(&format!("  {desc}"));
    }
    lines.push(headline);

    if let Some(f) = s.feels_like_f {
        lines.push(format!("Feels like {f}°F"));
    }
    if let Some(wind) = s.wind_mph {
        let dir = s.wind_direction.unwrap_or("");
        lines.push(format!("Wind       {wind} mph {dir}").trim_end().to_string());
    }
    if let Some(gust) = s.gust_mph {
        lines.push(format!("Gusting    {gust} mph"));
    }
    if let Some(h) = s.humidity_pct {
        lines.push(format!("Humidity   {h}%"));
    }
    if let Some(d) = s.dewpoint_f {
        lines.push(format!("Dew Point  {d}°F"));
    }
    if let Some(v) = s.visibility_mi {
        lines.push(format!("Visibility {v} mi"));
    }
    if let Some(p) = s.pressure_mb {
        lines.push(format!("Pressure   {p} mb"));
    }
    lines
}

fn day(forecast: &DailyForecast) -> String {
    let high = temp(forecast.day.temperature);
    let low = temp(forecast.night.as_ref().and_then(|n| n.temperature));
    let precip = forecast
        .day
        .precip
        .map(|p| format!("{p:>3}%"))
        .unwrap_or_else(|| "    ".to_string());

    format!(
        "{:<16} {:>5} / {:<5} {} {}",
        forecast.day.name, high, low, precip, forecast.day.short_forecast
    )
}

fn temp(value: Option<i32>) -> String {
    value.map_or_else(|| "--".to_string(), |t| format!("{t}°"))
}

fn hourly_temperatures(series: &HourlySeries) -> Vec<String> {
    let Some(first) = series.data.first() else {
        return Vec::new();
    };
    let end = first.timestamp + Duration::hours(HOURLY_WINDOW_HOURS);

    series
        .between(first.timestamp, end)
        .map(|sample| {
            let at = sample.timestamp.with_timezone(&Local).format("%a %H:%M");
            match sample.value {
                Some(v) => format!("{at}  {v}°F"),
                None => format!("{at}  --"),
            }
        })
        .collect()
}
