//! Latest observation for a station, plus a display-ready summary of it.

use serde::Serialize;
use tracing::instrument;

use crate::{
    api::{ObservationProperties, ObservationResponse},
    error::Result,
    icons::IconTable,
    model::{Measurement, Observation},
    source::{JsonSource, fetch},
};

#[instrument(skip(source, icons))]
pub async fn fetch_current_conditions(
    source: &dyn JsonSource,
    url: &str,
    icons: &IconTable,
) -> Result<Observation> {
    let response: ObservationResponse = fetch(source, url).await?;
    Ok(normalize_observation(response.properties, icons))
}

/// Attach the resolved icon and feels-like value. Every measurement is
/// carried over untouched.
pub fn normalize_observation(props: ObservationProperties, icons: &IconTable) -> Observation {
    let icon = props
        .icon
        .as_deref()
        .and_then(|reference| icons.primary(reference))
        .map(|resolved| resolved.icon);
    let feels_like = feels_like(&props.wind_chill, &props.heat_index);

    Observation {
        timestamp: props.timestamp,
        text_description: props.text_description,
        temperature: props.temperature,
        dewpoint: props.dewpoint,
        relative_humidity: props.relative_humidity,
        barometric_pressure: props.barometric_pressure,
        visibility: props.visibility,
        wind_speed: props.wind_speed,
        wind_gust: props.wind_gust,
        wind_direction: props.wind_direction,
        wind_chill: props.wind_chill,
        heat_index: props.heat_index,
        icon,
        feels_like,
    }
}

/// Wind chill when reported, otherwise heat index, otherwise nothing.
pub fn feels_like(wind_chill: &Measurement, heat_index: &Measurement) -> Option<Measurement> {
    [wind_chill, heat_index]
        .into_iter()
        .find(|m| m.is_present())
        .cloned()
}

/// Observation values converted to the units the viewer shows.
/// Fields are `None` whenever the underlying reading is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionsSummary {
    pub description: Option<String>,
    pub icon: Option<String>,
    pub temperature_f: Option<f64>,
    pub feels_like_f: Option<f64>,
    pub wind_mph: Option<f64>,
    pub gust_mph: Option<f64>,
    pub wind_direction: Option<&'static str>,
    /// Heading the wind blows towards, for an arrow glyph.
    pub wind_heading: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub dewpoint_f: Option<f64>,
    pub visibility_mi: Option<f64>,
    pub pressure_mb: Option<f64>,
}

impl From<&Observation> for ConditionsSummary {
    fn from(obs: &Observation) -> Self {
        Self {
            description: obs.text_description.clone(),
            icon: obs.icon.clone(),
            temperature_f: obs.temperature.fahrenheit(),
            feels_like_f: obs.feels_like.as_ref().and_then(Measurement::fahrenheit),
            wind_mph: obs.wind_speed.mph(),
            gust_mph: obs.wind_gust.mph(),
            wind_direction: obs.wind_direction.cardinal(),
            wind_heading: obs.wind_direction.value.map(|d| (d + 180.0).rem_euclid(360.0)),
            humidity_pct: obs.relative_humidity.percent(),
            dewpoint_f: obs.dewpoint.fahrenheit(),
            visibility_mi: obs.visibility.miles(),
            pressure_mb: obs.barometric_pressure.millibars(),
        }
    }
}
