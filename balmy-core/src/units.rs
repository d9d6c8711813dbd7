//! Unit conversions used when preparing values for display.
//!
//! Every converter rounds to the nearest whole unit. The `Measurement`
//! helpers pick the formula from the measurement's unit tag and return
//! `None` when the value is absent.

use tracing::warn;

use crate::model::{Measurement, Unit};

pub const KNOTS_TO_MPH: f64 = 1.15078;
const MPS_TO_MPH: f64 = 2.236_936_292;
const KPH_TO_MPH: f64 = 0.621_371_192;
const METERS_PER_MILE: f64 = 1_609.344;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

pub fn c_to_f(celsius: f64) -> f64 {
    (celsius * 9.0 / 5.0 + 32.0).round()
}

pub fn meters_to_miles(meters: f64) -> f64 {
    (meters / METERS_PER_MILE).round()
}

pub fn mps_to_mph(mps: f64) -> f64 {
    (mps * MPS_TO_MPH).round()
}

pub fn kph_to_mph(kph: f64) -> f64 {
    (kph * KPH_TO_MPH).round()
}

pub fn knots_to_mph(knots: f64) -> f64 {
    (knots * KNOTS_TO_MPH).round()
}

pub fn pa_to_mb(pascals: f64) -> f64 {
    (pascals * 0.01).round()
}

/// 16-point compass label for a direction in degrees. Each label owns the
/// 22.5° sector centred on it.
pub fn cardinal_direction(degrees: f64) -> &'static str {
    let normalized = degrees.rem_euclid(360.0);
    let sector = (normalized / 22.5 + 0.5).floor() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[sector]
}

impl Measurement {
    /// Temperature in whole degrees Fahrenheit.
    pub fn fahrenheit(&self) -> Option<f64> {
        let value = self.value?;
        match self.unit {
            Unit::Celsius => Some(c_to_f(value)),
            Unit::Fahrenheit => Some(value.round()),
            _ => self.incompatible("temperature"),
        }
    }

    /// Speed in whole miles per hour.
    pub fn mph(&self) -> Option<f64> {
        let value = self.value?;
        match self.unit {
            Unit::MetersPerSecond => Some(mps_to_mph(value)),
            Unit::KilometersPerHour => Some(kph_to_mph(value)),
            Unit::Knots => Some(knots_to_mph(value)),
            _ => self.incompatible("speed"),
        }
    }

    pub fn miles(&self) -> Option<f64> {
        let value = self.value?;
        match self.unit {
            Unit::Meter => Some(meters_to_miles(value)),
            _ => self.incompatible("distance"),
        }
    }

    pub fn millibars(&self) -> Option<f64> {
        let value = self.value?;
        match self.unit {
            Unit::Pascal => Some(pa_to_mb(value)),
            _ => self.incompatible("pressure"),
        }
    }

    pub fn cardinal(&self) -> Option<&'static str> {
        let value = self.value?;
        match self.unit {
            Unit::Degree | Unit::Unspecified => Some(cardinal_direction(value)),
            _ => self.incompatible("direction"),
        }
    }

    pub fn percent(&self) -> Option<f64> {
        let value = self.value?;
        match self.unit {
            Unit::Percent | Unit::Unspecified => Some(value.round()),
            _ => self.incompatible("percentage"),
        }
    }

    fn incompatible<T>(&self, dimension: &str) -> Option<T> {
        warn!(
            unit = self.unit.as_code(),
            value = ?self.value,
            "cannot convert measurement to {dimension}"
        );
        None
    }
}
