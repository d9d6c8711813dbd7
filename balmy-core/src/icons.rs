//! Resolve NWS icon references into display icons.
//!
//! An icon reference looks like
//! `https://api.weather.gov/icons/land/day/rain_showers,30/tsra_hi,40?size=medium`:
//! one or two condition segments after the time-of-day segment, each an icon
//! code with an optional precipitation probability.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

const MAX_CONDITIONS: usize = 2;

/// One condition segment of an icon reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconCode {
    pub code: String,
    pub percent: Option<u8>,
}

impl IconCode {
    /// Parse `code[,percent]`. A percent that is not a number is dropped.
    pub fn parse(segment: &str) -> Self {
        let (code, percent) = match segment.split_once(',') {
            Some((code, percent)) => (code, percent.trim().parse().ok()),
            None => (segment, None),
        };
        Self {
            code: code.to_string(),
            percent,
        }
    }
}

/// Split an icon reference into its (at most two) condition segments.
pub fn parse_icon_reference(reference: &str) -> Vec<IconCode> {
    let path = reference.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let conditions = match segments.iter().rposition(|s| *s == "day" || *s == "night") {
        Some(pos) => &segments[pos + 1..],
        None => &segments[segments.len().saturating_sub(1)..],
    };

    conditions.iter().take(MAX_CONDITIONS).map(|s| IconCode::parse(s)).collect()
}

/// Display asset for an icon code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconAsset {
    pub icon: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Precipitation chance this condition stands for when the reference
    /// itself carries none.
    #[serde(default)]
    pub percent: Option<u8>,
}

/// A condition segment joined with its display asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedIcon {
    pub code: String,
    pub percent: Option<u8>,
    /// The asset reference, or the raw code when the table has no entry.
    pub icon: String,
    pub description: Option<String>,
    /// The table's percent for this code, if any.
    pub canonical_percent: Option<u8>,
}

/// Immutable code → asset lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IconTable {
    entries: HashMap<String, IconAsset>,
}

impl IconTable {
    /// Table covering the NWS land icon set.
    pub fn standard() -> Self {
        let entries = STANDARD_ICONS
            .iter()
            .map(|(code, asset, description)| {
                (
                    (*code).to_string(),
                    IconAsset {
                        icon: format!("/icons/{asset}.svg"),
                        description: Some((*description).to_string()),
                        percent: None,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Copy of this table with `overrides` replacing or adding entries.
    pub fn with_overrides(&self, overrides: &HashMap<String, IconAsset>) -> Self {
        let mut entries = self.entries.clone();
        entries.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { entries }
    }

    pub fn lookup(&self, code: &str) -> Option<&IconAsset> {
        self.entries.get(code)
    }

    /// Parse `reference` and join every condition with its asset.
    pub fn resolve(&self, reference: &str) -> Vec<ResolvedIcon> {
        parse_icon_reference(reference)
            .into_iter()
            .map(|IconCode { code, percent }| match self.lookup(&code) {
                Some(asset) => ResolvedIcon {
                    icon: asset.icon.clone(),
                    description: asset.description.clone(),
                    canonical_percent: asset.percent,
                    code,
                    percent,
                },
                None => {
                    debug!(%code, "no icon mapped for code");
                    ResolvedIcon {
                        icon: code.clone(),
                        description: None,
                        canonical_percent: None,
                        code,
                        percent,
                    }
                }
            })
            .collect()
    }

    /// The first condition of `reference`, which is what gets displayed.
    pub fn primary(&self, reference: &str) -> Option<ResolvedIcon> {
        self.resolve(reference).into_iter().next()
    }
}

// (code, asset name, description)
const STANDARD_ICONS: &[(&str, &str, &str)] = &[
    ("skc", "clear", "Fair/clear"),
    ("few", "mostly-clear", "A few clouds"),
    ("sct", "partly-cloudy", "Partly cloudy"),
    ("bkn", "mostly-cloudy", "Mostly cloudy"),
    ("ovc", "overcast", "Overcast"),
    ("wind_skc", "wind", "Fair/clear and windy"),
    ("wind_few", "wind", "A few clouds and windy"),
    ("wind_sct", "wind-cloudy", "Partly cloudy and windy"),
    ("wind_bkn", "wind-cloudy", "Mostly cloudy and windy"),
    ("wind_ovc", "wind-cloudy", "Overcast and windy"),
    ("snow", "snow", "Snow"),
    ("rain_snow", "sleet", "Rain/snow"),
    ("rain_sleet", "sleet", "Rain/sleet"),
    ("snow_sleet", "sleet", "Snow/sleet"),
    ("fzra", "freezing-rain", "Freezing rain"),
    ("rain_fzra", "freezing-rain", "Rain/freezing rain"),
    ("snow_fzra", "freezing-rain", "Freezing rain/snow"),
    ("sleet", "sleet", "Sleet"),
    ("rain", "rain", "Rain"),
    ("rain_showers", "showers", "Rain showers (high cloud cover)"),
    ("rain_showers_hi", "showers-partly-cloudy", "Rain showers (low cloud cover)"),
    ("tsra", "thunderstorm", "Thunderstorm (high cloud cover)"),
    ("tsra_sct", "thunderstorm", "Thunderstorm (medium cloud cover)"),
    ("tsra_hi", "thunderstorm-partly-cloudy", "Thunderstorm (low cloud cover)"),
    ("tornado", "tornado", "Tornado"),
    ("hurricane", "hurricane", "Hurricane conditions"),
    ("tropical_storm", "hurricane", "Tropical storm conditions"),
    ("dust", "dust", "Dust"),
    ("smoke", "smoke", "Smoke"),
    ("haze", "haze", "Haze"),
    ("hot", "hot", "Hot"),
    ("cold", "cold", "Cold"),
    ("blizzard", "blizzard", "Blizzard"),
    ("fog", "fog", "Fog/mist"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn code(code: &str, percent: Option<u8>) -> IconCode {
        IconCode {
            code: code.to_string(),
            percent,
        }
    }

    #[test]
    fn parses_stacked_conditions_with_percent() {
        let codes = parse_icon_reference(
            "https://api.weather.gov/icons/land/day/rain_showers,30/tsra_hi,40?size=medium",
        );
        assert_eq!(
            codes,
            vec![
                code("rain_showers", Some(30)),
                code("tsra_hi", Some(40)),
            ]
        );
    }

    #[test]
    fn parses_single_condition_without_percent() {
        let codes = parse_icon_reference("https://api.weather.gov/icons/land/night/sct?size=small");
        assert_eq!(codes, vec![code("sct", None)]);
    }

    #[test]
    fn bare_code_is_its_own_condition() {
        assert_eq!(
            parse_icon_reference("bkn,20"),
            vec![code("bkn", Some(20))]
        );
        assert!(parse_icon_reference("").is_empty());
    }

    #[test]
    fn garbage_percent_is_absent() {
        assert_eq!(IconCode::parse("rain,lots").percent, None);
    }

    #[test]
    fn resolves_known_code_to_asset() {
        let table = IconTable::standard();
        let icon = table
            .primary("https://api.weather.gov/icons/land/day/rain_showers,30/tsra_hi,40")
            .unwrap();
        assert_eq!(icon.icon, "/icons/showers.svg");
        assert_eq!(icon.percent, Some(30));
    }

    #[test]
    fn unmapped_code_passes_through() {
        let table = IconTable::standard();
        let icons = table.resolve("https://api.weather.gov/icons/land/day/volcano,10");
        assert_eq!(icons.len(), 1);
        assert_eq!(icons[0].icon, "volcano");
        assert_eq!(icons[0].percent, Some(10));
        assert_eq!(icons[0].description, None);
    }

    #[test]
    fn overrides_replace_and_extend() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "skc".to_string(),
            IconAsset {
                icon: "sun.png".into(),
                description: None,
                percent: None,
            },
        );
        overrides.insert(
            "volcano".to_string(),
            IconAsset {
                icon: "lava.png".into(),
                description: None,
                percent: Some(90),
            },
        );

        let base = IconTable::standard();
        let table = base.with_overrides(&overrides);

        assert_eq!(table.lookup("skc").unwrap().icon, "sun.png");
        assert_eq!(table.lookup("volcano").unwrap().icon, "lava.png");
        let volcano = table.primary("volcano,10").unwrap();
        assert_eq!(volcano.canonical_percent, Some(90));
        assert_eq!(table.entries.len(), base.entries.len() + 1);
        assert_eq!(base.lookup("skc").unwrap().icon, "/icons/clear.svg");
    }

    #[test]
    fn canonical_percent_is_carried_alongside_encoded_one() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "rain".to_string(),
            IconAsset {
                icon: "/icons/rain.svg".into(),
                description: Some("Rain".into()),
                percent: Some(70),
            },
        );
        let table = IconTable::standard().with_overrides(&overrides);

        let encoded = table.primary("/icons/land/day/rain,40").unwrap();
        assert_eq!(encoded.percent, Some(40));
        assert_eq!(encoded.canonical_percent, Some(70));

        let bare = table.primary("/icons/land/day/rain").unwrap();
        assert_eq!(bare.percent, None);
        assert_eq!(bare.canonical_percent, Some(70));

        let standard = table.primary("/icons/land/day/skc").unwrap();
        assert_eq!(standard.canonical_percent, None);

        let unmapped = table.primary("/icons/land/day/volcano,10").unwrap();
        assert_eq!(unmapped.canonical_percent, None);
    }
}
