use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::{collections::HashMap, fmt::Debug};

use crate::{
    error::{Error, Result},
    geo::Coordinate,
};

pub mod http;

pub use http::HttpSource;

/// Anything that can turn a URL into a JSON document.
#[async_trait]
pub trait JsonSource: Send + Sync + Debug {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value>;
}

/// Fetch `url` and decode it into one of the wire schemas in [`crate::api`].
pub async fn fetch<T: DeserializeOwned>(source: &dyn JsonSource, url: &str) -> Result<T> {
    let value = source.get_json(url).await?;
    serde_json::from_value(value).map_err(|source| Error::Decode {
        url: url.to_string(),
        source,
    })
}

/// URL templates for the api.weather.gov resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// The API redirects requests with more than four decimal places.
    pub fn point(&self, coordinate: Coordinate) -> String {
        format!(
            "{}/points/{:.4},{:.4}",
            self.base_url, coordinate.latitude, coordinate.longitude
        )
    }

    pub fn grid_stations(&self, grid_id: &str) -> String {
        format!("{}/gridpoints/{grid_id}/stations", self.base_url)
    }

    pub fn station(&self, station_id: &str) -> String {
        format!("{}/stations/{station_id}", self.base_url)
    }

    pub fn latest_observation(&self, station_id: &str) -> String {
        format!("{}/stations/{station_id}/observations/latest", self.base_url)
    }

    pub fn forecast(&self, grid_id: &str) -> String {
        format!("{}/gridpoints/{grid_id}/forecast", self.base_url)
    }

    pub fn gridpoint(&self, grid_id: &str) -> String {
        format!("{}/gridpoints/{grid_id}", self.base_url)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BASE_URL)
    }
}

/// Serves canned documents keyed by URL. Unknown URLs answer 404.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: HashMap<String, serde_json::Value>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, document: serde_json::Value) -> Self {
        self.documents.insert(url.into(), document);
        self
    }
}

#[async_trait]
impl JsonSource for StaticSource {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        self.documents.get(url).cloned().ok_or_else(|| Error::Status {
            url: url.to_string(),
            status: 404,
            body: "not found".to_string(),
        })
    }
}
