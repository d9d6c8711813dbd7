use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    config::ApiConfig,
    error::{Error, Result},
};

use super::JsonSource;

/// reqwest-backed [`JsonSource`] for api.weather.gov.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: Client,
}

impl HttpSource {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/geo+json"));

        // api.weather.gov rejects requests without a User-Agent.
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(Error::Client)?;

        Ok(Self { http })
    }
}

#[async_trait]
impl JsonSource for HttpSource {
    #[instrument(skip(self))]
    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        debug!("fetching");

        let res = self.http.get(url).send().await.map_err(|source| Error::Request {
            url: url.to_string(),
            source,
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| Error::Request {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
