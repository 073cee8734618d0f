use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use super::FetchError;
use crate::config::DirectoryConfig;

/// Where the raw practitioner payload comes from.
///
/// One call resolves once with the whole payload or fails once.
/// No streaming, no partial results, no retry.
pub trait PractitionerSource {
    fn fetch_payload(&self) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// HTTP source reading a JSON document from a fixed endpoint.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpSource {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::HttpClient(e.to_string()))?;

        Ok(Self {
            url: url.to_string(),
            client,
            timeout_secs,
        })
    }

    pub fn from_config(config: &DirectoryConfig) -> Result<Self, FetchError> {
        Self::new(&config.source_url, config.fetch_timeout_secs)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PractitionerSource for HttpSource {
    async fn fetch_payload(&self) -> Result<Value, FetchError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_connect() {
                FetchError::Connection(self.url.clone())
            } else if e.is_timeout() {
                FetchError::Timeout(self.timeout_secs)
            } else {
                FetchError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::ResponseParsing(e.to_string()))
    }
}

/// Fixed in-memory source — returns a configurable payload or error.
pub struct StaticSource {
    outcome: Result<Value, FetchError>,
}

impl StaticSource {
    pub fn new(payload: Value) -> Self {
        Self {
            outcome: Ok(payload),
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl PractitionerSource for StaticSource {
    async fn fetch_payload(&self) -> Result<Value, FetchError> {
        self.outcome.clone()
    }
}
