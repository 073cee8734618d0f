//! Practitioner directory ingestion: fetch, narrow, normalize.
//!
//! The transport is the only fallible step. Everything after it is total:
//! a bad payload shape or a bad field degrades to defaults, never to an error.

pub mod normalizer;
pub mod raw;
pub mod source;

pub use normalizer::*;
pub use raw::*;
pub use source::*;

use thiserror::Error;

use crate::models::Practitioner;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Practitioner source unreachable at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Practitioner source returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

/// Fetch and normalize, surfacing transport failures to the caller.
pub async fn try_load_practitioners<S: PractitionerSource>(
    source: &S,
) -> Result<Vec<Practitioner>, FetchError> {
    let payload = source.fetch_payload().await?;
    let practitioners = normalize(&payload);
    tracing::info!(count = practitioners.len(), "Loaded practitioners");
    Ok(practitioners)
}

/// Fetch and normalize. Transport failures become an empty list and a log event.
pub async fn load_practitioners<S: PractitionerSource>(source: &S) -> Vec<Practitioner> {
    match try_load_practitioners(source).await {
        Ok(practitioners) => practitioners,
        Err(e) => {
            tracing::error!(error = %e, "Error fetching practitioners");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn load_normalizes_payload() {
        let source = StaticSource::new(json!([
            {"id": "1", "name": "Dr. A", "fees": "₹ 300"},
            {"id": "2", "name": "Dr. B", "fees": "₹ 100"}
        ]));

        let list = load_practitioners(&source).await;
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].fee, 300);
        assert_eq!(list[1].name, "Dr. B");
    }

    #[tokio::test]
    async fn transport_failure_is_empty_list() {
        let source = StaticSource::failing(FetchError::Connection("http://nowhere".into()));
        assert!(load_practitioners(&source).await.is_empty());
    }

    #[tokio::test]
    async fn try_load_propagates_transport_failure() {
        let source = StaticSource::failing(FetchError::Timeout(30));
        let err = try_load_practitioners(&source).await.unwrap_err();
        assert_eq!(err, FetchError::Timeout(30));
        assert_eq!(err.to_string(), "Request timed out after 30s");
    }

    #[tokio::test]
    async fn shape_failure_is_empty_list_not_error() {
        let source = StaticSource::new(json!({"doctors": [{"name": "Dr. A"}]}));
        let list = try_load_practitioners(&source).await.unwrap();
        assert!(list.is_empty());
    }
}
