//! Object-store adapter
//!
//! Uploads a composed document to the external object store and hands back
//! its retrieval URL. Any failure here is a `DeliveryError::Upload`:
//! nothing was stored, so the whole delivery is retried from scratch.

use async_trait::async_trait;
use reqwest::Method;
use tilequote_core::ports::ObjectStore;
use tilequote_domain::{DeliveryError, QuoteError, Result};
use tracing::debug;

use crate::errors::transport_reason;
use crate::http::HttpClient;

/// HTTP object store expecting `POST /documents` with the raw PDF body and
/// returning `{ "url": "https://..." }`.
pub struct HttpObjectStore {
    client: HttpClient,
    base_url: String,
}

#[derive(serde::Deserialize)]
struct StoreResponse {
    url: String,
}

impl HttpObjectStore {
    pub fn new(client: HttpClient, base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { client, base_url: base }
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn store(&self, bytes: &[u8], file_name: &str) -> Result<String> {
        let endpoint = format!("{}/documents", self.base_url);
        let request = self
            .client
            .request(Method::POST, &endpoint)
            .query(&[("file_name", file_name)])
            .header(reqwest::header::CONTENT_TYPE, "application/pdf")
            .body(bytes.to_vec());

        let response = self.client.send(request).await.map_err(|err| upload_error(&err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::Delivery(DeliveryError::Upload {
                reason: format!("object store responded with {status}"),
            }));
        }

        let body: StoreResponse = response.json().await.map_err(|err| {
            QuoteError::Delivery(DeliveryError::Upload {
                reason: format!("malformed store response: {}", transport_reason(&err)),
            })
        })?;

        let parsed = url::Url::parse(&body.url).map_err(|err| {
            QuoteError::Delivery(DeliveryError::Upload {
                reason: format!("store returned an invalid URL: {err}"),
            })
        })?;
        if parsed.scheme() != "https" {
            return Err(QuoteError::Delivery(DeliveryError::Upload {
                reason: format!("store returned a non-HTTPS URL: {}", body.url),
            }));
        }

        debug!(file_name, url = %body.url, "document stored");
        Ok(body.url)
    }
}

fn upload_error(err: &QuoteError) -> QuoteError {
    QuoteError::Delivery(DeliveryError::Upload { reason: err.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_become_upload_stage_errors() {
        let err = upload_error(&QuoteError::DataFetch("request timed out".into()));
        match err {
            QuoteError::Delivery(DeliveryError::Upload { reason }) => {
                assert!(reason.contains("timed out"));
            }
            other => panic!("expected upload error, got {other:?}"),
        }
    }
}
