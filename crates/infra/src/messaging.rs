//! Messaging-gateway adapter
//!
//! Hands a stored document URL to the WhatsApp gateway. The adapter never
//! retries: by the time this runs the upload already succeeded, and the
//! caller decides whether to retry the notify step (see
//! [`crate::delivery::DeliveryService::notify_existing`]).

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use tilequote_core::ports::MessagingGateway;
use tilequote_domain::{DeliveryError, QuoteError, Result};
use tracing::debug;

use crate::http::HttpClient;

/// WhatsApp gateway expecting `POST /messages` with a JSON body and
/// responding `{ "sent": true }`.
pub struct WhatsAppGateway {
    client: HttpClient,
    base_url: String,
}

#[derive(Serialize)]
struct OutboundMessage<'a> {
    to: &'a str,
    message: &'a str,
    attachment_url: &'a str,
}

#[derive(serde::Deserialize)]
struct GatewayResponse {
    #[serde(default)]
    sent: bool,
}

impl WhatsAppGateway {
    /// The gateway client is built with a single attempt; this adapter
    /// must not retry on its own.
    pub fn new(client: HttpClient, base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { client, base_url: base }
    }
}

#[async_trait]
impl MessagingGateway for WhatsAppGateway {
    async fn notify(&self, phone: &str, message: &str, attachment_url: &str) -> Result<bool> {
        let endpoint = format!("{}/messages", self.base_url);
        let body = OutboundMessage { to: phone, message, attachment_url };
        let request = self.client.request(Method::POST, &endpoint).json(&body);

        let response = self.client.send(request).await.map_err(|err| {
            notify_error(attachment_url, err.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(notify_error(
                attachment_url,
                format!("gateway responded with {status}"),
            ));
        }

        let body: GatewayResponse = response
            .json()
            .await
            .map_err(|err| notify_error(attachment_url, format!("malformed gateway response: {err}")))?;

        debug!(phone, sent = body.sent, "gateway accepted notify request");
        Ok(body.sent)
    }
}

fn notify_error(document_url: &str, reason: String) -> QuoteError {
    QuoteError::Delivery(DeliveryError::Notify { document_url: document_url.to_string(), reason })
}
