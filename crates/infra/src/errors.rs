//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use tilequote_domain::QuoteError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub QuoteError);

impl From<InfraError> for QuoteError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<QuoteError> for InfraError {
    fn from(value: QuoteError) -> Self {
        InfraError(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → QuoteError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(QuoteError::DataFetch(transport_reason(&value)))
    }
}

/// Human-readable reason for a transport-level failure. Shared by the
/// fetch adapters (where it becomes `DataFetch`) and the delivery adapters
/// (where it lands inside a `DeliveryError` stage).
pub fn transport_reason(err: &HttpError) -> String {
    if err.is_timeout() {
        return "request timed out".to_string();
    }
    if err.is_connect() {
        return format!("connection failed: {err}");
    }
    if let Some(status) = err.status() {
        return format!("server responded with {status}");
    }
    if err.is_body() || err.is_decode() {
        return format!("malformed response body: {err}");
    }
    err.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infra_error_round_trips_the_domain_error() {
        let domain = QuoteError::DataFetch("catalog unreachable".into());
        let infra: InfraError = domain.into();
        let back: QuoteError = infra.into();
        assert!(matches!(back, QuoteError::DataFetch(_)));
    }
}
