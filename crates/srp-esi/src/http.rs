//! Response checks shared by the ESI client methods.
//!
//! ESI throttles in two ways: the usual 429 with `Retry-After`, and its own
//! 420 "error limited" status with `X-ESI-Error-Limit-Reset`. Both become
//! [`ResolverError::RateLimited`]. Any other non-success status becomes
//! [`ResolverError::Api`] carrying the body.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::error::ResolverError;

const ERROR_LIMIT_RESET: &str = "x-esi-error-limit-reset";

/// Wait used when a throttling response names no usable delay.
const DEFAULT_BACKOFF_SECS: u64 = 60;

/// ESI's error-limit status. Not a registered HTTP code.
const ERROR_LIMITED: u16 = 420;

/// Pass a successful response through, or turn it into a [`ResolverError`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ResolverError> {
    let status = resp.status();
    if let Some(retry_after_secs) = throttle_delay(status, resp.headers()) {
        return Err(ResolverError::RateLimited { retry_after_secs });
    }
    if !status.is_success() {
        return Err(ResolverError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Decode a JSON body. Decode failures are [`ResolverError::Parse`].
pub async fn read_json<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ResolverError> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ResolverError::Parse(e.to_string()))
}

/// Seconds to back off for a throttling status, `None` for anything else.
fn throttle_delay(status: StatusCode, headers: &HeaderMap) -> Option<u64> {
    let header = if status == StatusCode::TOO_MANY_REQUESTS {
        RETRY_AFTER.as_str()
    } else if status.as_u16() == ERROR_LIMITED {
        ERROR_LIMIT_RESET
    } else {
        return None;
    };
    Some(
        headers
            .get(header)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_BACKOFF_SECS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, headers: &[(&str, &str)], body: &'static str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        reqwest::Response::from(builder.body(body).unwrap())
    }

    async fn retry_after_of(resp: reqwest::Response) -> u64 {
        match check_response(resp).await {
            Err(ResolverError::RateLimited { retry_after_secs }) => retry_after_secs,
            other => panic!("expected rate limit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn too_many_requests_reads_retry_after() {
        let resp = response(429, &[("Retry-After", "30")], "");
        assert_eq!(retry_after_of(resp).await, 30);
    }

    #[tokio::test]
    async fn error_limited_reads_reset_header() {
        let resp = response(420, &[("X-ESI-Error-Limit-Reset", " 17 ")], "");
        assert_eq!(retry_after_of(resp).await, 17);
    }

    #[tokio::test]
    async fn throttling_without_usable_header_backs_off_a_minute() {
        assert_eq!(retry_after_of(response(429, &[], "")).await, 60);
        let resp = response(420, &[("X-ESI-Error-Limit-Reset", "soon")], "");
        assert_eq!(retry_after_of(resp).await, 60);
    }

    #[tokio::test]
    async fn server_error_keeps_status_and_body() {
        let resp = response(502, &[], r#"{"error":"bad gateway"}"#);
        match check_response(resp).await {
            Err(ResolverError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert!(message.contains("bad gateway"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(response(200, &[], "{}")).await.is_ok());
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let err = read_json::<serde_json::Value>(response(200, &[], "not json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolverError::Parse(_)));
    }
}
