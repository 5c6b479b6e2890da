#![doc = "HTTP implementation of the content API: bridges the `ContentApi` trait to the GitBook v1 REST endpoint."]
//
//! # GitBook client
//!
//! [`GitBookClient`] wires the [`ContentApi`] trait up for real use against a
//! remote endpoint. The bearer credential and base endpoint are fixed at
//! construction and shared by every call of one run.
//!
//! Every response, whatever its shape, is classified into a [`Lookup`] by
//! [`classify`] so that callers never see raw transport errors.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{RequestBuilder, StatusCode};

use crate::contract::{ContentApi, Lookup, PageBatch};
use crate::error::ApiError;

/// Endpoint used when none is configured.
pub const DEFAULT_API_ENDPOINT: &str = "https://api-beta.gitbook.com/v1/";

pub struct GitBookClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GitBookClient {
    pub fn new(endpoint: &str, token: &str) -> Result<Self, ApiError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ApiError::InvalidCredential)?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("gitbook-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        tracing::info!(
            endpoint = %endpoint,
            token_set = !token.is_empty(),
            "Initialised GitBook client"
        );
        Ok(GitBookClient {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.endpoint, path)
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Lookup {
        let response = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(error = ?e, url = %url, "Request to content API failed");
                return Lookup::Failed(ApiError::Transport(e.to_string()));
            }
        };
        let status = response.status();
        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = ?e, url = %url, %status, "Failed to read response body");
                return Lookup::Failed(ApiError::Transport(e.to_string()));
            }
        };
        let outcome = classify(status, &body);
        match &outcome {
            Lookup::Found(_) => tracing::debug!(url = %url, %status, "Content API call succeeded"),
            Lookup::Absent => tracing::debug!(url = %url, %status, "Content API reported absence"),
            Lookup::Failed(e) => tracing::warn!(url = %url, %status, error = %e, "Content API call failed"),
        }
        outcome
    }
}

#[async_trait]
impl ContentApi for GitBookClient {
    async fn get(&self, path: &str) -> Lookup {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");
        self.send(self.http.get(&url), &url).await
    }

    async fn put(&self, path: &str, body: &PageBatch) -> Result<serde_json::Value, ApiError> {
        let url = self.url(path);
        tracing::debug!(url = %url, pages = body.pages.len(), "PUT");
        self.send(self.http.put(&url).json(body), &url)
            .await
            .into_result()
    }
}

/// Join endpoint and relative path with exactly one `/`.
pub fn join_url(endpoint: &str, path: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Classify a raw response into found / absent / failed.
///
/// A 404 status, or a success payload whose `error.status` is 404, means
/// absent. Any other error envelope or non-success status is a failure.
/// A success with an empty or non-JSON body is still found, as `Value::Null`.
pub fn classify(status: StatusCode, body: &str) -> Lookup {
    if status == StatusCode::NOT_FOUND {
        return Lookup::Absent;
    }
    if !status.is_success() {
        return Lookup::Failed(ApiError::Status {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "Success response without a JSON body");
            return Lookup::Found(serde_json::Value::Null);
        }
    };
    if let Some(envelope) = value.as_object().and_then(|obj| obj.get("error")) {
        let code = envelope
            .get("status")
            .and_then(|s| s.as_u64())
            .and_then(|s| u16::try_from(s).ok());
        if code == Some(404) {
            return Lookup::Absent;
        }
        let message = envelope
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error")
            .to_string();
        return Lookup::Failed(ApiError::Envelope {
            status: code,
            message,
        });
    }
    Lookup::Found(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_normalises_slashes() {
        assert_eq!(join_url("http://h/v1", "orgs"), "http://h/v1/orgs");
        assert_eq!(join_url("http://h/v1/", "orgs"), "http://h/v1/orgs");
        assert_eq!(
            join_url("http://h/v1/", "spaces/s/content/v/master/url/"),
            "http://h/v1/spaces/s/content/v/master/url/"
        );
    }

    #[test]
    fn status_404_is_absent() {
        let body = r#"{"error":{"status":404,"message":"Not Found"}}"#;
        assert!(matches!(classify(StatusCode::NOT_FOUND, body), Lookup::Absent));
    }

    #[test]
    fn error_envelope_404_under_success_status_is_absent() {
        let body = r#"{"error":{"status":404},"status":404}"#;
        assert!(matches!(classify(StatusCode::OK, body), Lookup::Absent));
    }

    #[test]
    fn other_envelopes_are_failures() {
        let body = r#"{"error":{"status":403,"message":"Forbidden"}}"#;
        match classify(StatusCode::OK, body) {
            Lookup::Failed(ApiError::Envelope { status, message }) => {
                assert_eq!(status, Some(403));
                assert_eq!(message, "Forbidden");
            }
            other => panic!("expected envelope failure, got {other:?}"),
        }
    }

    #[test]
    fn server_errors_are_failures() {
        assert!(matches!(
            classify(StatusCode::BAD_GATEWAY, "oops"),
            Lookup::Failed(ApiError::Status { status: 502, .. })
        ));
    }

    #[test]
    fn undecodable_success_is_found_without_payload() {
        assert!(matches!(
            classify(StatusCode::OK, "<html>"),
            Lookup::Found(serde_json::Value::Null)
        ));
        assert!(matches!(
            classify(StatusCode::NO_CONTENT, ""),
            Lookup::Found(serde_json::Value::Null)
        ));
    }

    #[test]
    fn error_key_in_non_object_payload_is_ignored() {
        assert!(matches!(
            classify(StatusCode::OK, r#"["error"]"#),
            Lookup::Found(_)
        ));
    }

    #[test]
    fn plain_payload_is_found() {
        match classify(StatusCode::OK, r#"{"uid":"group-uid","kind":"group"}"#) {
            Lookup::Found(v) => assert_eq!(v["uid"], "group-uid"),
            other => panic!("expected found, got {other:?}"),
        }
    }
}
