// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! ONTAP REST HTTP operations.
//!
//! This module contains the request plumbing shared by every call the
//! reconciler makes: URL building, authentication, error-body decoding and
//! request/response logging. Calls are never retried.

use reqwest::{Client as HttpClient, Method};
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use super::Credentials;
use crate::constants::API_PREFIX;
use crate::errors::RestError;
use crate::http_errors::{describe_connection_error, describe_http_status};
use crate::ontap::types::OntapErrorResponse;

/// Build the REST root URL from a cluster address.
///
/// Converts "cluster1" or "cluster1.example.com" to `<https://cluster1/api/>`,
/// honoring an explicit `http://`/`https://` scheme and an optional port.
/// Bare IPv6 literals are bracketed.
///
/// # Errors
///
/// Returns an error if the resulting URL cannot be parsed.
pub fn build_api_url(
    hostname: &str,
    https: bool,
    port: Option<u16>,
) -> Result<Url, url::ParseError> {
    let hostname = hostname.trim().trim_end_matches('/');
    let with_scheme = if hostname.starts_with("http://") || hostname.starts_with("https://") {
        hostname.to_string()
    } else {
        let scheme = if https { "https" } else { "http" };
        if hostname.matches(':').count() > 1 && !hostname.starts_with('[') {
            format!("{scheme}://[{hostname}]")
        } else {
            format!("{scheme}://{hostname}")
        }
    };

    let mut url = Url::parse(&with_scheme)?;
    if port.is_some() {
        url.set_port(port)
            .map_err(|()| url::ParseError::InvalidPort)?;
    }
    url.set_path(&format!("{API_PREFIX}/"));
    url.set_query(None);
    Ok(url)
}

/// Resolve an API path and query against the REST root.
///
/// # Errors
///
/// Returns an error if `api` is not a valid relative path.
pub fn endpoint_url(base: &Url, api: &str, query: &[(&str, String)]) -> Result<Url, RestError> {
    let mut url = base
        .join(api.trim_start_matches('/'))
        .map_err(|e| RestError::InvalidEndpoint {
            api: api.to_string(),
            reason: e.to_string(),
        })?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

/// Execute a single request against the ONTAP REST API.
///
/// # Arguments
/// * `client` - HTTP client
/// * `credentials` - Optional basic-auth credentials
/// * `method` - HTTP method (GET, POST, PATCH, DELETE)
/// * `api` - API path relative to the REST root, used in error messages
/// * `url` - Full URL of the endpoint
/// * `body` - Optional JSON body for POST and PATCH
///
/// # Errors
///
/// Returns an error if the request cannot be sent, the backend answers with a
/// non-success status, or the response body is not JSON.
pub async fn ontap_request(
    client: &HttpClient,
    credentials: Option<&Credentials>,
    method: Method,
    api: &str,
    url: &Url,
    body: Option<&Value>,
) -> Result<Value, RestError> {
    info!(
        method = %method,
        url = %url,
        auth_enabled = credentials.is_some(),
        "HTTP API request to ONTAP"
    );
    debug!(method = %method, url = %url, body = ?body, "HTTP API request body");

    let mut request = client.request(method.clone(), url.clone());
    if let Some(body_data) = body {
        request = request.json(body_data);
    }
    if let Some(creds) = credentials {
        request = request.basic_auth(&creds.username, creds.password.as_deref());
    }

    let response = request.send().await.map_err(|e| RestError::Request {
        method: method.to_string(),
        url: url.to_string(),
        reason: describe_connection_error(&e),
    })?;

    let status = response.status();
    let text = response.text().await.map_err(|e| RestError::Decode {
        api: api.to_string(),
        reason: e.to_string(),
    })?;

    if !status.is_success() {
        let message = match serde_json::from_str::<OntapErrorResponse>(&text) {
            Ok(parsed) => parsed.error.to_string(),
            Err(_) => describe_http_status(status.as_u16()),
        };
        error!(
            method = %method,
            url = %url,
            status = %status,
            error = %message,
            "HTTP API request failed"
        );
        return Err(RestError::Status {
            api: api.to_string(),
            status: status.as_u16(),
            message,
        });
    }

    info!(
        method = %method,
        url = %url,
        status = %status,
        response_len = text.len(),
        "HTTP API request successful"
    );

    if text.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(&text).map_err(|e| RestError::Decode {
        api: api.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "rest_ops_tests.rs"]
mod rest_ops_tests;
