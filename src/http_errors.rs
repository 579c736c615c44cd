// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HTTP status and connection error descriptions for the ONTAP REST API.
//!
//! ONTAP normally returns an `{"error": {"message": ..., "code": ...}}` body on
//! failure. When it does not (proxies, load balancers, empty bodies), the
//! transport falls back to the descriptions in this module so that the
//! operator still gets a readable message.
//!
//! # Usage
//!
//! ```rust
//! use ontap_service_policy::http_errors::describe_http_status;
//!
//! let message = describe_http_status(401);
//! assert!(message.contains("authentication"));
//!
//! let message = describe_http_status(503);
//! assert!(message.contains("unavailable"));
//! ```

/// Map an HTTP status code to a human-readable message.
///
/// # HTTP Code Mapping
///
/// | HTTP Code | Meaning |
/// |-----------|---------|
/// | 400 | Invalid request |
/// | 401 | Authentication required |
/// | 403 | Insufficient permissions |
/// | 404 | Resource not found |
/// | 409 | Conflicting resource |
/// | 500 | Internal server error |
/// | 502 | Bad gateway |
/// | 503 | Service unavailable |
/// | 504 | Gateway timeout |
/// | Other | Unexpected error |
#[must_use]
pub fn describe_http_status(status_code: u16) -> String {
    match status_code {
        400 => "Invalid request to ONTAP REST API (400)".into(),
        401 => "ONTAP authentication required (401)".into(),
        403 => "ONTAP authorization failed (403)".into(),
        404 => "Resource not found on ONTAP (404)".into(),
        409 => "Conflicting resource on ONTAP (409)".into(),
        500 => "ONTAP REST API internal error (500)".into(),
        502 => "Bad gateway reaching ONTAP (502)".into(),
        503 => "ONTAP REST service unavailable (503)".into(),
        504 => "Gateway timeout reaching ONTAP (504)".into(),
        _ => format!("Unexpected HTTP error from ONTAP ({status_code})"),
    }
}

/// Describe a failure that happened before any HTTP status was received.
///
/// # Common Causes
///
/// - Wrong hostname or port
/// - Certificate validation failure (self-signed cluster certificate)
/// - Network policy or firewall blocking traffic
/// - Request exceeding the configured timeout
#[must_use]
pub fn describe_connection_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}

#[cfg(test)]
#[path = "http_errors_tests.rs"]
mod http_errors_tests;
