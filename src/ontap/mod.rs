// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! ONTAP REST API client.
//!
//! This module provides the seam between the reconciler and the storage
//! cluster. It handles:
//!
//! - The [`RestApi`] trait, the abstract remote resource client the
//!   reconciler is written against
//! - [`OntapClient`], a reqwest-backed implementation speaking to
//!   `https://<cluster>/api/`
//! - The backend version gate
//!
//! # Example
//!
//! ```rust,no_run
//! use ontap_service_policy::config::ConnectionConfig;
//! use ontap_service_policy::ontap::{OntapClient, RestApi};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = OntapClient::new(&ConnectionConfig::new("cluster1.example.com"))?;
//!
//! let records = client
//!     .get("network/ip/service-policies", &[("name", "default-data-files".to_string())])
//!     .await?;
//! println!("{records}");
//! # Ok(())
//! # }
//! ```

pub mod rest_ops;
pub mod types;
pub mod version;

#[cfg(test)]
pub mod fake;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::warn;
use url::Url;

use crate::config::ConnectionConfig;
use crate::errors::RestError;

/// Abstract client for the ONTAP REST API.
///
/// Each method is a single blocking round trip from the caller's point of
/// view: the reconciler awaits it before issuing the next call. API paths are
/// relative to the REST root, e.g. `network/ip/service-policies`.
#[async_trait]
pub trait RestApi: Send + Sync {
    /// GET a collection or object with query parameters.
    async fn get(&self, api: &str, query: &[(&str, String)]) -> Result<Value, RestError>;

    /// POST a JSON body to a collection.
    async fn post(&self, api: &str, body: &Value) -> Result<Value, RestError>;

    /// PATCH an object with a JSON body.
    async fn patch(&self, api: &str, body: &Value) -> Result<Value, RestError>;

    /// DELETE an object.
    async fn delete(&self, api: &str) -> Result<Value, RestError>;
}

/// Basic-auth credentials.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// reqwest-backed [`RestApi`] implementation.
///
/// # Examples
///
/// ```rust,no_run
/// use ontap_service_policy::config::ConnectionConfig;
/// use ontap_service_policy::ontap::OntapClient;
///
/// let client = OntapClient::new(&ConnectionConfig::new("10.0.0.10")).unwrap();
/// assert_eq!(client.base_url().as_str(), "https://10.0.0.10/api/");
/// ```
#[derive(Debug, Clone)]
pub struct OntapClient {
    /// HTTP client for API requests
    client: Arc<HttpClient>,
    /// REST root, always ending in `/api/`
    base_url: Arc<Url>,
    /// Basic-auth credentials, when configured
    credentials: Option<Arc<Credentials>>,
}

impl OntapClient {
    /// Create a client from resolved connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the hostname does not form a valid URL or the HTTP
    /// client cannot be built.
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        let base_url = rest_ops::build_api_url(&config.hostname, config.https, config.http_port)
            .with_context(|| format!("Invalid ONTAP hostname: {}", config.hostname))?;

        if !config.validate_certs {
            warn!(
                hostname = %config.hostname,
                "TLS certificate validation is disabled"
            );
        }

        let client = HttpClient::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.validate_certs)
            .build()
            .context("Failed to build HTTP client")?;

        let credentials = config.username.as_ref().map(|username| {
            Arc::new(Credentials {
                username: username.clone(),
                password: config.password.clone(),
            })
        });
        if credentials.is_none() {
            warn!(hostname = %config.hostname, "No ONTAP username configured, sending unauthenticated requests");
        }

        Ok(Self {
            client: Arc::new(client),
            base_url: Arc::new(base_url),
            credentials,
        })
    }

    /// The REST root every API path is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        api: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, RestError> {
        let url = rest_ops::endpoint_url(&self.base_url, api, query)?;
        rest_ops::ontap_request(
            &self.client,
            self.credentials.as_deref(),
            method,
            api,
            &url,
            body,
        )
        .await
    }
}

#[async_trait]
impl RestApi for OntapClient {
    async fn get(&self, api: &str, query: &[(&str, String)]) -> Result<Value, RestError> {
        self.send(Method::GET, api, query, None).await
    }

    async fn post(&self, api: &str, body: &Value) -> Result<Value, RestError> {
        self.send(Method::POST, api, &[], Some(body)).await
    }

    async fn patch(&self, api: &str, body: &Value) -> Result<Value, RestError> {
        self.send(Method::PATCH, api, &[], Some(body)).await
    }

    async fn delete(&self, api: &str) -> Result<Value, RestError> {
        self.send(Method::DELETE, api, &[], None).await
    }
}
