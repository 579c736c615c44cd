// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Task file and connection configuration.
//!
//! A reconciliation run is described by a task file holding three sections:
//!
//! ```yaml
//! connection:
//!   hostname: cluster1.example.com
//!   username: admin
//!   https: true
//!   validate_certs: false
//! params:
//!   name: svc1
//!   vserver: vs1
//!   services: [data_nfs]
//! check_mode: false
//! ```
//!
//! Connection settings may also come from the command line or `ONTAP_*`
//! environment variables. Those override the task file, field by field.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use crate::params::ServicePolicyParams;

/// A complete task: where to connect, what to reconcile, and whether to apply.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskFile {
    /// Connection settings; every field may be overridden from the command line
    #[serde(default)]
    pub connection: PartialConnection,

    /// Desired service-policy parameters
    pub params: ServicePolicyParams,

    /// Plan without applying any change
    #[serde(default)]
    pub check_mode: bool,
}

/// Connection settings where every field is optional.
///
/// Used both for the `connection` section of a task file and for command
/// line overrides, then resolved into a [`ConnectionConfig`] by [`resolve`].
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConnection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate_certs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl PartialConnection {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: PartialConnection) -> PartialConnection {
        PartialConnection {
            hostname: other.hostname.or(self.hostname),
            username: other.username.or(self.username),
            password: other.password.or(self.password),
            https: other.https.or(self.https),
            validate_certs: other.validate_certs.or(self.validate_certs),
            http_port: other.http_port.or(self.http_port),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
        }
    }
}

impl fmt::Debug for PartialConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialConnection")
            .field("hostname", &self.hostname)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("https", &self.https)
            .field("validate_certs", &self.validate_certs)
            .field("http_port", &self.http_port)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Resolved connection settings for the ONTAP REST API.
#[derive(Clone, PartialEq)]
pub struct ConnectionConfig {
    /// Cluster management hostname or IP, optionally with an `http(s)://` scheme
    pub hostname: String,
    /// Basic-auth username
    pub username: Option<String>,
    /// Basic-auth password
    pub password: Option<String>,
    /// Use HTTPS when the hostname carries no scheme
    pub https: bool,
    /// Verify the cluster's TLS certificate
    pub validate_certs: bool,
    /// Non-default port
    pub http_port: Option<u16>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ConnectionConfig {
    /// Settings for `hostname` with every other field at its default.
    #[must_use]
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            username: None,
            password: None,
            https: true,
            validate_certs: true,
            http_port: None,
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("hostname", &self.hostname)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("https", &self.https)
            .field("validate_certs", &self.validate_certs)
            .field("http_port", &self.http_port)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Resolve partial settings into a usable [`ConnectionConfig`].
///
/// # Errors
///
/// Returns an error if no hostname was supplied by any source.
pub fn resolve(partial: PartialConnection) -> Result<ConnectionConfig> {
    let hostname = partial
        .hostname
        .filter(|h| !h.trim().is_empty())
        .context("missing required connection setting: hostname")?;

    let defaults = ConnectionConfig::new(hostname);
    Ok(ConnectionConfig {
        username: partial.username,
        password: partial.password,
        https: partial.https.unwrap_or(defaults.https),
        validate_certs: partial.validate_certs.unwrap_or(defaults.validate_certs),
        http_port: partial.http_port,
        timeout: partial
            .timeout_secs
            .map_or(defaults.timeout, Duration::from_secs),
        ..defaults
    })
}

/// Load a task file from disk.
///
/// YAML is accepted, and since JSON is a subset of YAML so is JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe a task.
pub fn load_task_file(path: &Path) -> Result<TaskFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read task file {}", path.display()))?;
    parse_task(&raw).with_context(|| format!("Invalid task file {}", path.display()))
}

/// Parse a task from its YAML or JSON text.
///
/// # Errors
///
/// Returns an error if the text is not a valid task.
pub fn parse_task(raw: &str) -> Result<TaskFile> {
    serde_yaml::from_str(raw).context("Failed to parse task")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
