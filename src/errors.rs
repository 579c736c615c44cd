// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for service-policy reconciliation.
//!
//! This module provides specialized error types for:
//! - Parameter validation failures detected before any network call
//! - ONTAP REST transport failures (connection, HTTP status, malformed bodies)
//! - Reconciliation failures tagged with the operation that raised them
//! - Internal consistency defects between the planner and the mutators
//!
//! Every error is terminal: the reconciler never retries and never swallows
//! a failure.

use thiserror::Error;

/// Errors raised while validating and normalizing input parameters.
///
/// These are detected locally, before any remote call, and name the
/// offending field or value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A conditional requirement is not met (e.g. `scope: cluster` without ipspace)
    #[error("{condition} but all of the following are missing: {missing}")]
    RequiredIf {
        /// Human-readable trigger, e.g. "scope is cluster"
        condition: String,
        /// Comma-separated list of missing parameters
        missing: String,
    },

    /// None of a group of alternative parameters was supplied
    #[error("one of the following is required: {fields}")]
    RequiredOneOf {
        /// Comma-separated list of alternative parameters
        fields: String,
    },

    /// `no_service` was combined with other services
    #[error(
        "Error: no other service can be present when no_service is specified.  Got: {services:?}"
    )]
    NoServiceNotExclusive {
        /// The services list as supplied
        services: Vec<String>,
    },

    /// A vserver was supplied for a cluster-scoped policy
    #[error("Error: vserver cannot be set when \"scope: cluster\" is specified.  Got: {vserver}")]
    VserverWithClusterScope {
        /// The vserver that was supplied
        vserver: String,
    },

    /// An SVM-scoped policy was requested without a vserver
    #[error("Error: vserver cannot be None when \"scope: svm\" is specified.")]
    SvmScopeWithoutVserver,
}

/// Errors returned by the ONTAP REST transport.
///
/// These errors carry no operation context; the reconciler wraps them into
/// [`ServicePolicyError::Api`] with the name of the failing operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RestError {
    /// The request could not be built or sent (connection refused, timeout, TLS failure)
    #[error("failed to send {method} request to {url}: {reason}")]
    Request {
        /// HTTP method of the failed request
        method: String,
        /// Full URL of the failed request
        url: String,
        /// Reason reported by the HTTP client
        reason: String,
    },

    /// The API path could not be resolved against the REST root
    #[error("invalid endpoint {api}: {reason}")]
    InvalidEndpoint {
        /// API path relative to the REST root
        api: String,
        /// URL parse failure
        reason: String,
    },

    /// The backend answered with a non-success HTTP status
    #[error("calling: {api}: got HTTP {status}: {message}")]
    Status {
        /// API path relative to the REST root
        api: String,
        /// HTTP status code
        status: u16,
        /// ONTAP error message, or a description of the status when none was returned
        message: String,
    },

    /// The backend answered with a body that is not the expected JSON
    #[error("calling: {api}: malformed response: {reason}")]
    Decode {
        /// API path relative to the REST root
        api: String,
        /// Decoding failure
        reason: String,
    },
}

/// Composite error type returned by the service-policy reconciler.
///
/// This is the primary error type of the library. Its `Display` output is the
/// message reported to the caller on failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServicePolicyError {
    /// Bad parameter combination
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A remote call failed
    #[error("Error in {operation}: {message}")]
    Api {
        /// Operation that issued the call, e.g. `create_service_policy`
        operation: &'static str,
        /// Underlying failure
        message: String,
    },

    /// The lookup matched more than one record
    #[error(
        "Error in {operation}: calling: {api}: unexpected response: expected 0 or 1 record, got {count}."
    )]
    UnexpectedRecordCount {
        /// Operation that issued the lookup
        operation: &'static str,
        /// API path that was queried
        api: String,
        /// Number of records returned
        count: usize,
    },

    /// The computed modify diff holds attributes the backend cannot change
    #[error("Error: attributes not supported in modify: {attributes}")]
    UnsupportedModify {
        /// JSON rendering of the offending attributes
        attributes: String,
    },

    /// A delete or modify was planned without a current record to act on
    #[error("Error in {operation}: no current service policy to act on")]
    MissingCurrentState {
        /// Operation that needed the current record
        operation: &'static str,
    },

    /// Modify was invoked without anything to change
    #[error("Error: nothing to change - modify called with: {modify}")]
    NothingToChange {
        /// JSON rendering of the diff modify was called with
        modify: String,
    },

    /// The backend is older than the minimum supported release
    #[error("Error: {module} only supports REST, and requires ONTAP {required} or later.  Found: {found}.")]
    UnsupportedVersion {
        /// Name of the tool refusing to run
        module: &'static str,
        /// Minimum release, e.g. "9.8.0"
        required: String,
        /// Release reported by the backend
        found: String,
    },
}

impl ServicePolicyError {
    /// Tag a transport failure with the operation that issued it.
    #[must_use]
    pub fn api(operation: &'static str, err: &RestError) -> Self {
        Self::Api {
            operation,
            message: err.to_string(),
        }
    }

    /// Whether this error was raised before any network call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
