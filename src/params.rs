// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Declared parameter surface for service-policy reconciliation.
//!
//! These types describe the raw, unvalidated input a caller hands to the
//! reconciler. They are deserialized from a task file (YAML or JSON) and
//! validated into a [`DesiredState`](crate::reconcilers::service_policy::types::DesiredState)
//! before any remote call is made.
//!
//! # Example
//!
//! ```rust
//! use ontap_service_policy::params::{Service, ServicePolicyParams, State};
//!
//! let params: ServicePolicyParams = serde_yaml::from_str(
//!     r#"
//! name: svc1
//! vserver: vs1
//! services: [data_nfs]
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(params.state, State::Present);
//! assert_eq!(params.services, Some(vec![Service::DataNfs]));
//! ```

use schemars::{JsonSchema, Schema};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the service policy should exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// The policy must exist with the requested attributes
    #[default]
    Present,
    /// The policy must not exist
    Absent,
}

/// Ownership scope of a service policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Cluster-wide policy, qualified by an ipspace
    Cluster,
    /// Policy owned by a single SVM
    Svm,
}

impl Scope {
    /// Wire representation of the scope.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cluster => "cluster",
            Self::Svm => "svm",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Network service that can be bound to a service policy.
///
/// `NoService` is a sentinel: it clears every service and cannot be combined
/// with any other value in the same request.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    ClusterCore,
    InterclusterCore,
    ManagementCore,
    ManagementAutosupport,
    ManagementBgp,
    ManagementEms,
    ManagementHttps,
    ManagementSsh,
    ManagementPortmap,
    DataCore,
    DataNfs,
    DataCifs,
    DataFlexcache,
    DataIscsi,
    #[serde(rename = "data_s3_server")]
    DataS3Server,
    NoService,
}

impl Service {
    /// Every accepted service value, in declaration order.
    pub const ALL: [Service; 16] = [
        Self::ClusterCore,
        Self::InterclusterCore,
        Self::ManagementCore,
        Self::ManagementAutosupport,
        Self::ManagementBgp,
        Self::ManagementEms,
        Self::ManagementHttps,
        Self::ManagementSsh,
        Self::ManagementPortmap,
        Self::DataCore,
        Self::DataNfs,
        Self::DataCifs,
        Self::DataFlexcache,
        Self::DataIscsi,
        Self::DataS3Server,
        Self::NoService,
    ];

    /// Wire representation of the service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClusterCore => "cluster_core",
            Self::InterclusterCore => "intercluster_core",
            Self::ManagementCore => "management_core",
            Self::ManagementAutosupport => "management_autosupport",
            Self::ManagementBgp => "management_bgp",
            Self::ManagementEms => "management_ems",
            Self::ManagementHttps => "management_https",
            Self::ManagementSsh => "management_ssh",
            Self::ManagementPortmap => "management_portmap",
            Self::DataCore => "data_core",
            Self::DataNfs => "data_nfs",
            Self::DataCifs => "data_cifs",
            Self::DataFlexcache => "data_flexcache",
            Self::DataIscsi => "data_iscsi",
            Self::DataS3Server => "data_s3_server",
            Self::NoService => "no_service",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw parameters describing the desired service policy.
///
/// Unknown keys are rejected so that a typo in a task file fails loudly
/// instead of silently dropping an attribute.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ServicePolicyParams {
    /// Whether the specified service policy should exist or not.
    #[serde(default)]
    pub state: State,

    /// The name of the service policy.
    pub name: String,

    /// Name of the ipspace.
    ///
    /// Required for cluster-scoped service policies, optional for SVM-scoped ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipspace: Option<String>,

    /// Set to "svm" for policies owned by an SVM, otherwise "cluster".
    ///
    /// `svm` is assumed when vserver is set, `cluster` otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,

    /// List of services to associate to this service policy.
    ///
    /// Use `no_service` alone to remove all services.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,

    /// The name of the vserver (SVM) owning the policy.
    ///
    /// Omit for cluster-scoped policies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vserver: Option<String>,
}

impl ServicePolicyParams {
    /// Look up a parameter by its declared name, rendered as a string.
    ///
    /// Used by the declarative constraint tables; list-valued parameters are
    /// only reported as present or absent.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<String> {
        match key {
            "name" => Some(self.name.clone()),
            "ipspace" => self.ipspace.clone(),
            "scope" => self.scope.map(|s| s.as_str().to_string()),
            "vserver" => self.vserver.clone(),
            "services" => self.services.as_ref().map(|_| String::new()),
            _ => None,
        }
    }
}

/// JSON schema of [`ServicePolicyParams`], as accepted in a task file.
#[must_use]
pub fn params_schema() -> Schema {
    schemars::schema_for!(ServicePolicyParams)
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod params_tests;
