// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Wire types for the ONTAP REST API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Response envelope of a collection GET.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RecordsResponse<T> {
    /// Matching records
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
    /// Record count as reported by the backend
    #[serde(default)]
    pub num_records: Option<usize>,
}

impl<T> RecordsResponse<T> {
    /// Number of records: the larger of `num_records` and the records
    /// actually returned, so a stale count never hides a record.
    #[must_use]
    pub fn count(&self) -> usize {
        self.num_records.unwrap_or(0).max(self.records.len())
    }
}

/// Error envelope returned by ONTAP on failure.
#[derive(Clone, Debug, Deserialize)]
pub struct OntapErrorResponse {
    pub error: OntapErrorBody,
}

/// Error details returned by ONTAP.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OntapErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

impl fmt::Display for OntapErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_deref().unwrap_or("unknown error"))?;
        if let Some(code) = &self.code {
            write!(f, " (code {code})")?;
        }
        if let Some(target) = &self.target {
            write!(f, " (target {target})")?;
        }
        Ok(())
    }
}

/// A `{name, uuid}` reference to another ONTAP object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// An IP service-policy record as returned by the lookup.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ServicePolicyRecord {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub ipspace: Option<NamedRef>,
    /// ONTAP omits the key when the policy has no service
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub svm: Option<NamedRef>,
}

/// Response of `GET cluster?fields=version`.
#[derive(Clone, Debug, Deserialize)]
pub struct ClusterVersionResponse {
    pub version: ClusterVersion,
}

/// ONTAP release as reported by the cluster endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct ClusterVersion {
    pub generation: u32,
    pub major: u32,
    #[serde(default)]
    pub minor: u32,
    #[serde(default)]
    pub full: Option<String>,
}

impl ClusterVersion {
    /// Comparable `(generation, major, minor)` triple.
    #[must_use]
    pub fn triple(&self) -> OntapVersion {
        OntapVersion {
            generation: self.generation,
            major: self.major,
            minor: self.minor,
        }
    }
}

/// Ordered ONTAP release number, e.g. `9.8.0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct OntapVersion {
    pub generation: u32,
    pub major: u32,
    pub minor: u32,
}

impl fmt::Display for OntapVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.generation, self.major, self.minor)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
