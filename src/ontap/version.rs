// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Backend version gate.
//!
//! IP service policies are only exposed over REST from ONTAP 9.8 onwards.
//! The reconciler refuses to touch older clusters before doing any other
//! remote work.

use tracing::{debug, error};

use super::types::{ClusterVersionResponse, OntapVersion};
use super::RestApi;
use crate::constants::{
    API_CLUSTER, CLUSTER_VERSION_FIELDS, MODULE_NAME, OP_GET_CLUSTER_VERSION, QUERY_FIELDS,
};
use crate::errors::{RestError, ServicePolicyError};

/// Read the release the cluster is running.
///
/// # Errors
///
/// Returns an error if the call fails or the response carries no version.
pub async fn get_ontap_version(client: &dyn RestApi) -> Result<OntapVersion, ServicePolicyError> {
    let response = client
        .get(API_CLUSTER, &[(QUERY_FIELDS, CLUSTER_VERSION_FIELDS.to_string())])
        .await
        .map_err(|e| ServicePolicyError::api(OP_GET_CLUSTER_VERSION, &e))?;

    let parsed: ClusterVersionResponse = serde_json::from_value(response).map_err(|e| {
        ServicePolicyError::api(
            OP_GET_CLUSTER_VERSION,
            &RestError::Decode {
                api: API_CLUSTER.to_string(),
                reason: e.to_string(),
            },
        )
    })?;

    debug!(
        version = ?parsed.version.full,
        "Read ONTAP cluster version"
    );
    Ok(parsed.version.triple())
}

/// Refuse to proceed when the cluster is older than `generation.major.minor`.
///
/// # Returns
///
/// The version the cluster reported.
///
/// # Errors
///
/// Returns [`ServicePolicyError::UnsupportedVersion`] for older clusters, or
/// the error of the version lookup itself.
pub async fn fail_if_not_minimum_version(
    client: &dyn RestApi,
    generation: u32,
    major: u32,
    minor: u32,
) -> Result<OntapVersion, ServicePolicyError> {
    let required = OntapVersion {
        generation,
        major,
        minor,
    };
    let found = get_ontap_version(client).await?;

    if found < required {
        error!(
            required = %required,
            found = %found,
            "ONTAP version below minimum supported release"
        );
        return Err(ServicePolicyError::UnsupportedVersion {
            module: MODULE_NAME,
            required: required.to_string(),
            found: found.to_string(),
        });
    }
    Ok(found)
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod version_tests;
