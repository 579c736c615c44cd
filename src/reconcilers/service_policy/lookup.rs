// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Resource lookup.
//!
//! Finds the single service policy matching the desired state's identity:
//! name, plus scope or owning SVM, plus ipspace when given.

use tracing::{debug, error};

use super::types::{CurrentState, DesiredState};
use crate::constants::{
    API_SERVICE_POLICIES, OP_GET_SERVICE_POLICY, QUERY_FIELDS, QUERY_IPSPACE_NAME, QUERY_NAME,
    QUERY_SCOPE, QUERY_SVM_NAME, SERVICE_POLICY_FIELDS,
};
use crate::errors::{RestError, ServicePolicyError};
use crate::ontap::types::{RecordsResponse, ServicePolicyRecord};
use crate::ontap::RestApi;

/// Build the lookup query for `desired`.
///
/// Cluster policies are matched with `scope=cluster`, SVM policies with
/// `svm.name`.
#[must_use]
pub fn build_query(desired: &DesiredState) -> Vec<(&'static str, String)> {
    let mut query = vec![
        (QUERY_NAME, desired.name.clone()),
        (QUERY_FIELDS, SERVICE_POLICY_FIELDS.to_string()),
    ];
    match &desired.vserver {
        None => query.push((QUERY_SCOPE, "cluster".to_string())),
        Some(vserver) => query.push((QUERY_SVM_NAME, vserver.clone())),
    }
    if let Some(ipspace) = &desired.ipspace {
        query.push((QUERY_IPSPACE_NAME, ipspace.clone()));
    }
    query
}

/// Fetch the current service policy, if any.
///
/// # Returns
///
/// * `Ok(None)` - No policy matches
/// * `Ok(Some(_))` - Exactly one policy matches
///
/// # Errors
///
/// Returns [`ServicePolicyError::Api`] tagged `get_service_policy` when the
/// call fails or a record is malformed, and
/// [`ServicePolicyError::UnexpectedRecordCount`] when more than one record
/// matches.
pub async fn get_service_policy(
    client: &dyn RestApi,
    desired: &DesiredState,
) -> Result<Option<CurrentState>, ServicePolicyError> {
    let query = build_query(desired);
    let response = client
        .get(API_SERVICE_POLICIES, &query)
        .await
        .map_err(|e| ServicePolicyError::api(OP_GET_SERVICE_POLICY, &e))?;

    let parsed: RecordsResponse<ServicePolicyRecord> =
        serde_json::from_value(response).map_err(|e| {
            ServicePolicyError::api(
                OP_GET_SERVICE_POLICY,
                &RestError::Decode {
                    api: API_SERVICE_POLICIES.to_string(),
                    reason: e.to_string(),
                },
            )
        })?;

    let count = parsed.count();
    if count > 1 {
        error!(
            name = %desired.name,
            count,
            "Service policy lookup matched more than one record"
        );
        return Err(ServicePolicyError::UnexpectedRecordCount {
            operation: OP_GET_SERVICE_POLICY,
            api: API_SERVICE_POLICIES.to_string(),
            count,
        });
    }

    let current = parsed.records.into_iter().next().map(CurrentState::from);
    debug!(
        name = %desired.name,
        found = current.is_some(),
        uuid = ?current.as_ref().map(|c| c.uuid.as_str()),
        "Looked up service policy"
    );
    Ok(current)
}

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod lookup_tests;
