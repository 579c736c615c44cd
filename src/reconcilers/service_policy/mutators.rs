// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Create, modify and delete requests.
//!
//! Each mutator issues exactly one call and tags any failure with its own
//! operation name. Only `services` can be changed on an existing policy.

use serde_json::Value;
use tracing::{error, info};

use super::types::{CurrentState, DesiredState};
use crate::constants::{
    API_SERVICE_POLICIES, OP_CREATE_SERVICE_POLICY, OP_DELETE_SERVICE_POLICY,
    OP_MODIFY_SERVICE_POLICY,
};
use crate::diff::AttributeMap;
use crate::errors::ServicePolicyError;
use crate::ontap::RestApi;

/// Attributes an existing service policy accepts in a PATCH.
pub const MODIFIABLE_ATTRIBUTES: &[&str] = &["services"];

/// Split a diff into the PATCH body.
///
/// # Errors
///
/// Returns [`ServicePolicyError::UnsupportedModify`] when the diff holds
/// attributes outside [`MODIFIABLE_ATTRIBUTES`], and
/// [`ServicePolicyError::NothingToChange`] when the body would be empty.
pub fn modify_body(modify: &AttributeMap) -> Result<Value, ServicePolicyError> {
    let (body, unsupported): (AttributeMap, AttributeMap) = modify
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .partition(|(k, _)| MODIFIABLE_ATTRIBUTES.contains(&k.as_str()));

    if !unsupported.is_empty() {
        return Err(ServicePolicyError::UnsupportedModify {
            attributes: Value::Object(unsupported).to_string(),
        });
    }
    if body.is_empty() {
        return Err(ServicePolicyError::NothingToChange {
            modify: Value::Object(modify.clone()).to_string(),
        });
    }
    Ok(Value::Object(body))
}

/// Create the service policy described by `desired`.
///
/// # Errors
///
/// Returns [`ServicePolicyError::Api`] tagged `create_service_policy`.
pub async fn create_service_policy(
    client: &dyn RestApi,
    desired: &DesiredState,
) -> Result<(), ServicePolicyError> {
    let body = desired.create_body();
    info!(name = %desired.name, scope = %desired.scope, "Creating service policy");

    client
        .post(API_SERVICE_POLICIES, &body)
        .await
        .map_err(|e| {
            error!(name = %desired.name, error = %e, "Failed to create service policy");
            ServicePolicyError::api(OP_CREATE_SERVICE_POLICY, &e)
        })?;
    Ok(())
}

/// Apply `modify` to the existing policy.
///
/// The body is validated before any request is sent.
///
/// # Errors
///
/// Returns the errors of [`modify_body`], or [`ServicePolicyError::Api`]
/// tagged `modify_service_policy`.
pub async fn modify_service_policy(
    client: &dyn RestApi,
    current: &CurrentState,
    modify: &AttributeMap,
) -> Result<(), ServicePolicyError> {
    let body = modify_body(modify)?;
    info!(name = %current.name, uuid = %current.uuid, "Modifying service policy");

    client
        .patch(&current.endpoint(), &body)
        .await
        .map_err(|e| {
            error!(uuid = %current.uuid, error = %e, "Failed to modify service policy");
            ServicePolicyError::api(OP_MODIFY_SERVICE_POLICY, &e)
        })?;
    Ok(())
}

/// Delete the existing policy.
///
/// # Errors
///
/// Returns [`ServicePolicyError::Api`] tagged `delete_service_policy`.
pub async fn delete_service_policy(
    client: &dyn RestApi,
    current: &CurrentState,
) -> Result<(), ServicePolicyError> {
    info!(name = %current.name, uuid = %current.uuid, "Deleting service policy");

    client.delete(&current.endpoint()).await.map_err(|e| {
        error!(uuid = %current.uuid, error = %e, "Failed to delete service policy");
        ServicePolicyError::api(OP_DELETE_SERVICE_POLICY, &e)
    })?;
    Ok(())
}

#[cfg(test)]
#[path = "mutators_tests.rs"]
mod mutators_tests;
