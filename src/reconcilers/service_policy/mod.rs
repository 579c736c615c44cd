// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! IP service-policy reconciliation logic.
//!
//! Drives one idempotent pass: validate the parameters, check the backend
//! release, look up the current policy, plan and apply at most one mutation.
//!
//! ## Module Structure
//!
//! - [`validation`] - Parameter constraints and normalization
//! - [`lookup`] - Fetch the current policy
//! - [`plan`] - Decide the action
//! - [`mutators`] - Create, modify and delete requests
//! - [`types`] - Desired/current state, actions and the report

// Submodules
pub mod lookup;
pub mod mutators;
pub mod plan;
pub mod types;
pub mod validation;

use tracing::{debug, info};

use crate::constants::{
    MIN_ONTAP_GENERATION, MIN_ONTAP_MAJOR, MIN_ONTAP_MINOR, OP_DELETE_SERVICE_POLICY,
    OP_MODIFY_SERVICE_POLICY,
};
use crate::errors::ServicePolicyError;
use crate::ontap::version::fail_if_not_minimum_version;
use crate::ontap::RestApi;
use crate::params::ServicePolicyParams;

use lookup::get_service_policy;
use mutators::{create_service_policy, delete_service_policy, modify_service_policy};
use plan::plan;
use types::{Action, CurrentState, DesiredState, ReconcileReport};

/// Look up the current policy and plan the action.
///
/// # Errors
///
/// Returns the lookup error, if any.
pub async fn get_actions(
    client: &dyn RestApi,
    desired: &DesiredState,
) -> Result<(Action, Option<CurrentState>), ServicePolicyError> {
    let current = get_service_policy(client, desired).await?;
    let action = plan(current.as_ref(), desired);
    debug!(name = %desired.name, action = ?action, "Planned service policy action");
    Ok((action, current))
}

/// Plan and, unless `check_mode` is set, apply the action.
///
/// # Errors
///
/// Returns the lookup or mutation error, if any.
pub async fn apply(
    client: &dyn RestApi,
    desired: &DesiredState,
    check_mode: bool,
) -> Result<ReconcileReport, ServicePolicyError> {
    let (action, current) = get_actions(client, desired).await?;
    let report = ReconcileReport::from(&action);

    if !report.changed {
        info!(name = %desired.name, "Service policy already up to date");
        return Ok(report);
    }
    if check_mode {
        info!(
            name = %desired.name,
            cd_action = ?report.cd_action,
            "Check mode: skipping service policy changes"
        );
        return Ok(report);
    }

    execute(client, desired, &action, current.as_ref()).await?;
    Ok(report)
}

/// Issue the mutation for a planned action.
///
/// # Errors
///
/// Returns the mutation error, or [`ServicePolicyError::MissingCurrentState`]
/// when a delete or modify has no current record.
pub async fn execute(
    client: &dyn RestApi,
    desired: &DesiredState,
    action: &Action,
    current: Option<&CurrentState>,
) -> Result<(), ServicePolicyError> {
    match (action, current) {
        (Action::NoAction, _) => Ok(()),
        (Action::Create, _) => create_service_policy(client, desired).await,
        (Action::Delete, Some(current)) => delete_service_policy(client, current).await,
        (Action::Modify(diff), Some(current)) => {
            modify_service_policy(client, current, diff).await
        }
        (Action::Delete, None) => Err(ServicePolicyError::MissingCurrentState {
            operation: OP_DELETE_SERVICE_POLICY,
        }),
        (Action::Modify(_), None) => Err(ServicePolicyError::MissingCurrentState {
            operation: OP_MODIFY_SERVICE_POLICY,
        }),
    }
}

/// Reconcile one IP service policy.
///
/// Validation happens locally and first; the version gate is the first
/// remote call. No mutation is issued in `check_mode`.
///
/// # Errors
///
/// Returns the first [`ServicePolicyError`] encountered. Every error is
/// terminal.
///
/// # Example
///
/// ```rust,no_run
/// use ontap_service_policy::config::ConnectionConfig;
/// use ontap_service_policy::ontap::OntapClient;
/// use ontap_service_policy::params::{Service, ServicePolicyParams};
/// use ontap_service_policy::reconcilers::reconcile_service_policy;
///
/// async fn run() -> anyhow::Result<()> {
///     let client = OntapClient::new(&ConnectionConfig::new("cluster1.example.com"))?;
///     let params = ServicePolicyParams {
///         name: "svc1".to_string(),
///         vserver: Some("vs1".to_string()),
///         services: Some(vec![Service::DataNfs]),
///         ..Default::default()
///     };
///
///     let report = reconcile_service_policy(&client, &params, false).await?;
///     println!("changed: {}", report.changed);
///     Ok(())
/// }
/// ```
pub async fn reconcile_service_policy(
    client: &dyn RestApi,
    params: &ServicePolicyParams,
    check_mode: bool,
) -> Result<ReconcileReport, ServicePolicyError> {
    info!(
        name = %params.name,
        state = ?params.state,
        check_mode,
        "Reconciling service policy"
    );

    let desired = validation::normalize(params)?;
    fail_if_not_minimum_version(client, MIN_ONTAP_GENERATION, MIN_ONTAP_MAJOR, MIN_ONTAP_MINOR)
        .await?;

    let report = apply(client, &desired, check_mode).await?;
    info!(
        name = %desired.name,
        changed = report.changed,
        cd_action = ?report.cd_action,
        "Service policy reconciled"
    );
    Ok(report)
}
