// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Parameter validation and normalization.
//!
//! Turns raw [`ServicePolicyParams`] into a [`DesiredState`]. Parameter
//! dependencies are declared as tables and checked before the individual
//! input rules. Nothing here touches the network.

use std::collections::BTreeSet;
use tracing::debug;

use super::types::DesiredState;
use crate::errors::ValidationError;
use crate::params::{Scope, Service, ServicePolicyParams};

/// A parameter dependency triggered by another parameter's value.
///
/// `value: None` triggers when `key` is unset.
#[derive(Clone, Copy, Debug)]
pub struct RequiredIf {
    pub key: &'static str,
    pub value: Option<&'static str>,
    pub requires: &'static [&'static str],
}

/// Conditional requirements, checked in order after [`REQUIRED_ONE_OF`].
pub const REQUIRED_IF: &[RequiredIf] = &[
    RequiredIf {
        key: "scope",
        value: Some("cluster"),
        requires: &["ipspace"],
    },
    RequiredIf {
        key: "scope",
        value: Some("svm"),
        requires: &["vserver"],
    },
    RequiredIf {
        key: "vserver",
        value: None,
        requires: &["ipspace"],
    },
];

/// Groups of parameters of which at least one must be supplied.
pub const REQUIRED_ONE_OF: &[&[&str]] = &[&["ipspace", "vserver"]];

impl RequiredIf {
    fn triggered(&self, params: &ServicePolicyParams) -> bool {
        let actual = params.field(self.key);
        match self.value {
            Some(expected) => actual.as_deref() == Some(expected),
            None => actual.is_none(),
        }
    }

    fn condition(&self) -> String {
        match self.value {
            Some(value) => format!("{} is {value}", self.key),
            None => format!("{} is None", self.key),
        }
    }
}

/// Check the declarative constraint tables.
///
/// The one-of groups are checked before the conditional requirements.
///
/// # Errors
///
/// Returns the first violated constraint.
pub fn check_constraints(params: &ServicePolicyParams) -> Result<(), ValidationError> {
    for group in REQUIRED_ONE_OF {
        if group.iter().all(|key| params.field(key).is_none()) {
            return Err(ValidationError::RequiredOneOf {
                fields: group.join(", "),
            });
        }
    }

    for rule in REQUIRED_IF {
        if !rule.triggered(params) {
            continue;
        }
        let missing: Vec<&str> = rule
            .requires
            .iter()
            .copied()
            .filter(|key| params.field(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::RequiredIf {
                condition: rule.condition(),
                missing: missing.join(", "),
            });
        }
    }

    Ok(())
}

/// Apply the `no_service` rule.
///
/// A lone `no_service` becomes the empty set. Combining it with anything,
/// even a second `no_service`, is rejected.
fn normalize_services(
    services: Option<&[Service]>,
) -> Result<Option<BTreeSet<Service>>, ValidationError> {
    let Some(services) = services else {
        return Ok(None);
    };
    if services.contains(&Service::NoService) {
        if services.len() > 1 {
            return Err(ValidationError::NoServiceNotExclusive {
                services: services.iter().map(|s| s.as_str().to_string()).collect(),
            });
        }
        return Ok(Some(BTreeSet::new()));
    }
    Ok(Some(services.iter().copied().collect()))
}

/// Resolve the scope, deriving it from the vserver when unset.
fn resolve_scope(
    scope: Option<Scope>,
    vserver: Option<&str>,
) -> Result<Scope, ValidationError> {
    match (scope, vserver) {
        (Some(Scope::Cluster), Some(vserver)) => Err(ValidationError::VserverWithClusterScope {
            vserver: vserver.to_string(),
        }),
        (Some(Scope::Svm), None) => Err(ValidationError::SvmScopeWithoutVserver),
        (Some(scope), _) => Ok(scope),
        (None, Some(_)) => Ok(Scope::Svm),
        (None, None) => Ok(Scope::Cluster),
    }
}

/// Validate raw parameters and build the desired state.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the offending field or value.
pub fn normalize(params: &ServicePolicyParams) -> Result<DesiredState, ValidationError> {
    check_constraints(params)?;

    let services = normalize_services(params.services.as_deref())?;
    let scope = resolve_scope(params.scope, params.vserver.as_deref())?;

    debug!(
        name = %params.name,
        scope = %scope,
        services = ?services,
        "Normalized service policy parameters"
    );

    Ok(DesiredState {
        name: params.name.clone(),
        scope,
        ipspace: params.ipspace.clone(),
        vserver: params.vserver.clone(),
        services,
        state: params.state,
    })
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod validation_tests;
