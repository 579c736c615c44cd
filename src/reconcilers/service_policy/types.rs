// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Types used in service-policy reconciliation.

use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeSet;

use crate::constants::API_SERVICE_POLICIES;
use crate::diff::{AttributeMap, CdAction};
use crate::ontap::types::ServicePolicyRecord;
use crate::params::{Scope, Service, State};

/// Validated, normalized description of the wanted service policy.
///
/// Built once by [`normalize`](super::validation::normalize) before any
/// remote call and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesiredState {
    /// Policy name, the lookup key
    pub name: String,
    /// Resolved scope, never unset
    pub scope: Scope,
    /// Ipspace qualifier
    pub ipspace: Option<String>,
    /// Owning SVM for `svm` scope
    pub vserver: Option<String>,
    /// Services to bind; `Some(empty)` clears every service, `None` leaves them alone
    pub services: Option<BTreeSet<Service>>,
    /// Whether the policy should exist
    pub state: State,
}

impl DesiredState {
    /// Services rendered as their wire strings.
    fn service_values(&self) -> Option<Vec<Value>> {
        self.services
            .as_ref()
            .map(|set| set.iter().map(|s| json!(s.as_str())).collect())
    }

    /// Attributes compared against the current record.
    ///
    /// Unset attributes are emitted as `null` so the diff engine skips them.
    #[must_use]
    pub fn comparable_attributes(&self) -> AttributeMap {
        let mut attrs = AttributeMap::new();
        attrs.insert("name".to_string(), json!(self.name));
        attrs.insert("ipspace".to_string(), json!(self.ipspace));
        attrs.insert("vserver".to_string(), json!(self.vserver));
        attrs.insert(
            "services".to_string(),
            self.service_values().map_or(Value::Null, Value::Array),
        );
        attrs
    }

    /// Body of the create request.
    ///
    /// `name` and `scope` are always sent; `svm.name`, `ipspace` and
    /// `services` only when set. An empty services set is sent as `[]`.
    #[must_use]
    pub fn create_body(&self) -> Value {
        let mut body = AttributeMap::new();
        body.insert("name".to_string(), json!(self.name));
        if let Some(vserver) = &self.vserver {
            body.insert("svm.name".to_string(), json!(vserver));
        }
        if let Some(ipspace) = &self.ipspace {
            body.insert("ipspace".to_string(), json!(ipspace));
        }
        body.insert("scope".to_string(), json!(self.scope.as_str()));
        if let Some(services) = self.service_values() {
            body.insert("services".to_string(), Value::Array(services));
        }
        Value::Object(body)
    }
}

/// The service policy as it exists on the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentState {
    pub name: String,
    /// Backend identifier, used to address PATCH and DELETE
    pub uuid: String,
    pub ipspace: Option<String>,
    /// Plain strings so that services unknown to [`Service`] still compare
    pub services: Vec<String>,
    /// Name of the owning SVM, `None` for cluster-scoped policies
    pub svm: Option<String>,
}

impl From<ServicePolicyRecord> for CurrentState {
    fn from(record: ServicePolicyRecord) -> Self {
        Self {
            name: record.name,
            uuid: record.uuid,
            ipspace: record.ipspace.and_then(|r| r.name),
            services: record.services,
            svm: record.svm.and_then(|r| r.name),
        }
    }
}

impl CurrentState {
    /// Attributes compared against the desired state.
    ///
    /// Keys the backend did not report are left out.
    #[must_use]
    pub fn comparable_attributes(&self) -> AttributeMap {
        let mut attrs = AttributeMap::new();
        attrs.insert("name".to_string(), json!(self.name));
        if let Some(ipspace) = &self.ipspace {
            attrs.insert("ipspace".to_string(), json!(ipspace));
        }
        if let Some(svm) = &self.svm {
            attrs.insert("vserver".to_string(), json!(svm));
        }
        attrs.insert("services".to_string(), json!(self.services));
        attrs
    }

    /// API path addressing this record.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{API_SERVICE_POLICIES}/{}", self.uuid)
    }
}

/// What a reconciliation pass has to do.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Already converged
    NoAction,
    /// Policy is missing and must be created
    Create,
    /// Policy exists and must be removed
    Delete,
    /// Policy exists with drifted attributes
    Modify(AttributeMap),
}

impl Action {
    #[must_use]
    pub fn cd_action(&self) -> Option<CdAction> {
        match self {
            Self::Create => Some(CdAction::Create),
            Self::Delete => Some(CdAction::Delete),
            Self::NoAction | Self::Modify(_) => None,
        }
    }

    #[must_use]
    pub fn modify(&self) -> Option<&AttributeMap> {
        match self {
            Self::Modify(diff) => Some(diff),
            _ => None,
        }
    }

    /// Whether applying this action changes the backend.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        match self {
            Self::NoAction => false,
            Self::Modify(diff) => !diff.is_empty(),
            Self::Create | Self::Delete => true,
        }
    }
}

/// Outcome of one reconciliation pass, printed as JSON by the binary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReconcileReport {
    pub changed: bool,
    pub cd_action: Option<CdAction>,
    pub modify: Option<AttributeMap>,
}

impl From<&Action> for ReconcileReport {
    fn from(action: &Action) -> Self {
        Self {
            changed: action.is_changed(),
            cd_action: action.cd_action(),
            modify: action.modify().cloned(),
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
