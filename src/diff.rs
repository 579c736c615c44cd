// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Create/delete decision and attribute-level diff.
//!
//! This is the generic comparison engine behind every idempotent
//! reconciliation: it knows nothing about service policies and works on JSON
//! attribute maps.
//!
//! # Comparison rules
//!
//! - Only keys present in the desired map **and** in the current map are compared
//! - A desired value of `null` means "not requested" and is skipped
//! - Lists compare as multisets: order does not matter, duplicates do
//! - Nested objects compare recursively; only the differing sub-keys are reported
//! - Scalars compare by equality; the desired value is reported on mismatch
//!
//! # Example
//!
//! ```rust
//! use ontap_service_policy::diff::get_modified_attributes;
//! use serde_json::json;
//!
//! let current = json!({"name": "svc1", "services": ["data_nfs", "data_cifs"]});
//! let desired = json!({"name": "svc1", "services": ["data_cifs", "data_nfs"]});
//!
//! let modified = get_modified_attributes(
//!     current.as_object(),
//!     desired.as_object().unwrap(),
//! );
//! assert!(modified.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::params::State;

/// A flat or nested map of attribute name to JSON value.
pub type AttributeMap = Map<String, Value>;

/// Outcome of comparing existence against the desired state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CdAction {
    Create,
    Delete,
}

impl fmt::Display for CdAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Delete => "delete",
        })
    }
}

/// Decide whether the resource must be created or deleted.
///
/// Returns `None` when existence already matches the desired state.
///
/// | exists | state   | result   |
/// |--------|---------|----------|
/// | no     | present | `Create` |
/// | yes    | absent  | `Delete` |
/// | no     | absent  | `None`   |
/// | yes    | present | `None`   |
#[must_use]
pub fn get_cd_action(exists: bool, state: State) -> Option<CdAction> {
    match (exists, state) {
        (false, State::Present) => Some(CdAction::Create),
        (true, State::Absent) => Some(CdAction::Delete),
        _ => None,
    }
}

/// Compute the attributes of `desired` that differ from `current`.
///
/// Returns an empty map when `current` is `None` or nothing differs.
#[must_use]
pub fn get_modified_attributes(current: Option<&AttributeMap>, desired: &AttributeMap) -> AttributeMap {
    let mut modified = AttributeMap::new();
    let Some(current) = current else {
        return modified;
    };

    for (key, desired_value) in desired {
        if desired_value.is_null() {
            continue;
        }
        let Some(current_value) = current.get(key) else {
            continue;
        };

        match (current_value, desired_value) {
            (Value::Array(current_list), Value::Array(desired_list)) => {
                if let Some(list) = compare_lists(current_list, desired_list) {
                    modified.insert(key.clone(), Value::Array(list));
                }
            }
            (Value::Object(current_obj), Value::Object(desired_obj)) => {
                let nested = get_modified_attributes(Some(current_obj), desired_obj);
                if !nested.is_empty() {
                    modified.insert(key.clone(), Value::Object(nested));
                }
            }
            (current_value, desired_value) => {
                if current_value != desired_value {
                    modified.insert(key.clone(), desired_value.clone());
                }
            }
        }
    }

    modified
}

/// Compare two lists as multisets.
///
/// Returns the desired list when the two differ, `None` when they hold the
/// same elements regardless of order.
#[must_use]
pub fn compare_lists(current: &[Value], desired: &[Value]) -> Option<Vec<Value>> {
    let mut remaining: Vec<&Value> = current.iter().collect();
    for item in desired {
        match remaining.iter().position(|c| *c == item) {
            Some(index) => {
                remaining.swap_remove(index);
            }
            None => return Some(desired.to_vec()),
        }
    }
    if remaining.is_empty() {
        None
    } else {
        Some(desired.to_vec())
    }
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod diff_tests;
