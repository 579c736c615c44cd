// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Action planner.
//!
//! Pure function of current and desired state. The attribute diff is only
//! computed when neither a create nor a delete is needed.

use super::types::{Action, CurrentState, DesiredState};
use crate::diff::{get_cd_action, get_modified_attributes, CdAction};

/// Decide what a reconciliation pass has to do.
///
/// | current | state   | action                       |
/// |---------|---------|------------------------------|
/// | absent  | present | `Create`                     |
/// | present | absent  | `Delete`                     |
/// | present | present | `Modify(diff)` or `NoAction` |
/// | absent  | absent  | `NoAction`                   |
#[must_use]
pub fn plan(current: Option<&CurrentState>, desired: &DesiredState) -> Action {
    match get_cd_action(current.is_some(), desired.state) {
        Some(CdAction::Create) => Action::Create,
        Some(CdAction::Delete) => Action::Delete,
        None => {
            let current_attrs = current.map(CurrentState::comparable_attributes);
            let diff =
                get_modified_attributes(current_attrs.as_ref(), &desired.comparable_attributes());
            if diff.is_empty() {
                Action::NoAction
            } else {
                Action::Modify(diff)
            }
        }
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod plan_tests;
