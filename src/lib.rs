// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # ontap-service-policy - Idempotent ONTAP IP service-policy reconciler
//!
//! Converges a single IP service policy on a NetApp ONTAP cluster to a
//! declared state through the ONTAP REST API.
//!
//! ## Overview
//!
//! One reconciliation pass:
//!
//! - Validates and normalizes the declared parameters, locally
//! - Refuses clusters older than ONTAP 9.8
//! - Looks up the policy by name and scope
//! - Plans `Create`, `Delete`, `Modify(diff)` or `NoAction`
//! - Applies at most one mutation, or none in check mode
//!
//! ## Modules
//!
//! - [`params`] - Declared parameter surface
//! - [`reconcilers`] - Reconciliation logic
//! - [`diff`] - Create/delete decision and attribute diff
//! - [`ontap`] - ONTAP REST client and wire types
//! - [`config`] - Connection settings and task files
//! - [`errors`] - Error types
//!
//! ## Example
//!
//! ```rust
//! use ontap_service_policy::params::{Service, ServicePolicyParams};
//! use ontap_service_policy::reconcilers::service_policy::validation::normalize;
//!
//! let params = ServicePolicyParams {
//!     name: "svc1".to_string(),
//!     vserver: Some("vs1".to_string()),
//!     services: Some(vec![Service::NoService]),
//!     ..Default::default()
//! };
//!
//! let desired = normalize(&params).unwrap();
//! assert_eq!(desired.services.map(|s| s.len()), Some(0));
//! ```

pub mod config;
pub mod constants;
pub mod diff;
pub mod errors;
pub mod http_errors;
pub mod ontap;
pub mod params;
pub mod reconcilers;
