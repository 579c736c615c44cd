// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Idempotent reconcilers for ONTAP resources.
//!
//! Each reconciler compares the desired state with the state reported by the
//! cluster and issues the smallest set of REST calls that converges them.
//!
//! # Reconciliation Architecture
//!
//! 1. **Validate** - Normalize parameters locally, before any remote call
//! 2. **Observe** - Fetch the current resource from the ONTAP REST API
//! 3. **Plan** - Compute `Create`, `Delete`, `Modify(diff)` or `NoAction`
//! 4. **Apply** - Issue at most one mutation, skipped in check mode
//!
//! # Available Reconcilers
//!
//! - [`reconcile_service_policy`] - Manages IP service policies
//!
//! # Example: Using a Reconciler
//!
//! ```rust,no_run
//! use ontap_service_policy::config::load_task_file;
//! use ontap_service_policy::config::resolve;
//! use ontap_service_policy::ontap::OntapClient;
//! use ontap_service_policy::reconcilers::reconcile_service_policy;
//! use std::path::Path;
//!
//! async fn run(path: &Path) -> anyhow::Result<()> {
//!     let task = load_task_file(path)?;
//!     let client = OntapClient::new(&resolve(task.connection)?)?;
//!
//!     let report = reconcile_service_policy(&client, &task.params, task.check_mode).await?;
//!     println!("{}", serde_json::to_string(&report)?);
//!     Ok(())
//! }
//! ```

pub mod service_policy;

pub use service_policy::reconcile_service_policy;
