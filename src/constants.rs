// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the service-policy reconciler.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// ONTAP REST API Constants
// ============================================================================

/// Path prefix under which every ONTAP REST endpoint lives
pub const API_PREFIX: &str = "api";

/// Collection endpoint for IP service policies
pub const API_SERVICE_POLICIES: &str = "network/ip/service-policies";

/// Cluster endpoint, used to read the backend version
pub const API_CLUSTER: &str = "cluster";

/// Field projection requested when looking up a service policy
pub const SERVICE_POLICY_FIELDS: &str = "name,uuid,ipspace,services,svm";

/// Field projection requested when reading the cluster version
pub const CLUSTER_VERSION_FIELDS: &str = "version";

// ============================================================================
// Query Parameter Names
// ============================================================================

/// Query parameter selecting the record name
pub const QUERY_NAME: &str = "name";

/// Query parameter selecting the projected fields
pub const QUERY_FIELDS: &str = "fields";

/// Query parameter selecting the policy scope
pub const QUERY_SCOPE: &str = "scope";

/// Query parameter selecting the owning SVM by name
pub const QUERY_SVM_NAME: &str = "svm.name";

/// Query parameter selecting the ipspace by name
pub const QUERY_IPSPACE_NAME: &str = "ipspace.name";

// ============================================================================
// Operation Names (used to tag errors)
// ============================================================================

/// Operation tag for the lookup call
pub const OP_GET_SERVICE_POLICY: &str = "get_service_policy";

/// Operation tag for the create call
pub const OP_CREATE_SERVICE_POLICY: &str = "create_service_policy";

/// Operation tag for the modify call
pub const OP_MODIFY_SERVICE_POLICY: &str = "modify_service_policy";

/// Operation tag for the delete call
pub const OP_DELETE_SERVICE_POLICY: &str = "delete_service_policy";

/// Operation tag for the version gate
pub const OP_GET_CLUSTER_VERSION: &str = "get_cluster_version";

// ============================================================================
// Backend Version Constants
// ============================================================================

/// Minimum ONTAP generation supporting IP service policies over REST
pub const MIN_ONTAP_GENERATION: u32 = 9;

/// Minimum ONTAP major version supporting IP service policies over REST
pub const MIN_ONTAP_MAJOR: u32 = 8;

/// Minimum ONTAP minor version supporting IP service policies over REST
pub const MIN_ONTAP_MINOR: u32 = 0;

// ============================================================================
// Transport Constants
// ============================================================================

/// Default timeout for a single REST round trip
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Name used in log lines and version-gate errors
pub const MODULE_NAME: &str = "ontap-service-policy";
