// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Common test utilities for integration tests

#![allow(dead_code)]

use ontap_service_policy::config::ConnectionConfig;
use ontap_service_policy::ontap::OntapClient;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SERVICE_POLICIES: &str = "/api/network/ip/service-policies";

/// Start a mock cluster answering the version query with `generation.major.minor`.
pub async fn start_cluster(generation: u32, major: u32, minor: u32) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cluster"))
        .and(query_param("fields", "version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": {
                "generation": generation,
                "major": major,
                "minor": minor,
                "full": format!("NetApp Release {generation}.{major}.{minor}")
            }
        })))
        .mount(&server)
        .await;
    server
}

/// Client for `server` with basic-auth credentials.
pub fn client_for(server: &MockServer) -> OntapClient {
    let mut config = ConnectionConfig::new(server.uri());
    config.username = Some("admin".to_string());
    config.password = Some("netapp1!".to_string());
    OntapClient::new(&config).expect("client should build")
}

/// Collection response wrapping `records`.
pub fn records(records: Vec<Value>) -> Value {
    json!({"num_records": records.len(), "records": records})
}

/// An SVM-scoped service-policy record.
pub fn svm_policy(uuid: &str, services: &[&str]) -> Value {
    json!({
        "uuid": uuid,
        "name": "svc1",
        "svm": {"name": "vs1", "uuid": "svm-uuid"},
        "ipspace": {"name": "Default", "uuid": "ips-uuid"},
        "services": services
    })
}
