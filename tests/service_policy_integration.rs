// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! End-to-end reconciliation against a mocked ONTAP REST API.

mod common;

use common::{client_for, records, start_cluster, svm_policy, SERVICE_POLICIES};
use ontap_service_policy::config::parse_task;
use ontap_service_policy::diff::CdAction;
use ontap_service_policy::errors::ServicePolicyError;
use ontap_service_policy::params::{Service, ServicePolicyParams, State};
use ontap_service_policy::reconcilers::reconcile_service_policy;
use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn svm_params(services: Option<Vec<Service>>, state: State) -> ServicePolicyParams {
    ServicePolicyParams {
        name: "svc1".to_string(),
        vserver: Some("vs1".to_string()),
        services,
        state,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_creates_missing_policy() {
    let server = start_cluster(9, 10, 1).await;
    Mock::given(method("GET"))
        .and(path(SERVICE_POLICIES))
        .and(query_param("name", "svc1"))
        .and(query_param("svm.name", "vs1"))
        .and(query_param("fields", "name,uuid,ipspace,services,svm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(records(vec![])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SERVICE_POLICIES))
        .and(basic_auth("admin", "netapp1!"))
        .and(body_json(json!({
            "name": "svc1",
            "svm.name": "vs1",
            "scope": "svm",
            "services": ["data_nfs"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let report = reconcile_service_policy(
        &client,
        &svm_params(Some(vec![Service::DataNfs]), State::Present),
        false,
    )
    .await
    .unwrap();

    assert!(report.changed);
    assert_eq!(report.cd_action, Some(CdAction::Create));
}

#[tokio::test]
async fn test_check_mode_never_posts() {
    let server = start_cluster(9, 10, 1).await;
    Mock::given(method("GET"))
        .and(path(SERVICE_POLICIES))
        .respond_with(ResponseTemplate::new(200).set_body_json(records(vec![])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SERVICE_POLICIES))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let report = reconcile_service_policy(
        &client,
        &svm_params(Some(vec![Service::DataNfs]), State::Present),
        true,
    )
    .await
    .unwrap();

    assert!(report.changed);
    assert_eq!(report.cd_action, Some(CdAction::Create));
}

#[tokio::test]
async fn test_deletes_existing_policy_by_uuid() {
    let server = start_cluster(9, 8, 0).await;
    Mock::given(method("GET"))
        .and(path(SERVICE_POLICIES))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(records(vec![svm_policy("u1", &["data_nfs"])])),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{SERVICE_POLICIES}/u1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let report = reconcile_service_policy(&client, &svm_params(None, State::Absent), false)
        .await
        .unwrap();

    assert_eq!(report.cd_action, Some(CdAction::Delete));
}

#[tokio::test]
async fn test_patches_services_only() {
    let server = start_cluster(9, 9, 1).await;
    Mock::given(method("GET"))
        .and(path(SERVICE_POLICIES))
        .respond_with(ResponseTemplate::new(200).set_body_json(records(vec![svm_policy(
            "u1",
            &["data_nfs", "data_cifs"],
        )])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{SERVICE_POLICIES}/u1")))
        .and(body_json(json!({"services": ["data_nfs"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let report = reconcile_service_policy(
        &client,
        &svm_params(Some(vec![Service::DataNfs]), State::Present),
        false,
    )
    .await
    .unwrap();

    assert!(report.changed);
    assert_eq!(report.cd_action, None);
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({"changed": true, "cd_action": null, "modify": {"services": ["data_nfs"]}})
    );
}

#[tokio::test]
async fn test_old_cluster_is_refused_before_lookup() {
    let server = start_cluster(9, 7, 0).await;
    Mock::given(method("GET"))
        .and(path(SERVICE_POLICIES))
        .respond_with(ResponseTemplate::new(200).set_body_json(records(vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = reconcile_service_policy(
        &client,
        &svm_params(Some(vec![Service::DataNfs]), State::Present),
        false,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServicePolicyError::UnsupportedVersion { .. }));
    assert!(err.to_string().contains("requires ONTAP 9.8.0 or later"));
    assert!(err.to_string().contains("Found: 9.7.0"));
}

#[tokio::test]
async fn test_backend_error_is_tagged_with_operation() {
    let server = start_cluster(9, 10, 1).await;
    Mock::given(method("GET"))
        .and(path(SERVICE_POLICIES))
        .respond_with(ResponseTemplate::new(200).set_body_json(records(vec![])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SERVICE_POLICIES))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {"message": "duplicate entry", "code": "1"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = reconcile_service_policy(
        &client,
        &svm_params(Some(vec![Service::DataNfs]), State::Present),
        false,
    )
    .await
    .unwrap_err();

    let msg = err.to_string();
    assert!(msg.starts_with("Error in create_service_policy:"), "{msg}");
    assert!(msg.contains("duplicate entry"), "{msg}");
}

#[tokio::test]
async fn test_task_file_drives_reconciliation() {
    let server = start_cluster(9, 10, 1).await;
    Mock::given(method("GET"))
        .and(path(SERVICE_POLICIES))
        .and(query_param("scope", "cluster"))
        .and(query_param("ipspace.name", "Default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(records(vec![json!({
            "uuid": "c1",
            "name": "mgmt",
            "ipspace": {"name": "Default"},
            "services": ["management_https", "management_ssh"]
        })])))
        .mount(&server)
        .await;

    let task = parse_task(
        r"
params:
  name: mgmt
  ipspace: Default
  services: [management_ssh, management_https]
",
    )
    .unwrap();

    let client = client_for(&server);
    let report = reconcile_service_policy(&client, &task.params, task.check_mode)
        .await
        .unwrap();

    assert!(!report.changed);
    assert_eq!(report.modify, None);
}

#[tokio::test]
async fn test_stale_record_count_does_not_hide_duplicates() {
    let server = start_cluster(9, 10, 1).await;
    Mock::given(method("GET"))
        .and(path(SERVICE_POLICIES))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "num_records": 1,
            "records": [svm_policy("u1", &["data_nfs"]), svm_policy("u2", &["data_nfs"])]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = reconcile_service_policy(&client, &svm_params(None, State::Absent), false)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServicePolicyError::UnexpectedRecordCount { count: 2, .. }
    ));
}
