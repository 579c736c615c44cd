// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory [`RestApi`] used by unit tests.
//!
//! Behaves like a tiny ONTAP: it stores service-policy records, honors the
//! lookup filters, assigns UUIDs on create and records every call so tests
//! can assert exactly which requests were issued.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;

use super::RestApi;
use crate::constants::{API_CLUSTER, API_SERVICE_POLICIES};
use crate::errors::RestError;

/// One request as seen by the fake backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub api: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

struct FakeState {
    records: Vec<Value>,
    calls: Vec<Call>,
    version: Value,
    next_uuid: usize,
    failures: HashMap<&'static str, RestError>,
}

/// Recording, stateful fake of the ONTAP REST API.
pub struct FakeOntap {
    state: Mutex<FakeState>,
}

impl Default for FakeOntap {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeOntap {
    /// An empty ONTAP 9.10.1 cluster.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                records: Vec::new(),
                calls: Vec::new(),
                version: json!({"generation": 9, "major": 10, "minor": 1, "full": "NetApp Release 9.10.1"}),
                next_uuid: 1,
                failures: HashMap::new(),
            }),
        }
    }

    /// Seed the cluster with existing service-policy records.
    #[must_use]
    pub fn with_records(self, records: Vec<Value>) -> Self {
        self.state.lock().unwrap().records = records;
        self
    }

    /// Report a different release from the cluster endpoint.
    #[must_use]
    pub fn with_version(self, generation: u32, major: u32, minor: u32) -> Self {
        self.state.lock().unwrap().version =
            json!({"generation": generation, "major": major, "minor": minor});
        self
    }

    /// Make every call with `method` fail with `err`.
    #[must_use]
    pub fn failing(self, method: &'static str, err: RestError) -> Self {
        self.state.lock().unwrap().failures.insert(method, err);
        self
    }

    /// Every call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls other than GET.
    #[must_use]
    pub fn mutating_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method != "GET")
            .collect()
    }

    /// Current content of the fake cluster.
    #[must_use]
    pub fn records(&self) -> Vec<Value> {
        self.state.lock().unwrap().records.clone()
    }

    fn record(
        &self,
        method: &'static str,
        api: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<(), RestError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call {
            method,
            api: api.to_string(),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
            body: body.cloned(),
        });
        match state.failures.get(method) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn nested_name<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record.get(key)?.get("name")?.as_str()
}

fn matches_query(record: &Value, query: &[(&str, String)]) -> bool {
    query.iter().all(|(key, value)| match *key {
        "name" => record.get("name").and_then(Value::as_str) == Some(value.as_str()),
        "scope" => record.get("scope").and_then(Value::as_str) == Some(value.as_str()),
        "svm.name" => nested_name(record, "svm") == Some(value.as_str()),
        "ipspace.name" => nested_name(record, "ipspace") == Some(value.as_str()),
        _ => true,
    })
}

fn uuid_from(api: &str) -> Option<&str> {
    api.strip_prefix(API_SERVICE_POLICIES)?.strip_prefix('/')
}

#[async_trait]
impl RestApi for FakeOntap {
    async fn get(&self, api: &str, query: &[(&str, String)]) -> Result<Value, RestError> {
        self.record("GET", api, query, None)?;
        let state = self.state.lock().unwrap();
        if api == API_CLUSTER {
            return Ok(json!({"version": state.version}));
        }
        let records: Vec<Value> = state
            .records
            .iter()
            .filter(|r| matches_query(r, query))
            .cloned()
            .collect();
        Ok(json!({"num_records": records.len(), "records": records}))
    }

    async fn post(&self, api: &str, body: &Value) -> Result<Value, RestError> {
        self.record("POST", api, &[], Some(body))?;
        let mut state = self.state.lock().unwrap();
        let uuid = format!("uuid-{}", state.next_uuid);
        state.next_uuid += 1;

        let mut record = Map::new();
        record.insert("uuid".to_string(), json!(uuid));
        record.insert("name".to_string(), body["name"].clone());
        record.insert(
            "scope".to_string(),
            body.get("scope").cloned().unwrap_or(json!("cluster")),
        );
        record.insert(
            "services".to_string(),
            body.get("services").cloned().unwrap_or(json!([])),
        );
        if let Some(ipspace) = body.get("ipspace") {
            record.insert("ipspace".to_string(), json!({"name": ipspace}));
        }
        if let Some(svm) = body.get("svm.name") {
            record.insert("svm".to_string(), json!({"name": svm}));
        }
        state.records.push(Value::Object(record));
        Ok(json!({}))
    }

    async fn patch(&self, api: &str, body: &Value) -> Result<Value, RestError> {
        self.record("PATCH", api, &[], Some(body))?;
        let mut state = self.state.lock().unwrap();
        let uuid = uuid_from(api).unwrap_or_default().to_string();
        let Some(record) = state
            .records
            .iter_mut()
            .find(|r| r.get("uuid").and_then(Value::as_str) == Some(uuid.as_str()))
        else {
            return Err(RestError::Status {
                api: api.to_string(),
                status: 404,
                message: "entry doesn't exist (code 4)".to_string(),
            });
        };
        if let (Some(target), Some(changes)) = (record.as_object_mut(), body.as_object()) {
            for (key, value) in changes {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(json!({}))
    }

    async fn delete(&self, api: &str) -> Result<Value, RestError> {
        self.record("DELETE", api, &[], None)?;
        let mut state = self.state.lock().unwrap();
        let uuid = uuid_from(api).unwrap_or_default().to_string();
        let before = state.records.len();
        state
            .records
            .retain(|r| r.get("uuid").and_then(Value::as_str) != Some(uuid.as_str()));
        if state.records.len() == before {
            return Err(RestError::Status {
                api: api.to_string(),
                status: 404,
                message: "entry doesn't exist (code 4)".to_string(),
            });
        }
        Ok(json!({}))
    }
}
