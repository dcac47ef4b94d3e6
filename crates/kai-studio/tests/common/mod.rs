//! Shared helpers for integration tests.

#![allow(dead_code)]

use kai_studio::{Credentials, KaiStudio, ServiceEndpoints};
use serde_json::{Value, json};
use wiremock::{MockServer, ResponseTemplate};

/// Credentials used by most tests.
pub fn managed_credentials() -> Credentials {
    Credentials::managed("org-1", "inst-1", "key-1")
}

/// Build a client whose file and management endpoints both point at the mock server.
pub fn client_for(server: &MockServer, credentials: Credentials) -> KaiStudio {
    KaiStudio::builder(credentials)
        .endpoints(ServiceEndpoints {
            files: server.uri(),
            management: server.uri(),
        })
        .build()
        .expect("client should build")
}

/// A 200 response wrapping `value` in the service envelope.
pub fn envelope(value: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "response": value }))
}
