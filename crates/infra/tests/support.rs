//! Shared wiremock fixtures for the service client tests.

#![allow(dead_code)]

use std::time::Duration;

use konexus_domain::{AuthSettings, HttpSettings, KonexusConfig, ServiceEndpoint, TenantSettings};
use konexus_infra::HttpClient;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCESS_TOKEN: &str = "test-access-token";
pub const CLIENT_ID: &str = "konexus-tests";
pub const CLIENT_SECRET: &str = "s3cret";

/// Serve a discovery document and a token endpoint that grants
/// [`ACCESS_TOKEN`] for any client-credentials request.
pub async fn mount_authority(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/.well-known/openid-configuration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issuer": server.uri(),
            "token_endpoint": format!("{}/connect/token", server.uri()),
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "Bearer",
            "expires_in": 3600,
        })))
        .mount(server)
        .await;
}

pub async fn authority() -> MockServer {
    let server = MockServer::start().await;
    mount_authority(&server).await;
    server
}

pub fn http() -> HttpClient {
    HttpClient::builder().timeout(Duration::from_secs(5)).build().unwrap()
}

/// Successful `{ status, item }` envelope.
pub fn envelope(item: Value) -> Value {
    json!({ "status": { "isSuccess": true, "code": 200 }, "item": item })
}

pub fn config(authority: &MockServer, service: &MockServer) -> KonexusConfig {
    KonexusConfig {
        auth: AuthSettings {
            authority_url: authority.uri(),
            client_id: CLIENT_ID.into(),
            client_secret: CLIENT_SECRET.into(),
        },
        directory: ServiceEndpoint::new(format!("{}/directory", service.uri())),
        alerting: ServiceEndpoint::new(format!("{}/alerting", service.uri())),
        files: ServiceEndpoint::new(format!("{}/files", service.uri())),
        http: HttpSettings { timeout_secs: 5, max_attempts: 1 },
        tenant: TenantSettings::default(),
    }
}
