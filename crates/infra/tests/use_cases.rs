//! Use-case flows end to end: config → authenticated clients → adapters →
//! mock services

mod support;

use std::path::PathBuf;

use konexus_domain::{FeaturesSource, KonexusError};
use konexus_infra::KonexusClients;
use serde_json::json;
use support::{authority, config, envelope, ACCESS_TOKEN};
use wiremock::matchers::{body_string_contains, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DIRECTORY: &str = "/directory/tenants/3331/directories/public";

async fn connect(authority: &MockServer, service: &MockServer) -> KonexusClients {
    KonexusClients::connect(config(authority, service)).await.unwrap()
}

async fn assert_all_requests_authorized(service: &MockServer) {
    let expected = format!("Bearer {ACCESS_TOKEN}");
    for request in service.received_requests().await.unwrap() {
        let header = request.headers.get("authorization").and_then(|v| v.to_str().ok());
        assert_eq!(header, Some(expected.as_str()), "{} {}", request.method, request.url);
    }
}

fn user_json() -> serde_json::Value {
    json!({
        "id": "u-1",
        "firstName": "John",
        "lastName": "Dough",
        "contactInformation": {
            "emails": [{ "value": "a@b.com", "targetType": "Work", "isPrimary": true,
                         "verification": { "verified": false } }],
            "phones": [{ "value": "+12081112222", "targetType": "Work", "isPrimary": true,
                         "verification": { "verified": false } }]
        },
        "notificationPreferences": {
            "locations": [{
                "id": "loc-1",
                "address": { "name": "Personal", "street": "1234 W North St", "city": "City",
                             "state": "State", "postalCode": "012345", "country": "US" },
                "geoLocation": { "latitude": 43.6, "longitude": -116.2 }
            }]
        }
    })
}

async fn mount_directory(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("{DIRECTORY}/users/query")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .up_to_n_times(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{DIRECTORY}/users/query")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "u-1", "primaryEmail": "a@b.com" }]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/directory/realms/civicready/meta/timezones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "timeZones": [
                { "id": "Pacific Standard Time", "standardName": "Pacific Standard Time" },
                { "id": "Mountain Standard Time", "standardName": "Mountain Standard Time" }
            ]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/directory/realms/civicready/meta/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "spokenLanguages": [{ "value": "English" }],
            "writtenLanguages": [{ "value": "English" }]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{DIRECTORY}/groups/discover")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": "g-leaf" },
                { "id": "g-parent", "children": [{ "id": "g-child" }] }
            ]
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{DIRECTORY}/users")))
        .and(body_string_contains(r#""timezone":"Mountain Standard Time""#))
        .and(body_string_contains(r#""memberships":[{"groupId":"g-leaf"}]"#))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json()))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{DIRECTORY}/users/u-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{DIRECTORY}/users/u-1/emails")))
        .and(body_string_contains(r#""value":"second_a@b.com""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": "second_a@b.com",
            "targetType": "Work",
            "isPrimary": false,
            "verification": { "verified": false }
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/directory/test/verifications/(email|phone)/[^/]+$"))
        .respond_with(|request: &wiremock::Request| {
            let value = request.url.path_segments().and_then(|s| s.last()).unwrap_or_default();
            ResponseTemplate::new(200)
                .set_body_json(json!({ "value": value, "verificationCode": "123456" }))
        })
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"/users/u-1/(emails|phones)/[^/]+/verify$"))
        .and(body_string_contains(r#""verificationCode":"123456""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(3)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"/users/u-1/(emails|phones)/[^/]+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": "verified",
            "isPrimary": true,
            "verification": { "verified": true }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn register_user_creates_verifies_and_updates() {
    let authority = authority().await;
    let service = MockServer::start().await;
    mount_directory(&service).await;

    let clients = connect(&authority, &service).await;
    let outcome = clients.register_user().run("a@b.com").await.unwrap();

    assert_eq!(outcome.user.id, "u-1");
    assert_eq!(outcome.secondary_email.value, "second_a@b.com");
    assert!(!outcome.secondary_email.is_primary);
    assert_all_requests_authorized(&service).await;
}

#[tokio::test]
async fn register_user_rejects_existing_email() {
    let authority = authority().await;
    let service = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{DIRECTORY}/users/query")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "u-1" }]
        })))
        .mount(&service)
        .await;

    let clients = connect(&authority, &service).await;
    let err = clients.register_user().create_user_flow("a@b.com").await.unwrap_err();

    assert!(matches!(err, KonexusError::Expectation(_)), "unexpected error: {err:?}");
}

struct Fixture {
    _dir: tempfile::TempDir,
    document: PathBuf,
    contacts: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let document = dir.path().join("ExampleDoc.pdf");
    let contacts = dir.path().join("ExampleContacts.csv");
    std::fs::write(&document, b"%PDF-1.4\n").unwrap();
    std::fs::write(&contacts, b"FirstName,LastName,Phone\n").unwrap();
    Fixture { _dir: dir, document, contacts }
}

fn defaults() -> serde_json::Value {
    envelope(json!({
        "recipients": { "groupIds": [] },
        "message": { "basic": { "subject": "Default" } },
        "channels": { "textMessage": { "send": false }, "email": { "send": false } },
        "eventType": "Test"
    }))
}

async fn mount_alert_readback(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/alerting/alerts/991"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": 991,
            "message": { "basic": { "message": "sent message" } }
        }))))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/alerting/alerts/991/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({ "status": "Completed" }))),
        )
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/alerting/alerts/preview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/alerting/alerts/default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(defaults()))
        .mount(server)
        .await;
}

async fn mount_files(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/files/v4/tenants/1211/files"))
        .respond_with(|request: &wiremock::Request| {
            let name = request
                .url
                .query_pairs()
                .find(|(key, _)| key == "fileName")
                .map(|(_, value)| value.into_owned())
                .unwrap_or_default();
            ResponseTemplate::new(200).set_body_json(json!({
                "fileName": name,
                "publicUrl": format!("https://files.example.com/{name}")
            }))
        })
        .expect(2)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/v4/tenants/1211/files"))
        .and(query_param("includePrivate", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "fileName": "ExampleDoc.pdf", "publicUrl": "https://files.example.com/ExampleDoc.pdf" },
            { "fileName": "ExampleContacts.csv", "publicUrl": "https://files.example.com/ExampleContacts.csv" }
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/v4/tenants/1211/files/ExampleDoc.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fileName": "ExampleDoc.pdf",
            "contentType": "application/pdf",
            "length": 9,
            "publicUrl": "https://files.example.com/ExampleDoc.pdf"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn alert_with_attachment_end_to_end() {
    let authority = authority().await;
    let service = MockServer::start().await;
    mount_files(&service).await;
    mount_alert_readback(&service).await;
    Mock::given(method("POST"))
        .and(path("/alerting/tenants/1211/contacts/distribution-lists/file"))
        .and(body_string_contains("https://files.example.com/ExampleContacts.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 55, "errors": [] })))
        .mount(&service)
        .await;
    Mock::given(method("POST"))
        .and(path("/alerting/alerts/shortened-url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "shortenedUrl": "https://sho.rt/abc"
        }))))
        .mount(&service)
        .await;
    Mock::given(method("POST"))
        .and(path("/alerting/alerts/attachment"))
        .and(query_param("async", "true"))
        .and(body_string_contains(r#""subject":"Alert with link""#))
        .and(body_string_contains(r#""message":"View file: https://sho.rt/abc""#))
        .and(body_string_contains(r#""distributionListId":55"#))
        .and(body_string_contains(r#""async":true"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": { "isSuccess": true },
            "alertId": 991
        })))
        .expect(1)
        .mount(&service)
        .await;

    let fixture = fixture();
    let clients = connect(&authority, &service).await;
    let outcome = clients
        .send_alert_with_attachment()
        .run(&fixture.document, &fixture.contacts)
        .await
        .unwrap();

    assert_eq!(outcome.alert_id, 991);
    assert_eq!(outcome.message.as_deref(), Some("sent message"));
    assert_eq!(outcome.status.as_deref(), Some("Completed"));
    assert_all_requests_authorized(&service).await;
}

#[tokio::test]
async fn alert_with_attachment_surfaces_server_error() {
    let authority = authority().await;
    let service = MockServer::start().await;
    mount_files(&service).await;
    mount_alert_readback(&service).await;
    Mock::given(method("POST"))
        .and(path("/alerting/tenants/1211/contacts/distribution-lists/file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 55 })))
        .mount(&service)
        .await;
    Mock::given(method("POST"))
        .and(path("/alerting/alerts/shortened-url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "shortenedUrl": "https://sho.rt/abc"
        }))))
        .mount(&service)
        .await;
    Mock::given(method("POST"))
        .and(path("/alerting/alerts/attachment"))
        .respond_with(ResponseTemplate::new(500).set_body_string("queue unavailable"))
        .expect(1)
        .mount(&service)
        .await;

    let fixture = fixture();
    let clients = connect(&authority, &service).await;
    let err = clients
        .send_alert_with_attachment()
        .run(&fixture.document, &fixture.contacts)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("queue unavailable"));
}

#[tokio::test]
async fn alert_with_polygon_end_to_end() {
    let authority = authority().await;
    let service = MockServer::start().await;
    mount_alert_readback(&service).await;
    Mock::given(method("POST"))
        .and(path("/alerting/alerts/features/count"))
        .and(query_param("featuresSource", "PublicUsers"))
        .and(body_string_contains(r#""countsOnly":true"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 3 })))
        .mount(&service)
        .await;
    Mock::given(method("POST"))
        .and(path("/alerting/alerts"))
        .and(body_string_contains(r#"{"featuresSource":"PublicUsers","count":3}"#))
        .and(body_string_contains(r#""subject":"Alert with polygon""#))
        .and(body_string_contains(r#""async":true"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": { "isSuccess": true },
            "alertId": 991
        })))
        .expect(1)
        .mount(&service)
        .await;

    let ring = vec![
        vec![-116.30, 43.60],
        vec![-116.30, 43.70],
        vec![-116.20, 43.70],
        vec![-116.20, 43.60],
        vec![-116.30, 43.60],
    ];
    let clients = connect(&authority, &service).await;
    let outcome = clients
        .send_alert_with_polygon()
        .run(FeaturesSource::default(), vec![-116.30, 43.60, -116.20, 43.70], vec![ring])
        .await
        .unwrap();

    assert_eq!(outcome.alert_id, 991);
    assert_eq!(outcome.status.as_deref(), Some("Completed"));
}

#[tokio::test]
async fn failed_defaults_stop_the_flow() {
    let authority = authority().await;
    let service = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alerting/alerts/default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": { "isSuccess": false, "message": "no defaults" }
        })))
        .mount(&service)
        .await;
    Mock::given(method("POST"))
        .and(path("/alerting/alerts"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&service)
        .await;

    let clients = connect(&authority, &service).await;
    let err = clients
        .send_alert_with_polygon()
        .run(FeaturesSource::PublicUsers, vec![], vec![])
        .await
        .unwrap_err();

    assert!(matches!(err, KonexusError::Expectation(_)), "unexpected error: {err:?}");
}
