//! Partner auth data source tests against a mock Stripe API.

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use paysheet_client::{ClientError, ClientOptions, StripeApiClient};
use paysheet_connections::{
    AuthSession, FinancialConnectionsApiClient, NextPane, PartnerAuthContext, PartnerAuthDataSource,
    RuntimeEnvironment, SharedPartnerAuthDataSource, TracingAnalyticsClient,
};

const CLIENT_SECRET: &str = "fcsess_client_secret_abc";

fn auth_session_json(url: &str) -> Value {
    json!({
        "id": "authsess_1",
        "flow": "mx_oauth_webview",
        "institution_skip_account_selection": null,
        "next_pane": "account_picker",
        "show_partner_disclosure": true,
        "skip_account_selection": false,
        "url": url,
        "is_oauth": true
    })
}

fn manifest_json() -> Value {
    json!({
        "id": "fcsess_1",
        "next_pane": "partner_auth",
        "livemode": false,
        "features": {}
    })
}

fn data_source(server: &MockServer, pane: NextPane, environment: RuntimeEnvironment) -> SharedPartnerAuthDataSource {
    let options = ClientOptions::default()
        .with_api_base_url(format!("{}/v1", server.uri()))
        .with_locale("en-US");
    let client = StripeApiClient::with_options("pk_test_123", options).unwrap();

    let context = PartnerAuthContext {
        pane,
        institution: serde_json::from_value(json!({
            "id": "fcinst_1",
            "name": "Example Bank",
            "icon": { "default": "https://example.com/icon.png" }
        }))
        .unwrap(),
        manifest: serde_json::from_value(manifest_json()).unwrap(),
        return_url: Some("myapp://stripe-redirect".into()),
        client_secret: CLIENT_SECRET.into(),
    };

    SharedPartnerAuthDataSource::new(
        context,
        Arc::new(FinancialConnectionsApiClient::new(client)),
        Arc::new(TracingAnalyticsClient),
    )
    .with_environment(environment)
}

fn started_session() -> AuthSession {
    serde_json::from_value(auth_session_json("stripe-auth://native-redirect/acct/start")).unwrap()
}

fn body_lacks(needle: &'static str) -> impl Fn(&Request) -> bool + Send + Sync {
    move |request: &Request| !String::from_utf8_lossy(&request.body).contains(needle)
}

#[tokio::test]
async fn clear_return_url_stores_pending_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/financial_connections/sessions/synchronize"))
        .and(header("authorization", "Bearer pk_test_123"))
        .and(body_string_contains("client_secret=fcsess_client_secret_abc"))
        .and(body_string_contains("mobile%5Bfullscreen%5D=true"))
        .and(body_string_contains("mobile%5Bhide_close_button%5D=true"))
        .and(body_string_contains("locale=en-US"))
        .and(body_lacks("app_return_url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "manifest": manifest_json() })))
        .expect(1)
        .mount(&server)
        .await;

    let mut source = data_source(&server, NextPane::PartnerAuth, RuntimeEnvironment::Test);
    let original = started_session();

    let pending = source
        .clear_return_url(&original, "https://bank.example.com/oauth")
        .await
        .unwrap();

    assert_eq!(pending.url.as_deref(), Some("https://bank.example.com/oauth"));
    assert_eq!(pending.id, original.id);
    assert_eq!(pending.flow, original.flow);
    assert_eq!(pending.display, original.display);
    assert_eq!(source.pending_auth_session(), Some(&pending));
}

#[tokio::test]
async fn clear_return_url_failure_leaves_pending_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/financial_connections/sessions/synchronize"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "type": "api_error", "message": "Something went wrong" }
        })))
        .mount(&server)
        .await;

    let mut source = data_source(&server, NextPane::PartnerAuth, RuntimeEnvironment::Test);
    let previous = started_session();
    source.set_pending_auth_session(Some(previous.clone()));

    let err = source
        .clear_return_url(&previous, "https://bank.example.com/oauth")
        .await
        .unwrap_err();

    match err {
        ClientError::Api {
            error_type, status, ..
        } => {
            assert_eq!(error_type, "api_error");
            assert_eq!(status, 500);
        }
        other => panic!("expected API error, got {other:?}"),
    }
    assert_eq!(source.pending_auth_session(), Some(&previous));
}

#[tokio::test]
async fn retrieve_replaces_pending_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/connections/auth_sessions/retrieve"))
        .and(body_string_contains("client_secret=fcsess_client_secret_abc"))
        .and(body_string_contains("id=authsess_1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(auth_session_json("https://bank.example.com/after-authorize")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut source = data_source(&server, NextPane::PartnerAuth, RuntimeEnvironment::Test);
    source.set_pending_auth_session(Some(started_session()));

    let latest = source.retrieve_auth_session(&started_session()).await.unwrap();

    assert_eq!(
        latest.url.as_deref(),
        Some("https://bank.example.com/after-authorize")
    );
    assert_eq!(source.pending_auth_session(), Some(&latest));
}

#[tokio::test]
async fn retrieve_decoding_failure_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/connections/auth_sessions/retrieve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let mut source = data_source(&server, NextPane::PartnerAuth, RuntimeEnvironment::Test);

    let err = source
        .retrieve_auth_session(&started_session())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Decoding { .. }));
    assert!(source.pending_auth_session().is_none());
}

#[tokio::test]
async fn records_event_on_device() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/connections/auth_sessions/events"))
        .and(body_string_contains("id=authsess_1"))
        .and(body_string_contains("event_namespace=partner-auth-lifecycle"))
        .and(body_string_contains("event_name=launched"))
        .and(body_string_contains("client_timestamp="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "authsess_1", "events": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let source = data_source(&server, NextPane::PartnerAuth, RuntimeEnvironment::Device);

    source
        .record_auth_session_event("launched", "authsess_1")
        .expect("event should be scheduled")
        .await
        .unwrap();
}

#[tokio::test]
async fn event_failures_are_swallowed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/connections/auth_sessions/events"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let source = data_source(&server, NextPane::PartnerAuth, RuntimeEnvironment::Device);

    let handle = source
        .record_auth_session_event("retry", "authsess_1")
        .expect("event should be scheduled");
    assert!(handle.await.is_ok());
}

#[tokio::test]
async fn no_events_outside_devices_or_for_bank_auth_repair() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/connections/auth_sessions/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "authsess_1" })))
        .expect(0)
        .mount(&server)
        .await;

    for environment in [RuntimeEnvironment::Simulator, RuntimeEnvironment::Test] {
        let source = data_source(&server, NextPane::PartnerAuth, environment);
        assert!(source.record_auth_session_event("launched", "authsess_1").is_none());
    }

    let repair = data_source(&server, NextPane::BankAuthRepair, RuntimeEnvironment::Device);
    assert!(repair.record_auth_session_event("launched", "authsess_1").is_none());
}
