//! Financial Connections API.

use async_trait::async_trait;
use serde_json::Value;

use paysheet_client::params::insert_optional;
use paysheet_client::{ClientError, Parameters, StripeApiClient};

use crate::auth_session::AuthSession;
use crate::manifest::{AuthSessionEvents, SynchronizePayload};

const SYNCHRONIZE_ENDPOINT: &str = "financial_connections/sessions/synchronize";
const AUTH_SESSION_EVENTS_ENDPOINT: &str = "connections/auth_sessions/events";
const AUTH_SESSION_RETRIEVE_ENDPOINT: &str = "connections/auth_sessions/retrieve";

/// The subset of the Financial Connections API used by partner auth.
///
/// Implemented over HTTP by [`FinancialConnectionsApiClient`]; tests and host
/// applications may provide their own implementation.
#[async_trait]
pub trait FinancialConnectionsApi: Send + Sync {
    /// Refresh the session manifest, replacing the stored app return URL.
    ///
    /// Passing `None` clears the return URL on the server.
    async fn synchronize(
        &self,
        client_secret: &str,
        return_url: Option<&str>,
    ) -> Result<SynchronizePayload, ClientError>;

    /// Record a lifecycle event on an auth session.
    async fn record_auth_session_event(
        &self,
        client_secret: &str,
        auth_session_id: &str,
        event_namespace: &str,
        event_name: &str,
    ) -> Result<AuthSessionEvents, ClientError>;

    /// Fetch the latest state of an auth session.
    async fn retrieve_auth_session(
        &self,
        client_secret: &str,
        auth_session_id: &str,
    ) -> Result<AuthSession, ClientError>;
}

/// HTTP implementation of [`FinancialConnectionsApi`].
#[derive(Debug, Clone)]
pub struct FinancialConnectionsApiClient {
    client: StripeApiClient,
}

impl FinancialConnectionsApiClient {
    /// Wrap a configured API client.
    #[must_use]
    pub fn new(client: StripeApiClient) -> Self {
        Self { client }
    }
}

fn session_parameters(client_secret: &str) -> Parameters {
    let mut params = Parameters::new();
    params.insert("client_secret".into(), client_secret.into());
    params
}

#[async_trait]
impl FinancialConnectionsApi for FinancialConnectionsApiClient {
    async fn synchronize(
        &self,
        client_secret: &str,
        return_url: Option<&str>,
    ) -> Result<SynchronizePayload, ClientError> {
        let mut mobile = Parameters::new();
        mobile.insert("fullscreen".into(), true.into());
        mobile.insert("hide_close_button".into(), true.into());
        insert_optional(&mut mobile, "app_return_url", return_url);

        let mut params = session_parameters(client_secret);
        params.insert("mobile".into(), Value::Object(mobile));
        params.insert("locale".into(), self.client.locale().into());

        self.client.post(SYNCHRONIZE_ENDPOINT, &params).await
    }

    async fn record_auth_session_event(
        &self,
        client_secret: &str,
        auth_session_id: &str,
        event_namespace: &str,
        event_name: &str,
    ) -> Result<AuthSessionEvents, ClientError> {
        let mut params = session_parameters(client_secret);
        params.insert("id".into(), auth_session_id.into());
        params.insert(
            "client_timestamp".into(),
            chrono::Utc::now().timestamp_millis().into(),
        );
        params.insert("event_namespace".into(), event_namespace.into());
        params.insert("event_name".into(), event_name.into());

        self.client.post(AUTH_SESSION_EVENTS_ENDPOINT, &params).await
    }

    async fn retrieve_auth_session(
        &self,
        client_secret: &str,
        auth_session_id: &str,
    ) -> Result<AuthSession, ClientError> {
        let mut params = session_parameters(client_secret);
        params.insert("id".into(), auth_session_id.into());

        self.client.post(AUTH_SESSION_RETRIEVE_ENDPOINT, &params).await
    }
}
