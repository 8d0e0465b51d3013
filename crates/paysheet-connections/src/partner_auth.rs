//! Partner auth bookkeeping.
//!
//! The partner auth panes send the user to a data partner to authorize a bank
//! connection. [`SharedPartnerAuthDataSource`] holds the flow context those
//! panes need and tracks the one auth session that is in progress.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use paysheet_client::ClientError;

use crate::analytics::AnalyticsClient;
use crate::api::FinancialConnectionsApi;
use crate::auth_session::{AuthSession, NextPane};
use crate::config::RuntimeEnvironment;
use crate::manifest::{Institution, SessionManifest, DISABLE_AUTH_SESSION_RETRIEVAL_FEATURE};

/// Namespace of auth session lifecycle events.
pub const AUTH_SESSION_EVENT_NAMESPACE: &str = "partner-auth-lifecycle";

/// Data source used by the partner auth panes.
#[async_trait]
pub trait PartnerAuthDataSource: Send + Sync {
    /// The pane this data source serves.
    fn pane(&self) -> NextPane;

    /// The institution being connected.
    fn institution(&self) -> &Institution;

    /// The session manifest.
    fn manifest(&self) -> &SessionManifest;

    /// App return URL for partners that redirect back to the app.
    fn return_url(&self) -> Option<&str>;

    /// Analytics sink of the flow.
    fn analytics_client(&self) -> &Arc<dyn AnalyticsClient>;

    /// The started-but-not-yet-authorized session, if any.
    fn pending_auth_session(&self) -> Option<&AuthSession>;

    /// Replace the pending session.
    fn set_pending_auth_session(&mut self, auth_session: Option<AuthSession>);

    /// Whether to skip re-fetching the auth session when it completes.
    fn disable_auth_session_retrieval(&self) -> bool;

    /// Record a lifecycle event without waiting for the result.
    fn record_auth_session_event(&self, event_name: &str, auth_session_id: &str) -> Option<JoinHandle<()>>;

    /// Clear the app return URL on the server and make `auth_session`, with
    /// its URL replaced by `auth_url`, the pending session.
    async fn clear_return_url(
        &mut self,
        auth_session: &AuthSession,
        auth_url: &str,
    ) -> Result<AuthSession, ClientError>;

    /// Fetch the latest state of `auth_session` and make it the pending session.
    async fn retrieve_auth_session(&mut self, auth_session: &AuthSession) -> Result<AuthSession, ClientError>;
}

/// Flow context handed to the partner auth panes.
#[derive(Debug, Clone)]
pub struct PartnerAuthContext {
    /// The pane being shown.
    pub pane: NextPane,
    /// The institution being connected.
    pub institution: Institution,
    /// The session manifest.
    pub manifest: SessionManifest,
    /// App return URL, if the host app has one.
    pub return_url: Option<String>,
    /// Link account session client secret.
    pub client_secret: String,
}

/// Default [`PartnerAuthDataSource`].
pub struct SharedPartnerAuthDataSource {
    context: PartnerAuthContext,
    api: Arc<dyn FinancialConnectionsApi>,
    analytics_client: Arc<dyn AnalyticsClient>,
    environment: RuntimeEnvironment,
    // A pending session has started but is not yet authorized. It is up for
    // cancellation unless the user completes authorization.
    pending_auth_session: Option<AuthSession>,
}

impl SharedPartnerAuthDataSource {
    /// Create a data source with the detected runtime environment.
    #[must_use]
    pub fn new(
        context: PartnerAuthContext,
        api: Arc<dyn FinancialConnectionsApi>,
        analytics_client: Arc<dyn AnalyticsClient>,
    ) -> Self {
        Self {
            context,
            api,
            analytics_client,
            environment: RuntimeEnvironment::detect(),
            pending_auth_session: None,
        }
    }

    /// Override the runtime environment.
    #[must_use]
    pub fn with_environment(mut self, environment: RuntimeEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// The runtime environment in effect.
    #[must_use]
    pub fn environment(&self) -> RuntimeEnvironment {
        self.environment
    }
}

impl std::fmt::Debug for SharedPartnerAuthDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedPartnerAuthDataSource")
            .field("pane", &self.context.pane)
            .field("institution", &self.context.institution.id)
            .field("environment", &self.environment)
            .field("pending_auth_session", &self.pending_auth_session.as_ref().map(|s| &s.id))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PartnerAuthDataSource for SharedPartnerAuthDataSource {
    fn pane(&self) -> NextPane {
        self.context.pane
    }

    fn institution(&self) -> &Institution {
        &self.context.institution
    }

    fn manifest(&self) -> &SessionManifest {
        &self.context.manifest
    }

    fn return_url(&self) -> Option<&str> {
        self.context.return_url.as_deref()
    }

    fn analytics_client(&self) -> &Arc<dyn AnalyticsClient> {
        &self.analytics_client
    }

    fn pending_auth_session(&self) -> Option<&AuthSession> {
        self.pending_auth_session.as_ref()
    }

    fn set_pending_auth_session(&mut self, auth_session: Option<AuthSession>) {
        self.pending_auth_session = auth_session;
    }

    fn disable_auth_session_retrieval(&self) -> bool {
        self.context
            .manifest
            .feature(DISABLE_AUTH_SESSION_RETRIEVAL_FEATURE)
    }

    fn record_auth_session_event(&self, event_name: &str, auth_session_id: &str) -> Option<JoinHandle<()>> {
        if !self.environment.allows_auth_session_events() {
            return None;
        }
        // Bank auth repair does not support auth session logging.
        if self.context.pane == NextPane::BankAuthRepair {
            return None;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(event_name = %event_name, "No async runtime, dropping auth session event");
            return None;
        };

        let api = Arc::clone(&self.api);
        let client_secret = self.context.client_secret.clone();
        let auth_session_id = auth_session_id.to_string();
        let event_name = event_name.to_string();

        Some(runtime.spawn(async move {
            if let Err(error) = api
                .record_auth_session_event(
                    &client_secret,
                    &auth_session_id,
                    AUTH_SESSION_EVENT_NAMESPACE,
                    &event_name,
                )
                .await
            {
                tracing::debug!(
                    auth_session_id = %auth_session_id,
                    event_name = %event_name,
                    error = %error,
                    "Failed to record auth session event"
                );
            }
        }))
    }

    async fn clear_return_url(
        &mut self,
        auth_session: &AuthSession,
        auth_url: &str,
    ) -> Result<AuthSession, ClientError> {
        self.api
            .synchronize(&self.context.client_secret, None)
            .await?;

        let auth_session = auth_session.with_url(auth_url);
        tracing::debug!(auth_session_id = %auth_session.id, "Cleared return URL for auth session");
        self.pending_auth_session = Some(auth_session.clone());
        Ok(auth_session)
    }

    async fn retrieve_auth_session(&mut self, auth_session: &AuthSession) -> Result<AuthSession, ClientError> {
        let latest = self
            .api
            .retrieve_auth_session(&self.context.client_secret, &auth_session.id)
            .await?;

        self.pending_auth_session = Some(latest.clone());
        Ok(latest)
    }
}
