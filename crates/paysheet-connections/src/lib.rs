//! Financial Connections support for the paysheet SDK.
//!
//! This crate covers the parts of the bank-connection flow that are not UI:
//!
//! - **Models**: `AuthSession`, `SessionManifest`, `Institution`, `NextPane`
//! - **API**: the `FinancialConnectionsApi` seam and its HTTP implementation
//! - **Partner auth**: `SharedPartnerAuthDataSource`, which tracks the pending auth session
//! - **Consent**: `ConsentLogoLayout`, the arrangement of the consent pane's logo row
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use paysheet_client::StripeApiClient;
//! use paysheet_connections::{
//!     FinancialConnectionsApiClient, PartnerAuthContext, PartnerAuthDataSource,
//!     SharedPartnerAuthDataSource, TracingAnalyticsClient,
//! };
//!
//! # async fn example(
//! #     context: PartnerAuthContext,
//! #     auth_session: paysheet_connections::AuthSession,
//! # ) -> Result<(), paysheet_client::ClientError> {
//! let api = FinancialConnectionsApiClient::new(StripeApiClient::new("pk_test_123")?);
//! let mut data_source =
//!     SharedPartnerAuthDataSource::new(context, Arc::new(api), Arc::new(TracingAnalyticsClient));
//!
//! let pending = data_source
//!     .clear_return_url(&auth_session, "https://bank.example.com/oauth")
//!     .await?;
//! data_source.record_auth_session_event("launched", &pending.id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod analytics;
pub mod api;
pub mod auth_session;
pub mod config;
pub mod consent_logo;
pub mod manifest;
pub mod partner_auth;

pub use analytics::{AnalyticsClient, AnalyticsEvent, TracingAnalyticsClient};
pub use api::{FinancialConnectionsApi, FinancialConnectionsApiClient};
pub use auth_session::{AuthSession, AuthSessionDisplay, AuthSessionFlow, NextPane};
pub use config::RuntimeEnvironment;
pub use consent_logo::{ConsentLogoLayout, EllipsisLayout, LogoElement};
pub use manifest::{AuthSessionEvents, Institution, SessionManifest, SynchronizePayload};
pub use partner_auth::{PartnerAuthContext, PartnerAuthDataSource, SharedPartnerAuthDataSource};
