//! Partner auth sessions.
//!
//! An auth session tracks one attempt to authorize a bank connection with a
//! data partner. The server owns its state; the client only ever holds a
//! snapshot that is replaced wholesale after each round trip.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::manifest::Image;

/// URL prefix of sessions that complete through a native app redirect.
const NATIVE_REDIRECT_PREFIX: &str = "stripe-auth://native-redirect/";

/// A partner auth session snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Auth session ID (`authsess_...`).
    pub id: String,
    /// The partner flow this session runs.
    #[serde(default)]
    pub flow: Option<AuthSessionFlow>,
    /// Whether the institution lets the user skip account selection.
    #[serde(default)]
    pub institution_skip_account_selection: Option<bool>,
    /// Pane to show once the session completes.
    pub next_pane: NextPane,
    /// Whether to show the data partner disclosure.
    #[serde(default)]
    pub show_partner_disclosure: Option<bool>,
    /// Whether account selection is skipped entirely.
    #[serde(default)]
    pub skip_account_selection: Option<bool>,
    /// URL the user is sent to in order to authorize.
    #[serde(default)]
    pub url: Option<String>,
    /// Whether the partner flow is OAuth based.
    #[serde(default)]
    pub is_oauth: Option<bool>,
    /// Display metadata for the prepane.
    #[serde(default)]
    pub display: Option<AuthSessionDisplay>,
}

impl AuthSession {
    /// Whether the partner flow is OAuth based. Absent means no.
    #[must_use]
    pub fn is_oauth(&self) -> bool {
        self.is_oauth.unwrap_or(false)
    }

    /// Whether the session completes through a native app redirect.
    #[must_use]
    pub fn requires_native_redirect(&self) -> bool {
        self.url
            .as_deref()
            .is_some_and(|url| url.starts_with(NATIVE_REDIRECT_PREFIX))
    }

    /// A copy of this session with only the URL replaced.
    #[must_use]
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..self.clone()
        }
    }
}

/// Display metadata attached to an auth session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSessionDisplay {
    /// Text content.
    #[serde(default)]
    pub text: Option<AuthSessionDisplayText>,
}

/// Text content of an auth session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSessionDisplayText {
    /// Content shown before sending the user to an OAuth partner.
    #[serde(default)]
    pub oauth_prepane: Option<OauthPrepane>,
}

/// Content of the OAuth prepane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OauthPrepane {
    /// Title.
    pub title: String,
    /// Optional subtitle.
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Institution icon.
    #[serde(default)]
    pub institution_icon: Option<Image>,
    /// Body entries, rendered by the pane.
    #[serde(default)]
    pub body: Value,
    /// Call to action.
    #[serde(default)]
    pub cta: Value,
}

/// Partner flow of an auth session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum AuthSessionFlow {
    Direct,
    DirectWebview,
    FinicityConnectV2Fix,
    FinicityConnectV2Lite,
    FinicityConnectV2Oauth,
    FinicityConnectV2OauthRedirect,
    FinicityConnectV2OauthWebview,
    MxConnect,
    MxOauth,
    MxOauthAppToApp,
    MxOauthRedirect,
    MxOauthWebview,
    Testmode,
    TestmodeOauth,
    TestmodeOauthWebview,
    TruelayerEmbedded,
    TruelayerOauth,
    WellsFargo,
    WellsFargoWebview,
    /// A flow this SDK does not know about.
    #[serde(other)]
    Unparsable,
}

/// Panes of the Financial Connections flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum NextPane {
    AccountPicker,
    AttachLinkedPaymentAccount,
    AuthOptions,
    BankAuthRepair,
    Consent,
    IdConsentContent,
    InstitutionPicker,
    LinkAccountPicker,
    LinkConsent,
    LinkLogin,
    ManualEntry,
    ManualEntrySuccess,
    NetworkingLinkLoginWarmup,
    NetworkingLinkSignupPane,
    NetworkingLinkStepUpVerification,
    NetworkingLinkVerification,
    NetworkingSaveToLinkVerification,
    Notice,
    PartnerAuth,
    ResetFlow,
    Success,
    TerminalError,
    UnexpectedError,
    /// A pane this SDK does not know about.
    #[serde(other)]
    Unparsable,
}
