//! Session manifest, institutions and other server payloads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use paysheet_core::ApiResponseDecodable;

use crate::auth_session::{AuthSession, NextPane};

/// Feature flag that turns off re-fetching the auth session on completion.
pub const DISABLE_AUTH_SESSION_RETRIEVAL_FEATURE: &str =
    "bank_connections_disable_defensive_auth_session_retrieval_on_complete";

/// An image served by the Financial Connections API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Default resolution URL.
    #[serde(default)]
    pub default: Option<String>,
}

/// A bank or other financial institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    /// Institution ID (`fcinst_...`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Institution website.
    #[serde(default)]
    pub url: Option<String>,
    /// Square icon.
    #[serde(default)]
    pub icon: Option<Image>,
    /// Wide logo.
    #[serde(default)]
    pub logo: Option<Image>,
    /// Whether the institution is featured in search.
    #[serde(default)]
    pub featured: Option<bool>,
    /// Whether auth can be handed off to a mobile app.
    #[serde(default)]
    pub mobile_handoff_capable: Option<bool>,
}

/// The session manifest: the server's description of the whole flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionManifest {
    /// Link account session ID.
    pub id: String,
    /// Pane the flow should show next.
    pub next_pane: NextPane,
    /// Whether the session exists in live mode.
    #[serde(default)]
    pub livemode: bool,
    /// Merchant business name.
    #[serde(default)]
    pub business_name: Option<String>,
    /// Server-driven feature flags.
    #[serde(default)]
    pub features: Option<HashMap<String, bool>>,
    /// Web flow URL.
    #[serde(default)]
    pub hosted_auth_url: Option<String>,
    /// Web flow success redirect.
    #[serde(default)]
    pub success_url: Option<String>,
    /// Web flow cancel redirect.
    #[serde(default)]
    pub cancel_url: Option<String>,
    /// The auth session in progress, if any.
    #[serde(default)]
    pub active_auth_session: Option<AuthSession>,
    /// The institution the user picked, if any.
    #[serde(default)]
    pub active_institution: Option<Institution>,
    /// Requested data permissions.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Whether consent still has to be given.
    #[serde(default)]
    pub consent_required: bool,
    /// Whether only one account may be linked.
    #[serde(default)]
    pub single_account: bool,
    /// Whether manual entry is offered.
    #[serde(default)]
    pub allow_manual_entry: bool,
}

impl SessionManifest {
    /// Whether the named feature flag is present and enabled.
    #[must_use]
    pub fn feature(&self, name: &str) -> bool {
        self.features
            .as_ref()
            .and_then(|features| features.get(name))
            .copied()
            .unwrap_or(false)
    }
}

/// Response of `financial_connections/sessions/synchronize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynchronizePayload {
    /// The refreshed manifest.
    pub manifest: SessionManifest,
    /// Localized pane text, rendered by the panes.
    #[serde(default)]
    pub text: Option<Value>,
}

/// Response of `connections/auth_sessions/events`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSessionEvents {
    /// Auth session ID the events were recorded on.
    pub id: String,
    /// Recorded events.
    #[serde(default)]
    pub events: Vec<Value>,
}

/// Implement [`ApiResponseDecodable`] through the type's serde derive.
macro_rules! impl_serde_decodable {
    ($($name:ty),+ $(,)?) => {
        $(
            impl ApiResponseDecodable for $name {
                fn decoded_object(response: &Value) -> Option<Self> {
                    Self::deserialize(response).ok()
                }
            }
        )+
    };
}

impl_serde_decodable!(AuthSession, SynchronizePayload, AuthSessionEvents);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest_json() -> Value {
        json!({
            "id": "fcsess_1",
            "next_pane": "consent",
            "livemode": false,
            "business_name": "Rocket Rides",
            "features": {
                "bank_connections_disable_defensive_auth_session_retrieval_on_complete": true,
                "some_other_flag": false
            },
            "permissions": ["balances", "payment_method"],
            "consent_required": true,
            "single_account": false,
            "allow_manual_entry": true
        })
    }

    #[test]
    fn decodes_manifest() {
        let manifest: SessionManifest = serde_json::from_value(manifest_json()).unwrap();

        assert_eq!(manifest.next_pane, NextPane::Consent);
        assert_eq!(manifest.business_name.as_deref(), Some("Rocket Rides"));
        assert_eq!(manifest.permissions.len(), 2);
        assert!(manifest.active_auth_session.is_none());
    }

    #[test]
    fn feature_flags() {
        let manifest: SessionManifest = serde_json::from_value(manifest_json()).unwrap();

        assert!(manifest.feature(DISABLE_AUTH_SESSION_RETRIEVAL_FEATURE));
        assert!(!manifest.feature("some_other_flag"));
        assert!(!manifest.feature("missing_flag"));

        let mut value = manifest_json();
        value["features"] = Value::Null;
        let manifest: SessionManifest = serde_json::from_value(value).unwrap();
        assert!(!manifest.feature(DISABLE_AUTH_SESSION_RETRIEVAL_FEATURE));
    }

    #[test]
    fn synchronize_payload_decoding() {
        let payload = SynchronizePayload::decoded_object(&json!({
            "manifest": manifest_json(),
            "text": { "consent_pane": { "title": "Connect" } }
        }))
        .unwrap();
        assert_eq!(payload.manifest.id, "fcsess_1");

        assert!(SynchronizePayload::decoded_object(&json!({ "text": {} })).is_none());
    }
}
