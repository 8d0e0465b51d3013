//! Identifier and credential types.
//!
//! Client secrets are validated when parsed so that malformed values are
//! rejected before a request is ever built.
//!
//! # Macro-based secret types
//!
//! The `client_secret_type!` macro generates one newtype per intent kind. Each
//! type only accepts `<prefix>_<id>_secret_<token>` where neither `<id>` nor
//! `<token>` is empty or contains an underscore.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marker that separates the intent id from the secret token.
const SECRET_SEPARATOR: &str = "_secret_";

/// Macro to define a client secret type bound to an intent id prefix.
///
/// The generated type implements `FromStr`, `TryFrom<String>`, `Display`,
/// serde (as a string), and a `Debug` that hides the secret token.
macro_rules! client_secret_type {
    ($name:ident, $prefix:literal, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Id prefix of the intent this secret belongs to.
            pub const PREFIX: &'static str = $prefix;

            /// Return `true` if `value` is a well-formed secret for this intent kind.
            #[must_use]
            pub fn is_valid(value: &str) -> bool {
                split_client_secret(value, Self::PREFIX).is_some()
            }

            /// Return the intent id portion, e.g. `pi_123` for `pi_123_secret_abc`.
            #[must_use]
            pub fn intent_id(&self) -> &str {
                let end = self.0.find(SECRET_SEPARATOR).unwrap_or(self.0.len());
                &self.0[..end]
            }

            /// Return the full secret string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if Self::is_valid(s) {
                    Ok(Self(s.to_string()))
                } else {
                    Err(IdError::InvalidClientSecret {
                        expected_prefix: Self::PREFIX,
                    })
                }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}_secret_***)", stringify!($name), self.intent_id())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(secret: $name) -> Self {
                secret.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

client_secret_type!(
    PaymentIntentClientSecret,
    "pi",
    "A `PaymentIntent` client secret (`pi_<id>_secret_<token>`)."
);
client_secret_type!(
    SetupIntentClientSecret,
    "seti",
    "A `SetupIntent` client secret (`seti_<id>_secret_<token>`)."
);

/// Split `<prefix>_<id>_secret_<token>` into `(id, token)`.
fn split_client_secret<'a>(value: &'a str, prefix: &str) -> Option<(&'a str, &'a str)> {
    let rest = value.strip_prefix(prefix)?.strip_prefix('_')?;
    let (id, token) = rest.split_once(SECRET_SEPARATOR)?;
    let well_formed = |part: &str| !part.is_empty() && !part.contains('_');
    (well_formed(id) && well_formed(token)).then_some((id, token))
}

/// A publishable API key used to authenticate client-side requests.
///
/// User keys (`uk_...`) authenticate on behalf of a dashboard user and are not
/// allowed to retrieve intents by client secret.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublishableKey(String);

impl PublishableKey {
    /// Wrap a key string.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Return `true` for user keys (`uk_` prefix).
    #[must_use]
    pub fn is_user_key(&self) -> bool {
        self.0.starts_with("uk_")
    }

    /// Return `true` for test mode keys.
    #[must_use]
    pub fn is_test_mode(&self) -> bool {
        self.0.starts_with("pk_test_") || self.0.starts_with("uk_test_")
    }

    /// Return the key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PublishableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublishableKey({})", self.0)
    }
}

impl fmt::Display for PublishableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PublishableKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PublishableKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a client secret of the expected intent kind.
    #[error("invalid client secret: expected `{expected_prefix}_<id>_secret_<token>`")]
    InvalidClientSecret {
        /// The intent id prefix the secret should start with.
        expected_prefix: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_intent_secret_parses() {
        let secret: PaymentIntentClientSecret = "pi_123abc_secret_xyz789".parse().unwrap();
        assert_eq!(secret.intent_id(), "pi_123abc");
        assert_eq!(secret.as_str(), "pi_123abc_secret_xyz789");
    }

    #[test]
    fn payment_intent_secret_rejects_malformed() {
        for bad in [
            "",
            "pi_123",
            "pi__secret_xyz",
            "pi_123_secret_",
            "pi_1_2_secret_xyz",
            "pi_123_secret_xy_z",
            "seti_123_secret_xyz",
            "xpi_123_secret_xyz",
        ] {
            assert!(
                bad.parse::<PaymentIntentClientSecret>().is_err(),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn setup_intent_secret_parses() {
        let secret: SetupIntentClientSecret = "seti_123_secret_abc".parse().unwrap();
        assert_eq!(secret.intent_id(), "seti_123");
        assert!(!PaymentIntentClientSecret::is_valid(secret.as_str()));
    }

    #[test]
    fn secret_error_names_prefix() {
        let err = "nope".parse::<SetupIntentClientSecret>().unwrap_err();
        assert_eq!(
            err,
            IdError::InvalidClientSecret {
                expected_prefix: "seti"
            }
        );
    }

    #[test]
    fn secret_debug_hides_token() {
        let secret: PaymentIntentClientSecret = "pi_123_secret_topsecret".parse().unwrap();
        let debug = format!("{secret:?}");
        assert!(!debug.contains("topsecret"));
        assert!(debug.contains("pi_123"));
    }

    #[test]
    fn secret_serde_json() {
        let secret: PaymentIntentClientSecret = "pi_1_secret_2".parse().unwrap();
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, "\"pi_1_secret_2\"");
        let parsed: PaymentIntentClientSecret = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, secret);
        assert!(serde_json::from_str::<PaymentIntentClientSecret>("\"garbage\"").is_err());
    }

    #[test]
    fn publishable_key_kinds() {
        assert!(PublishableKey::new("uk_test_123").is_user_key());
        assert!(!PublishableKey::new("pk_test_123").is_user_key());
        assert!(PublishableKey::new("pk_test_123").is_test_mode());
        assert!(!PublishableKey::new("pk_live_123").is_test_mode());
    }
}
