//! Payment and setup intents.
//!
//! Intents can arrive bare or wrapped in the `payment_method_preference`
//! object returned by `elements/sessions`. Both shapes decode to the same
//! types; the wrapper contributes the server's ordering of payment methods.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decode::{string_list, ApiResponseDecodable};
use crate::intent_config::{CaptureMethod, SetupFutureUsage};
use crate::payment_method::{expanded_payment_method, PaymentMethod};

/// Key of the wrapper object in `elements/sessions` responses.
pub(crate) const PAYMENT_METHOD_PREFERENCE: &str = "payment_method_preference";

/// Lifecycle status of an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    /// Waiting for a payment method.
    RequiresPaymentMethod,
    /// Waiting for confirmation.
    RequiresConfirmation,
    /// Waiting for customer action such as 3DS.
    RequiresAction,
    /// Being processed.
    Processing,
    /// Authorized, waiting for capture.
    RequiresCapture,
    /// Canceled.
    Canceled,
    /// Completed.
    Succeeded,
    /// A status this SDK does not know about.
    #[serde(other)]
    Unknown,
}

/// A `PaymentIntent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Payment intent ID (`pi_...`).
    pub id: String,
    /// Client secret.
    pub client_secret: String,
    /// Amount in the smallest currency unit.
    pub amount: i64,
    /// Currency (e.g., "usd").
    pub currency: String,
    /// Current status.
    pub status: IntentStatus,
    /// Whether the object exists in live mode.
    #[serde(default)]
    pub livemode: bool,
    /// Capture method.
    #[serde(default)]
    pub capture_method: Option<CaptureMethod>,
    /// Future usage of the payment method.
    #[serde(default)]
    pub setup_future_usage: Option<SetupFutureUsage>,
    /// Allowed payment method types.
    #[serde(default)]
    pub payment_method_types: Vec<String>,
    /// Payment method types in server-preferred display order.
    #[serde(default)]
    pub ordered_payment_method_types: Vec<String>,
    /// Types enabled on the intent but not activated on the account.
    #[serde(default)]
    pub unactivated_payment_method_types: Vec<String>,
    /// Country of the merchant, from the preference wrapper.
    #[serde(default)]
    pub country_code: Option<String>,
    /// The attached payment method, when expanded.
    #[serde(default, deserialize_with = "expanded_payment_method")]
    pub payment_method: Option<PaymentMethod>,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: Option<i64>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// The raw response this object was decoded from.
    #[serde(skip)]
    pub all_response_fields: Value,
}

/// A `SetupIntent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupIntent {
    /// Setup intent ID (`seti_...`).
    pub id: String,
    /// Client secret.
    pub client_secret: String,
    /// Current status.
    pub status: IntentStatus,
    /// Whether the object exists in live mode.
    #[serde(default)]
    pub livemode: bool,
    /// How the payment method will be used.
    #[serde(default)]
    pub usage: Option<SetupFutureUsage>,
    /// Allowed payment method types.
    #[serde(default)]
    pub payment_method_types: Vec<String>,
    /// Payment method types in server-preferred display order.
    #[serde(default)]
    pub ordered_payment_method_types: Vec<String>,
    /// Types enabled on the intent but not activated on the account.
    #[serde(default)]
    pub unactivated_payment_method_types: Vec<String>,
    /// Country of the merchant, from the preference wrapper.
    #[serde(default)]
    pub country_code: Option<String>,
    /// The attached payment method, when expanded.
    #[serde(default, deserialize_with = "expanded_payment_method")]
    pub payment_method: Option<PaymentMethod>,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: Option<i64>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// The raw response this object was decoded from.
    #[serde(skip)]
    pub all_response_fields: Value,
}

/// Either kind of intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// A payment intent.
    Payment(PaymentIntent),
    /// A setup intent.
    Setup(SetupIntent),
}

impl Intent {
    /// ID of the wrapped intent.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Payment(intent) => &intent.id,
            Self::Setup(intent) => &intent.id,
        }
    }

    /// Server-preferred ordering of payment method types.
    #[must_use]
    pub fn ordered_payment_method_types(&self) -> &[String] {
        match self {
            Self::Payment(intent) => &intent.ordered_payment_method_types,
            Self::Setup(intent) => &intent.ordered_payment_method_types,
        }
    }
}

/// Values taken from the preference wrapper around an intent.
#[derive(Debug, Default)]
struct Preferences {
    ordered_payment_method_types: Option<Vec<String>>,
    unactivated_payment_method_types: Vec<String>,
    country_code: Option<String>,
}

/// Locate the intent object inside `response` and collect wrapper values.
///
/// A response without the wrapper is treated as a bare intent.
fn unwrap_preferences<'a>(response: &'a Value, intent_key: &str) -> Option<(&'a Value, Preferences)> {
    let Some(preference) = response.get(PAYMENT_METHOD_PREFERENCE) else {
        return Some((response, Preferences::default()));
    };
    let intent = preference.get(intent_key)?;
    let preferences = Preferences {
        ordered_payment_method_types: preference
            .get("ordered_payment_method_types")
            .and_then(string_list),
        unactivated_payment_method_types: response
            .get("unactivated_payment_method_types")
            .and_then(string_list)
            .unwrap_or_default(),
        country_code: preference
            .get("country_code")
            .and_then(Value::as_str)
            .map(str::to_string),
    };
    Some((intent, preferences))
}

/// Implement [`ApiResponseDecodable`] for an intent type stored under `$key`
/// in the preference wrapper.
macro_rules! impl_intent_decoding {
    ($name:ident, $key:literal) => {
        impl ApiResponseDecodable for $name {
            fn decoded_object(response: &Value) -> Option<Self> {
                let (object, preferences) = unwrap_preferences(response, $key)?;
                let mut intent = Self::deserialize(object).ok()?;

                if let Some(ordered) = preferences.ordered_payment_method_types {
                    intent.ordered_payment_method_types = ordered;
                } else if intent.ordered_payment_method_types.is_empty() {
                    intent.ordered_payment_method_types = intent.payment_method_types.clone();
                }
                if !preferences.unactivated_payment_method_types.is_empty() {
                    intent.unactivated_payment_method_types =
                        preferences.unactivated_payment_method_types;
                }
                intent.country_code = preferences.country_code.or(intent.country_code);
                intent.all_response_fields = response.clone();
                Some(intent)
            }
        }
    };
}

impl_intent_decoding!(PaymentIntent, "payment_intent");
impl_intent_decoding!(SetupIntent, "setup_intent");
