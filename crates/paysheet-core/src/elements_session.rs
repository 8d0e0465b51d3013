//! Elements sessions.
//!
//! An elements session is the server-computed bundle describing which payment
//! methods are available for an intent or intent configuration.

use serde_json::Value;

use crate::decode::{string_list, ApiResponseDecodable};
use crate::external_payment_method::ExternalPaymentMethod;
use crate::intent::{Intent, PaymentIntent, SetupIntent, PAYMENT_METHOD_PREFERENCE};
use crate::payment_method::PaymentMethod;

/// A decoded `elements/sessions` response.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementsSession {
    /// Session ID, used to correlate analytics.
    pub session_id: Option<String>,
    /// Country of the merchant.
    pub country_code: Option<String>,
    /// Payment method types in server-preferred display order.
    pub ordered_payment_method_types: Vec<String>,
    /// Types requested but not activated on the account.
    pub unactivated_payment_method_types: Vec<String>,
    /// The intent the session was computed for. `None` for deferred intents.
    pub intent: Option<Intent>,
    /// External payment methods, if the response carried a valid list.
    pub external_payment_methods: Option<Vec<ExternalPaymentMethod>>,
    /// Saved payment methods of the customer, when an ephemeral key was sent.
    pub legacy_customer: Option<LegacyElementsCustomer>,
    /// The raw response this object was decoded from.
    pub all_response_fields: Value,
}

impl ElementsSession {
    /// Find an external payment method by type.
    #[must_use]
    pub fn external_payment_method(&self, payment_method_type: &str) -> Option<&ExternalPaymentMethod> {
        self.external_payment_methods
            .as_deref()?
            .iter()
            .find(|epm| epm.payment_method_type == payment_method_type)
    }
}

impl ApiResponseDecodable for ElementsSession {
    fn decoded_object(response: &Value) -> Option<Self> {
        let preference = response.as_object()?.get(PAYMENT_METHOD_PREFERENCE)?;
        let ordered_payment_method_types =
            string_list(preference.get("ordered_payment_method_types")?)?;

        let intent = if preference.get("payment_intent").is_some() {
            PaymentIntent::decoded_object(response).map(Intent::Payment)
        } else if preference.get("setup_intent").is_some() {
            SetupIntent::decoded_object(response).map(Intent::Setup)
        } else {
            None
        };

        Some(Self {
            session_id: response
                .get("session_id")
                .and_then(Value::as_str)
                .map(str::to_string),
            country_code: preference
                .get("country_code")
                .and_then(Value::as_str)
                .map(str::to_string),
            ordered_payment_method_types,
            unactivated_payment_method_types: response
                .get("unactivated_payment_method_types")
                .and_then(string_list)
                .unwrap_or_default(),
            intent,
            external_payment_methods: ExternalPaymentMethod::decoded(
                response.get("external_payment_methods_data"),
            ),
            legacy_customer: LegacyElementsCustomer::decoded_object(response),
            all_response_fields: response.clone(),
        })
    }
}

/// Saved payment methods returned under `legacy_customer`.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyElementsCustomer {
    /// Saved payment methods. Malformed entries are skipped.
    pub payment_methods: Vec<PaymentMethod>,
    /// The raw response this object was decoded from.
    pub all_response_fields: Value,
}

impl ApiResponseDecodable for LegacyElementsCustomer {
    fn decoded_object(response: &Value) -> Option<Self> {
        let saved = response
            .as_object()?
            .get("legacy_customer")?
            .get("payment_methods")?
            .as_array()?;

        Some(Self {
            payment_methods: saved
                .iter()
                .filter_map(PaymentMethod::decoded_object)
                .collect(),
            all_response_fields: response.clone(),
        })
    }
}
