//! Payment method objects.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::decode::ApiResponseDecodable;

/// A saved or newly created payment method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Payment method ID (`pm_...`).
    pub id: String,
    /// Payment method type, e.g. `"card"`.
    #[serde(rename = "type")]
    pub payment_method_type: String,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: Option<i64>,
    /// Whether the object exists in live mode.
    #[serde(default)]
    pub livemode: bool,
    /// Customer the payment method is attached to.
    #[serde(default)]
    pub customer: Option<String>,
    /// Card details, for `card` payment methods.
    #[serde(default)]
    pub card: Option<CardDetails>,
    /// The raw response this object was decoded from.
    #[serde(skip)]
    pub all_response_fields: Value,
}

/// Card details of a card payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    /// Card brand, e.g. `"visa"`.
    pub brand: String,
    /// Last four digits.
    pub last4: String,
    /// Expiry month (1-12).
    #[serde(default)]
    pub exp_month: Option<u32>,
    /// Four-digit expiry year.
    #[serde(default)]
    pub exp_year: Option<u32>,
    /// Issuing country.
    #[serde(default)]
    pub country: Option<String>,
}

impl ApiResponseDecodable for PaymentMethod {
    fn decoded_object(response: &Value) -> Option<Self> {
        // Unexpanded references are plain id strings.
        if !response.is_object() {
            return None;
        }
        let mut payment_method = Self::deserialize(response).ok()?;
        payment_method.all_response_fields = response.clone();
        Some(payment_method)
    }
}

/// Deserialize an expandable `payment_method` field.
///
/// An id string or a malformed object yields `None`.
pub(crate) fn expanded_payment_method<'de, D>(deserializer: D) -> Result<Option<PaymentMethod>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(PaymentMethod::decoded_object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_card() {
        let response = json!({
            "id": "pm_123",
            "object": "payment_method",
            "type": "card",
            "created": 1_700_000_000,
            "livemode": false,
            "card": { "brand": "visa", "last4": "4242", "exp_month": 12, "exp_year": 2030 }
        });
        let pm = PaymentMethod::decoded_object(&response).unwrap();

        assert_eq!(pm.id, "pm_123");
        assert_eq!(pm.payment_method_type, "card");
        let card = pm.card.as_ref().unwrap();
        assert_eq!(card.last4, "4242");
        assert_eq!(card.exp_month, Some(12));
        assert_eq!(pm.all_response_fields["object"], "payment_method");
    }

    #[test]
    fn id_reference_is_none() {
        assert!(PaymentMethod::decoded_object(&json!("pm_123")).is_none());
    }

    #[test]
    fn missing_type_is_none() {
        assert!(PaymentMethod::decoded_object(&json!({ "id": "pm_123" })).is_none());
    }
}
