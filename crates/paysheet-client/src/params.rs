//! Request parameter builders.
//!
//! Parameters are built as a nested JSON map and flattened into Stripe's
//! bracket notation (`deferred_intent[mode]`, `expand[0]`) by [`encode_query`]
//! right before sending. `null` values are never sent.

use serde_json::{Map, Value};

use paysheet_core::{
    IntentConfiguration, Mode, PaymentIntentClientSecret, PublishableKey, SetupIntentClientSecret,
};

/// A string-keyed parameter bag.
pub type Parameters = Map<String, Value>;

/// Endpoint serving payment method preferences and elements sessions.
pub const ELEMENTS_SESSIONS_ENDPOINT: &str = "elements/sessions";

/// Which intent an `elements/sessions` request resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionType {
    /// An existing `PaymentIntent`.
    PaymentIntent,
    /// An existing `SetupIntent`.
    SetupIntent,
    /// An intent that has not been created yet.
    DeferredIntent,
}

impl SessionType {
    /// Wire value of the `type` parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PaymentIntent => "payment_intent",
            Self::SetupIntent => "setup_intent",
            Self::DeferredIntent => "deferred_intent",
        }
    }
}

/// Insert `value` under `key` if present.
pub fn insert_optional<V: Into<Value>>(params: &mut Parameters, key: &str, value: Option<V>) {
    if let Some(value) = value {
        params.insert(key.to_string(), value.into());
    }
}

fn intent_parameters(session_type: SessionType, client_secret: &str, locale: &str) -> Parameters {
    let mut params = Parameters::new();
    params.insert("client_secret".into(), client_secret.into());
    params.insert("type".into(), session_type.as_str().into());
    params.insert(
        "expand".into(),
        Value::Array(vec![format!(
            "payment_method_preference.{}.payment_method",
            session_type.as_str()
        )
        .into()]),
    );
    params.insert("locale".into(), locale.into());
    params
}

/// Parameters to retrieve a `PaymentIntent` with payment method preferences.
#[must_use]
pub fn payment_intent_parameters(secret: &PaymentIntentClientSecret, locale: &str) -> Parameters {
    intent_parameters(SessionType::PaymentIntent, secret.as_str(), locale)
}

/// Parameters to retrieve a `SetupIntent` with payment method preferences.
#[must_use]
pub fn setup_intent_parameters(secret: &SetupIntentClientSecret, locale: &str) -> Parameters {
    intent_parameters(SessionType::SetupIntent, secret.as_str(), locale)
}

/// Parameters to retrieve an elements session for a deferred intent.
#[must_use]
pub fn elements_session_parameters(
    config: &IntentConfiguration,
    publishable_key: Option<&PublishableKey>,
    locale: &str,
) -> Parameters {
    let mut params = Parameters::new();
    insert_optional(&mut params, "key", publishable_key.map(PublishableKey::as_str));
    params.insert("type".into(), SessionType::DeferredIntent.as_str().into());
    params.insert("locale".into(), locale.into());

    let mut deferred_intent = Parameters::new();
    insert_optional(
        &mut deferred_intent,
        "payment_method_types",
        config.payment_method_types.clone(),
    );
    insert_optional(&mut deferred_intent, "on_behalf_of", config.on_behalf_of.as_deref());
    deferred_intent.insert("mode".into(), config.mode.as_str().into());

    match &config.mode {
        Mode::Payment {
            amount,
            currency,
            setup_future_usage,
            capture_method,
        } => {
            deferred_intent.insert("amount".into(), (*amount).into());
            deferred_intent.insert("currency".into(), currency.as_str().into());
            insert_optional(
                &mut deferred_intent,
                "setup_future_usage",
                setup_future_usage.map(|usage| usage.as_str()),
            );
            deferred_intent.insert("capture_method".into(), capture_method.as_str().into());
        }
        Mode::Setup {
            currency,
            setup_future_usage,
        } => {
            insert_optional(&mut deferred_intent, "currency", currency.as_deref());
            deferred_intent.insert(
                "setup_future_usage".into(),
                setup_future_usage.as_str().into(),
            );
        }
    }

    params.insert("deferred_intent".into(), Value::Object(deferred_intent));
    params
}

/// Parameters to retrieve the elements session used by the customer sheet.
#[must_use]
pub fn customer_sheet_parameters(locale: &str) -> Parameters {
    let mut params = Parameters::new();
    params.insert("type".into(), SessionType::DeferredIntent.as_str().into());
    params.insert("locale".into(), locale.into());

    let mut deferred_intent = Parameters::new();
    deferred_intent.insert("mode".into(), "setup".into());
    params.insert("deferred_intent".into(), Value::Object(deferred_intent));
    params
}

/// Flatten a parameter bag into `(key, value)` pairs in bracket notation.
///
/// Nested maps become `outer[inner]`, arrays become `key[0]`, `key[1]`.
/// `null` values are dropped.
#[must_use]
pub fn encode_query(params: &Parameters) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        flatten_into(&mut pairs, key.clone(), value);
    }
    pairs
}

fn flatten_into(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => pairs.push((key, flag.to_string())),
        Value::Number(number) => pairs.push((key, number.to_string())),
        Value::String(text) => pairs.push((key, text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(pairs, format!("{key}[{index}]"), item);
            }
        }
        Value::Object(map) => {
            for (inner, item) in map {
                flatten_into(pairs, format!("{key}[{inner}]"), item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paysheet_core::{CaptureMethod, SetupFutureUsage};
    use serde_json::json;

    fn pairs_contain(pairs: &[(String, String)], key: &str, value: &str) -> bool {
        pairs.iter().any(|(k, v)| k == key && v == value)
    }

    #[test]
    fn payment_mode_parameters() {
        let config = IntentConfiguration::payment(1099, "usd")
            .with_setup_future_usage(SetupFutureUsage::OnSession)
            .with_capture_method(CaptureMethod::Manual)
            .with_payment_method_types(["card", "cashapp"])
            .with_on_behalf_of("acct_connected");
        let key = PublishableKey::new("pk_test_123");

        let params = elements_session_parameters(&config, Some(&key), "en-US");

        assert_eq!(
            Value::Object(params),
            json!({
                "key": "pk_test_123",
                "type": "deferred_intent",
                "locale": "en-US",
                "deferred_intent": {
                    "payment_method_types": ["card", "cashapp"],
                    "on_behalf_of": "acct_connected",
                    "mode": "payment",
                    "amount": 1099,
                    "currency": "usd",
                    "setup_future_usage": "on_session",
                    "capture_method": "manual"
                }
            })
        );
    }

    #[test]
    fn payment_mode_omits_absent_values() {
        let config = IntentConfiguration::payment(500, "eur");
        let params = elements_session_parameters(&config, None, "fr-FR");

        assert!(!params.contains_key("key"));
        let deferred = params["deferred_intent"].as_object().unwrap();
        assert!(!deferred.contains_key("setup_future_usage"));
        assert!(!deferred.contains_key("payment_method_types"));
        assert!(!deferred.contains_key("on_behalf_of"));
        assert_eq!(deferred["capture_method"], "automatic");
    }

    #[test]
    fn setup_mode_parameters() {
        let config = IntentConfiguration::setup(Some("usd".into()));
        let params = elements_session_parameters(&config, None, "en-US");

        assert_eq!(
            params["deferred_intent"],
            json!({
                "mode": "setup",
                "currency": "usd",
                "setup_future_usage": "off_session"
            })
        );
    }

    #[test]
    fn setup_mode_without_currency() {
        let config = IntentConfiguration::setup(None);
        let params = elements_session_parameters(&config, None, "en-US");
        let deferred = params["deferred_intent"].as_object().unwrap();

        assert!(!deferred.contains_key("currency"));
        assert!(!deferred.contains_key("amount"));
        assert!(!deferred.contains_key("capture_method"));
    }

    #[test]
    fn intent_parameters_expand_payment_method() {
        let secret: PaymentIntentClientSecret = "pi_1_secret_2".parse().unwrap();
        let params = payment_intent_parameters(&secret, "de-DE");

        assert_eq!(
            Value::Object(params),
            json!({
                "client_secret": "pi_1_secret_2",
                "type": "payment_intent",
                "expand": ["payment_method_preference.payment_intent.payment_method"],
                "locale": "de-DE"
            })
        );

        let secret: SetupIntentClientSecret = "seti_1_secret_2".parse().unwrap();
        let params = setup_intent_parameters(&secret, "de-DE");
        assert_eq!(params["type"], "setup_intent");
        assert_eq!(
            params["expand"],
            json!(["payment_method_preference.setup_intent.payment_method"])
        );
    }

    #[test]
    fn customer_sheet_is_deferred_setup() {
        let params = customer_sheet_parameters("en-GB");
        assert_eq!(
            Value::Object(params),
            json!({
                "type": "deferred_intent",
                "locale": "en-GB",
                "deferred_intent": { "mode": "setup" }
            })
        );
    }

    #[test]
    fn encode_query_flattens_brackets() {
        let config = IntentConfiguration::payment(1099, "usd").with_payment_method_types(["card", "link"]);
        let params = elements_session_parameters(&config, None, "en-US");
        let pairs = encode_query(&params);

        assert!(pairs_contain(&pairs, "type", "deferred_intent"));
        assert!(pairs_contain(&pairs, "deferred_intent[mode]", "payment"));
        assert!(pairs_contain(&pairs, "deferred_intent[amount]", "1099"));
        assert!(pairs_contain(&pairs, "deferred_intent[payment_method_types][0]", "card"));
        assert!(pairs_contain(&pairs, "deferred_intent[payment_method_types][1]", "link"));
    }

    #[test]
    fn encode_query_drops_null_and_renders_bools() {
        let mut params = Parameters::new();
        params.insert("gone".into(), Value::Null);
        params.insert("mobile".into(), json!({ "fullscreen": true }));

        assert_eq!(
            encode_query(&params),
            vec![("mobile[fullscreen]".to_string(), "true".to_string())]
        );
    }

    #[test]
    fn insert_optional_skips_none() {
        let mut params = Parameters::new();
        insert_optional(&mut params, "a", None::<&str>);
        insert_optional(&mut params, "b", Some("x"));
        assert_eq!(Value::Object(params), json!({ "b": "x" }));
    }
}
