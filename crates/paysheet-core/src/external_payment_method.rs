//! External payment methods (EPMs).
//!
//! Display information for payment methods that the merchant processes
//! outside of Stripe, returned by `elements/sessions`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Display information for one external payment method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalPaymentMethod {
    /// The type of the external payment method, e.g. `"external_foopay"`.
    ///
    /// Matches the type strings the merchant configured.
    #[serde(rename = "type")]
    pub payment_method_type: String,
    /// Localized label, e.g. `"FooPay"`.
    pub localized_label: String,
    /// 48px tall PNG suitable for a light background.
    pub light_image_url: Url,
    /// 48px tall PNG suitable for a dark background.
    #[serde(default)]
    pub dark_image_url: Option<Url>,
}

impl ExternalPaymentMethod {
    /// Image to display for the given appearance.
    ///
    /// Dark mode falls back to the light image when no dark image exists.
    #[must_use]
    pub fn image_url(&self, dark: bool) -> &Url {
        if dark {
            self.dark_image_url.as_ref().unwrap_or(&self.light_image_url)
        } else {
            &self.light_image_url
        }
    }

    /// Decode the `external_payment_methods_data` value of an elements session.
    ///
    /// Returns `None` when the value is absent, is not an array, or when any
    /// element fails to decode. There are no partial results.
    #[must_use]
    pub fn decoded(response: Option<&Value>) -> Option<Vec<Self>> {
        response?
            .as_array()?
            .iter()
            .map(|item| Self::deserialize(item).ok())
            .collect()
    }
}
