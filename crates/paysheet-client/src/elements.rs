//! `elements/sessions` bindings.
//!
//! All four calls hit the same endpoint and differ only in the `type`
//! discriminator and the intent-specific parameters.

use paysheet_core::{
    ElementsSession, IntentConfiguration, PaymentIntent, PaymentIntentClientSecret, SetupIntent,
    SetupIntentClientSecret,
};

use crate::client::StripeApiClient;
use crate::error::ClientError;
use crate::params::{
    customer_sheet_parameters, elements_session_parameters, insert_optional,
    payment_intent_parameters, setup_intent_parameters, Parameters, ELEMENTS_SESSIONS_ENDPOINT,
};

impl StripeApiClient {
    /// Retrieve a `PaymentIntent` together with the server's payment method preferences.
    ///
    /// # Arguments
    ///
    /// * `client_secret` - The intent's client secret (`pi_..._secret_...`)
    /// * `customer_ephemeral_key` - Optional ephemeral key to load saved payment methods
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidClientSecret`] without sending a request if
    /// the secret is malformed or the client uses a user key.
    pub async fn retrieve_payment_intent_with_preferences(
        &self,
        client_secret: &str,
        customer_ephemeral_key: Option<&str>,
    ) -> Result<PaymentIntent, ClientError> {
        let secret: PaymentIntentClientSecret = self.checked_client_secret(client_secret)?;
        let mut params = payment_intent_parameters(&secret, self.locale());
        add_ephemeral_key(&mut params, customer_ephemeral_key);

        tracing::debug!(intent = %secret.intent_id(), "Retrieving payment intent with preferences");
        self.get(ELEMENTS_SESSIONS_ENDPOINT, &params).await
    }

    /// Retrieve a `SetupIntent` together with the server's payment method preferences.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidClientSecret`] without sending a request if
    /// the secret is malformed or the client uses a user key.
    pub async fn retrieve_setup_intent_with_preferences(
        &self,
        client_secret: &str,
        customer_ephemeral_key: Option<&str>,
    ) -> Result<SetupIntent, ClientError> {
        let secret: SetupIntentClientSecret = self.checked_client_secret(client_secret)?;
        let mut params = setup_intent_parameters(&secret, self.locale());
        add_ephemeral_key(&mut params, customer_ephemeral_key);

        tracing::debug!(intent = %secret.intent_id(), "Retrieving setup intent with preferences");
        self.get(ELEMENTS_SESSIONS_ENDPOINT, &params).await
    }

    /// Retrieve an elements session for an intent that has not been created yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn retrieve_elements_session(
        &self,
        intent_config: &IntentConfiguration,
        customer_ephemeral_key: Option<&str>,
    ) -> Result<ElementsSession, ClientError> {
        let mut params =
            elements_session_parameters(intent_config, Some(self.publishable_key()), self.locale());
        add_ephemeral_key(&mut params, customer_ephemeral_key);

        tracing::debug!(mode = %intent_config.mode.as_str(), "Retrieving deferred elements session");
        self.get(ELEMENTS_SESSIONS_ENDPOINT, &params).await
    }

    /// Retrieve the elements session backing the customer sheet.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn retrieve_elements_session_for_customer_sheet(
        &self,
        customer_ephemeral_key: Option<&str>,
    ) -> Result<ElementsSession, ClientError> {
        let mut params = customer_sheet_parameters(self.locale());
        add_ephemeral_key(&mut params, customer_ephemeral_key);

        self.get(ELEMENTS_SESSIONS_ENDPOINT, &params).await
    }

    /// Parse a client secret, rejecting it outright for user keys.
    fn checked_client_secret<S>(&self, client_secret: &str) -> Result<S, ClientError>
    where
        S: std::str::FromStr,
    {
        if self.publishable_key().is_user_key() {
            return Err(ClientError::InvalidClientSecret);
        }
        client_secret
            .parse()
            .map_err(|_| ClientError::InvalidClientSecret)
    }
}

fn add_ephemeral_key(params: &mut Parameters, customer_ephemeral_key: Option<&str>) {
    insert_optional(params, "legacy_customer_ephemeral_key", customer_ephemeral_key);
}
