//! Stripe API client implementation.

use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

use paysheet_core::{ApiResponseDecodable, PublishableKey};

use crate::error::ClientError;
use crate::params::{encode_query, Parameters};
use crate::types::StripeErrorResponse;

/// Stripe API client authenticated with a publishable key.
///
/// Endpoint bindings live in their own modules as additional `impl` blocks;
/// this type only knows how to send a parameter bag and decode the response.
#[derive(Debug, Clone)]
pub struct StripeApiClient {
    client: Client,
    base_url: String,
    publishable_key: PublishableKey,
    locale: String,
    stripe_account: Option<String>,
}

impl StripeApiClient {
    /// Create a new client with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(publishable_key: impl Into<PublishableKey>) -> Result<Self, ClientError> {
        Self::with_options(publishable_key, ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be built.
    pub fn with_options(
        publishable_key: impl Into<PublishableKey>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let base_url = options.api_base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("API base URL is empty".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url,
            publishable_key: publishable_key.into(),
            locale: options.locale,
            stripe_account: options.stripe_account,
        })
    }

    /// The publishable key requests are authenticated with.
    #[must_use]
    pub fn publishable_key(&self) -> &PublishableKey {
        &self.publishable_key
    }

    /// BCP 47 language tag sent as the `locale` parameter.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Base URL all endpoints are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a GET request with `params` as the query string.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server returns an error, or
    /// the response cannot be decoded into `T`.
    pub async fn get<T: ApiResponseDecodable>(
        &self,
        endpoint: &str,
        params: &Parameters,
    ) -> Result<T, ClientError> {
        let request = self
            .request(Method::GET, endpoint)
            .query(&encode_query(params));
        self.send(endpoint, request).await
    }

    /// Send a POST request with `params` as a form body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server returns an error, or
    /// the response cannot be decoded into `T`.
    pub async fn post<T: ApiResponseDecodable>(
        &self,
        endpoint: &str,
        params: &Parameters,
    ) -> Result<T, ClientError> {
        let request = self
            .request(Method::POST, endpoint)
            .form(&encode_query(params));
        self.send(endpoint, request).await
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        tracing::debug!(method = %method, endpoint = %endpoint, "Sending Stripe API request");

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(self.publishable_key.as_str());
        if let Some(account) = &self.stripe_account {
            request = request.header("Stripe-Account", account);
        }
        request
    }

    async fn send<T: ApiResponseDecodable>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let body = self.handle_response(endpoint, response).await?;

        T::decoded_object(&body).ok_or_else(|| decoding_error(endpoint))
    }

    /// Handle API response and convert errors.
    async fn handle_response(
        &self,
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<Value, ClientError> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            return serde_json::from_slice(&body).map_err(|_| decoding_error(endpoint));
        }

        // Try to parse error response
        let error_body: Result<StripeErrorResponse, _> = response.json().await;

        let error = match error_body {
            Ok(stripe_error) => ClientError::Api {
                error_type: stripe_error.error.error_type,
                message: stripe_error.error.message,
                code: stripe_error.error.code,
                param: stripe_error.error.param,
                status: status.as_u16(),
            },
            Err(_) => ClientError::Api {
                error_type: "unknown".to_string(),
                message: format!("HTTP {status}"),
                code: None,
                param: None,
                status: status.as_u16(),
            },
        };
        tracing::warn!(status = %status, error = %error, "Stripe API request failed");
        Err(error)
    }
}

fn decoding_error(endpoint: &str) -> ClientError {
    tracing::warn!(endpoint = %endpoint, "Stripe API response could not be decoded");
    ClientError::Decoding {
        endpoint: endpoint.to_string(),
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// BCP 47 language tag sent with requests (default: `en-US`).
    pub locale: String,
    /// API base URL (default: `https://api.stripe.com/v1`).
    pub api_base_url: String,
    /// Connected account to act as, sent in the `Stripe-Account` header.
    pub stripe_account: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            locale: DEFAULT_LOCALE.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            stripe_account: None,
        }
    }
}

/// Stripe API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com/v1";

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en-US";

impl ClientOptions {
    /// Load options from environment variables.
    ///
    /// Reads `STRIPE_API_BASE`, `STRIPE_ACCOUNT`, `STRIPE_TIMEOUT_SECONDS` and
    /// derives the locale from `LC_ALL` or `LANG`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout_seconds: std::env::var("STRIPE_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_seconds),
            locale: std::env::var("LC_ALL")
                .ok()
                .and_then(|value| posix_locale_to_language_tag(&value))
                .or_else(|| {
                    std::env::var("LANG")
                        .ok()
                        .and_then(|value| posix_locale_to_language_tag(&value))
                })
                .unwrap_or(defaults.locale),
            api_base_url: std::env::var("STRIPE_API_BASE").unwrap_or(defaults.api_base_url),
            stripe_account: std::env::var("STRIPE_ACCOUNT").ok(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Set the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the API base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Act on behalf of a connected account.
    #[must_use]
    pub fn with_stripe_account(mut self, account: impl Into<String>) -> Self {
        self.stripe_account = Some(account.into());
        self
    }
}

/// Convert a POSIX locale such as `en_US.UTF-8` into `en-US`.
///
/// Returns `None` for `C`, `POSIX` and empty values.
fn posix_locale_to_language_tag(value: &str) -> Option<String> {
    let name = value.split(['.', '@']).next().unwrap_or_default();
    if name.is_empty() || name == "C" || name == "POSIX" {
        return None;
    }
    Some(name.replace('_', "-"))
}
