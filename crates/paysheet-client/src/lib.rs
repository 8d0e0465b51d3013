//! Typed client bindings over the Stripe API.
//!
//! This crate retrieves payment intents, setup intents and elements sessions
//! from `elements/sessions`, authenticated with a publishable key.
//!
//! # Example
//!
//! ```no_run
//! use paysheet_client::{ClientOptions, StripeApiClient};
//! use paysheet_core::IntentConfiguration;
//!
//! # async fn example() -> Result<(), paysheet_client::ClientError> {
//! let client = StripeApiClient::with_options("pk_test_123", ClientOptions::from_env())?;
//!
//! let config = IntentConfiguration::payment(1099, "usd").with_payment_method_types(["card"]);
//! let session = client.retrieve_elements_session(&config, None).await?;
//!
//! println!("Ordered methods: {:?}", session.ordered_payment_method_types);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod elements;
mod error;
pub mod params;
mod types;

pub use client::{ClientOptions, StripeApiClient, DEFAULT_API_BASE_URL, DEFAULT_LOCALE};
pub use error::ClientError;
pub use params::{encode_query, Parameters, SessionType};
pub use types::*;
