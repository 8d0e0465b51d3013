//! Core types for the paysheet SDK.
//!
//! This crate provides the foundational types shared by the API client and the
//! bank-connection flow:
//!
//! - **Credentials**: `PaymentIntentClientSecret`, `SetupIntentClientSecret`, `PublishableKey`
//! - **Intent configuration**: `IntentConfiguration`, `Mode`, `CaptureMethod`, `SetupFutureUsage`
//! - **Intents**: `PaymentIntent`, `SetupIntent`, `Intent`, `IntentStatus`
//! - **Sessions**: `ElementsSession`, `LegacyElementsCustomer`
//! - **Payment methods**: `PaymentMethod`, `ExternalPaymentMethod`
//!
//! # Decoding
//!
//! Response models implement [`ApiResponseDecodable`]. Decoding never fails
//! loudly: a payload of the wrong shape yields `None`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod decode;
pub mod elements_session;
pub mod external_payment_method;
pub mod ids;
pub mod intent;
pub mod intent_config;
pub mod payment_method;

pub use decode::ApiResponseDecodable;
pub use elements_session::{ElementsSession, LegacyElementsCustomer};
pub use external_payment_method::ExternalPaymentMethod;
pub use ids::{IdError, PaymentIntentClientSecret, PublishableKey, SetupIntentClientSecret};
pub use intent::{Intent, IntentStatus, PaymentIntent, SetupIntent};
pub use intent_config::{CaptureMethod, IntentConfiguration, Mode, SetupFutureUsage};
pub use payment_method::{CardDetails, PaymentMethod};
