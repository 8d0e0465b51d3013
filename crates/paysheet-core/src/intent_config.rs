//! Deferred intent configuration.
//!
//! An [`IntentConfiguration`] describes the intent a merchant will create
//! later, so that an elements session can be computed before any intent exists.

use serde::{Deserialize, Serialize};

/// Controls when funds are captured from the customer's account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMethod {
    /// Capture immediately on authorization.
    #[default]
    Automatic,
    /// Capture asynchronously after authorization.
    AutomaticAsync,
    /// Authorize now, capture later.
    Manual,
}

impl CaptureMethod {
    /// Wire value for request parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Automatic => "automatic",
            Self::AutomaticAsync => "automatic_async",
            Self::Manual => "manual",
        }
    }
}

/// Indicates how a payment method will be reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupFutureUsage {
    /// Reused while the customer is not present.
    #[default]
    OffSession,
    /// Reused only while the customer is present in the checkout flow.
    OnSession,
}

impl SetupFutureUsage {
    /// Wire value for request parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OffSession => "off_session",
            Self::OnSession => "on_session",
        }
    }
}

/// The kind of intent that will be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// A payment for a fixed amount.
    Payment {
        /// Amount in the smallest currency unit.
        amount: i64,
        /// Three-letter ISO currency code.
        currency: String,
        /// Set when the payment method should be saved for later use.
        setup_future_usage: Option<SetupFutureUsage>,
        /// When funds are captured.
        capture_method: CaptureMethod,
    },
    /// Saving a payment method without charging it.
    Setup {
        /// Optional currency, used to filter payment methods.
        currency: Option<String>,
        /// How the saved payment method will be used.
        setup_future_usage: SetupFutureUsage,
    },
}

impl Mode {
    /// Wire name of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Payment { .. } => "payment",
            Self::Setup { .. } => "setup",
        }
    }
}

/// Configuration of a deferred intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentConfiguration {
    /// Payment or setup mode with its mode-specific fields.
    pub mode: Mode,
    /// Allowlist of payment method types. `None` lets the server decide.
    pub payment_method_types: Option<Vec<String>>,
    /// Connected account the intent is created on behalf of.
    pub on_behalf_of: Option<String>,
}

impl IntentConfiguration {
    /// Create a configuration from a mode.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            payment_method_types: None,
            on_behalf_of: None,
        }
    }

    /// Payment mode with automatic capture and no future usage.
    #[must_use]
    pub fn payment(amount: i64, currency: impl Into<String>) -> Self {
        Self::new(Mode::Payment {
            amount,
            currency: currency.into(),
            setup_future_usage: None,
            capture_method: CaptureMethod::default(),
        })
    }

    /// Setup mode with `off_session` usage.
    #[must_use]
    pub fn setup(currency: Option<String>) -> Self {
        Self::new(Mode::Setup {
            currency,
            setup_future_usage: SetupFutureUsage::default(),
        })
    }

    /// Set the payment method type allowlist.
    #[must_use]
    pub fn with_payment_method_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.payment_method_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Set the connected account.
    #[must_use]
    pub fn with_on_behalf_of(mut self, account: impl Into<String>) -> Self {
        self.on_behalf_of = Some(account.into());
        self
    }

    /// Set the capture method. Ignored in setup mode.
    #[must_use]
    pub fn with_capture_method(mut self, method: CaptureMethod) -> Self {
        if let Mode::Payment { capture_method, .. } = &mut self.mode {
            *capture_method = method;
        }
        self
    }

    /// Set the future usage of the payment method.
    #[must_use]
    pub fn with_setup_future_usage(mut self, usage: SetupFutureUsage) -> Self {
        match &mut self.mode {
            Mode::Payment {
                setup_future_usage, ..
            } => *setup_future_usage = Some(usage),
            Mode::Setup {
                setup_future_usage, ..
            } => *setup_future_usage = usage,
        }
        self
    }
}
