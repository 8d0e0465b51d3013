//! Runtime configuration.

/// Environment variable selecting the runtime environment.
pub const RUNTIME_ENV_VAR: &str = "PAYSHEET_RUNTIME";

/// Where the SDK is running.
///
/// Simulators and test runs do not report auth session events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    /// A real device or production host.
    #[default]
    Device,
    /// A simulator or emulator.
    Simulator,
    /// An automated test run.
    Test,
}

impl RuntimeEnvironment {
    /// Read the environment from `PAYSHEET_RUNTIME` (`device`, `simulator`, `test`).
    ///
    /// Unset or unrecognised values mean [`RuntimeEnvironment::Device`].
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(RUNTIME_ENV_VAR)
            .ok()
            .and_then(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// Detect the environment, treating this crate's own unit tests as a test run.
    #[must_use]
    pub fn detect() -> Self {
        if cfg!(test) {
            Self::Test
        } else {
            Self::from_env()
        }
    }

    /// Parse a case-insensitive environment name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "device" | "production" => Some(Self::Device),
            "simulator" | "emulator" => Some(Self::Simulator),
            "test" => Some(Self::Test),
            _ => None,
        }
    }

    /// Whether auth session lifecycle events may be sent.
    #[must_use]
    pub const fn allows_auth_session_events(self) -> bool {
        matches!(self, Self::Device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!(RuntimeEnvironment::parse("Simulator"), Some(RuntimeEnvironment::Simulator));
        assert_eq!(RuntimeEnvironment::parse(" test "), Some(RuntimeEnvironment::Test));
        assert_eq!(RuntimeEnvironment::parse("production"), Some(RuntimeEnvironment::Device));
        assert_eq!(RuntimeEnvironment::parse("staging"), None);
    }

    #[test]
    fn only_devices_record_events() {
        assert!(RuntimeEnvironment::Device.allows_auth_session_events());
        assert!(!RuntimeEnvironment::Simulator.allows_auth_session_events());
        assert!(!RuntimeEnvironment::Test.allows_auth_session_events());
    }

    #[test]
    fn detect_in_unit_tests() {
        assert_eq!(RuntimeEnvironment::detect(), RuntimeEnvironment::Test);
    }
}
