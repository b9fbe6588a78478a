//! Settings for applications embedding the whisker-rs engine.
//!
//! The engine itself takes no global configuration; this module exists for
//! embedding applications that want a serde-deserializable [`Settings`]
//! struct with sensible defaults, loadable from TOML, and consumable by
//! [`setup_logging`](crate::logging::setup_logging).

use serde::{Deserialize, Serialize};

/// Configuration for an application embedding the engine.
///
/// # Examples
///
/// ```
/// use whisker_rs_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(!settings.debug);
/// assert_eq!(settings.log_level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode is enabled. Controls the logging output format.
    pub debug: bool,
    /// The log level filter (e.g. "debug", "info", "warn", "error").
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Parses settings from a TOML string. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the underlying `toml` error if the input is not valid TOML.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_settings_from_toml() {
        let settings = Settings::from_toml("debug = true\nlog_level = \"trace\"\n").unwrap();
        assert!(settings.debug);
        assert_eq!(settings.log_level, "trace");
    }

    #[test]
    fn test_settings_from_toml_partial() {
        let settings = Settings::from_toml("debug = true\n").unwrap();
        assert!(settings.debug);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_settings_from_toml_invalid() {
        assert!(Settings::from_toml("debug = ???").is_err());
    }
}
