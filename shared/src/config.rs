//! Widget configuration.
//!
//! Every field has a default matching the production page, so hosts only
//! override what differs. Keys are camelCase to sit naturally in page JSON.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://eci.ec.europa.eu/045/public/api/report/progression";
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Could not load progress data.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Progression endpoint, fetched with a plain GET
    pub endpoint: String,
    pub poll_interval_ms: u32,
    /// Delay between inserting zeroed wheels and spinning them to target
    pub rebuild_delay_ms: u32,
    pub resize_debounce_ms: u32,
    /// Height of one glyph on a wheel, in rem
    pub digit_height: f64,
    /// Glyph height used while the narrow viewport query matches
    pub narrow_digit_height: f64,
    pub narrow_viewport_query: String,
    /// CSS transition applied to wheels when they animate
    pub transition: String,
    pub group_separator: char,
    pub fallback_message: String,
    /// Replaces the counter on failure when set
    pub counter_error_text: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval_ms: 5000,
            rebuild_delay_ms: 100,
            resize_debounce_ms: 250,
            digit_height: 9.0,
            narrow_digit_height: 6.0,
            narrow_viewport_query: "(max-width: 600px)".to_string(),
            transition: "transform 0.8s cubic-bezier(0.65, 0, 0.35, 1)".to_string(),
            group_separator: ',',
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            counter_error_text: None,
        }
    }
}

impl WidgetConfig {
    /// Parse a JSON override block and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WidgetConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        for height in [self.digit_height, self.narrow_digit_height] {
            if !(height.is_finite() && height > 0.0) {
                return Err(ConfigError::InvalidDigitHeight(height));
            }
        }
        // A digit separator would be rendered as an extra wheel
        if self.group_separator.is_ascii_digit() {
            return Err(ConfigError::InvalidSeparator(self.group_separator));
        }
        Ok(())
    }

    /// Glyph height for the current viewport.
    pub fn digit_height_for(&self, narrow: bool) -> f64 {
        if narrow {
            self.narrow_digit_height
        } else {
            self.digit_height
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = WidgetConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.poll_interval_ms, 5000);
        assert_eq!(config.rebuild_delay_ms, 100);
        assert_eq!(config.resize_debounce_ms, 250);
        assert_eq!(config.digit_height, 9.0);
        assert_eq!(config.group_separator, ',');
        assert_eq!(config.fallback_message, "Could not load progress data.");
        assert_eq!(config.counter_error_text, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_override() {
        let config = WidgetConfig::from_json(
            r#"{"pollIntervalMs": 10000, "counterErrorText": "Error"}"#,
        )
        .unwrap();
        assert_eq!(config.poll_interval_ms, 10000);
        assert_eq!(config.counter_error_text.as_deref(), Some("Error"));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        assert!(matches!(
            WidgetConfig::from_json(r#"{"endpoint": "  "}"#),
            Err(ConfigError::EmptyEndpoint)
        ));
        assert!(matches!(
            WidgetConfig::from_json(r#"{"pollIntervalMs": 0}"#),
            Err(ConfigError::ZeroPollInterval)
        ));
        assert!(matches!(
            WidgetConfig::from_json(r#"{"narrowDigitHeight": -1.0}"#),
            Err(ConfigError::InvalidDigitHeight(_))
        ));
        assert!(matches!(
            WidgetConfig::from_json(r#"{"groupSeparator": "5"}"#),
            Err(ConfigError::InvalidSeparator('5'))
        ));
        assert!(matches!(WidgetConfig::from_json("[1, 2]"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_non_digit_separators_keep_wheel_count() {
        for separator in ['.', ' ', '\'', '\u{202F}'] {
            let json = serde_json::json!({ "groupSeparator": separator }).to_string();
            let config = WidgetConfig::from_json(&json).unwrap();

            let formatted = crate::format_grouped(1_234_567, config.group_separator);
            let slots = crate::slots_for(&formatted);
            assert_eq!(crate::digit_count(&slots), 7, "separator {:?}", separator);
        }
    }

    #[test]
    fn test_digit_height_for() {
        let config = WidgetConfig::default();
        assert_eq!(config.digit_height_for(false), 9.0);
        assert_eq!(config.digit_height_for(true), 6.0);
    }
}
