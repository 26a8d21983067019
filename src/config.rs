use crate::logging::LogLevel;

pub const DEFAULT_HEADER_THRESHOLD: f64 = 100.0;
pub const DEFAULT_BACK_TO_TOP_THRESHOLD: f64 = 500.0;
pub const DEFAULT_HIGHLIGHT_LOOKAHEAD: f64 = 150.0;
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
pub const DEFAULT_FEEDBACK_MS: u32 = 2_000;
pub const DEFAULT_TOAST_SHOW_DELAY_MS: u32 = 10;
pub const DEFAULT_PARTICLE_COUNT: usize = 30;
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
pub const DEFAULT_TOAST_MESSAGE: &str = "¡Copiado al portapapeles!";

const HEADER_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const BACK_TO_TOP_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const HIGHLIGHT_LOOKAHEAD_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const REVEAL_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
const FEEDBACK_MS_BOUNDS: (u32, u32) = (100, 10_000);
const TOAST_SHOW_DELAY_MS_BOUNDS: (u32, u32) = (0, 1_000);
const PARTICLE_COUNT_BOUNDS: (usize, usize) = (0, 200);

/// Runtime knobs for the landing page, read from `data-*` attributes on the
/// mount element. Anything missing or out of bounds keeps its default.
#[derive(Clone, Debug, PartialEq)]
pub struct LandingConfig {
    pub header_threshold: f64,
    pub back_to_top_threshold: f64,
    pub highlight_lookahead: f64,
    pub reveal_threshold: f64,
    pub feedback_ms: u32,
    pub toast_show_delay_ms: u32,
    pub particle_count: usize,
    pub log_level: LogLevel,
    pub toast_message: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            header_threshold: DEFAULT_HEADER_THRESHOLD,
            back_to_top_threshold: DEFAULT_BACK_TO_TOP_THRESHOLD,
            highlight_lookahead: DEFAULT_HIGHLIGHT_LOOKAHEAD,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            feedback_ms: DEFAULT_FEEDBACK_MS,
            toast_show_delay_ms: DEFAULT_TOAST_SHOW_DELAY_MS,
            particle_count: DEFAULT_PARTICLE_COUNT,
            log_level: DEFAULT_LOG_LEVEL,
            toast_message: DEFAULT_TOAST_MESSAGE.to_string(),
        }
    }
}

impl LandingConfig {
    /// Builds the config from an attribute lookup. `lookup` receives the
    /// attribute name (`data-header-threshold`, ...) and returns its raw value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let header_threshold = parse_attr_f64_with_bounds(
            &lookup,
            "data-header-threshold",
            DEFAULT_HEADER_THRESHOLD,
            HEADER_THRESHOLD_BOUNDS,
        );
        let back_to_top_threshold = parse_attr_f64_with_bounds(
            &lookup,
            "data-back-to-top-threshold",
            DEFAULT_BACK_TO_TOP_THRESHOLD,
            BACK_TO_TOP_THRESHOLD_BOUNDS,
        );
        let highlight_lookahead = parse_attr_f64_with_bounds(
            &lookup,
            "data-highlight-lookahead",
            DEFAULT_HIGHLIGHT_LOOKAHEAD,
            HIGHLIGHT_LOOKAHEAD_BOUNDS,
        );
        let reveal_threshold = parse_attr_f64_with_bounds(
            &lookup,
            "data-reveal-threshold",
            DEFAULT_REVEAL_THRESHOLD,
            REVEAL_THRESHOLD_BOUNDS,
        );
        let feedback_ms =
            parse_attr_u32_with_bounds(&lookup, "data-feedback-ms", DEFAULT_FEEDBACK_MS, FEEDBACK_MS_BOUNDS);
        let toast_show_delay_ms = parse_attr_u32_with_bounds(
            &lookup,
            "data-toast-show-delay-ms",
            DEFAULT_TOAST_SHOW_DELAY_MS,
            TOAST_SHOW_DELAY_MS_BOUNDS,
        );
        let particle_count = parse_attr_usize_with_bounds(
            &lookup,
            "data-particle-count",
            DEFAULT_PARTICLE_COUNT,
            PARTICLE_COUNT_BOUNDS,
        );
        let log_level = parse_non_empty(&lookup, "data-log-level")
            .and_then(|value| value.parse::<LogLevel>().ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);
        let toast_message = parse_non_empty(&lookup, "data-toast-message")
            .unwrap_or_else(|| DEFAULT_TOAST_MESSAGE.to_string());

        Self {
            header_threshold,
            back_to_top_threshold,
            highlight_lookahead,
            reveal_threshold,
            feedback_ms,
            toast_show_delay_ms,
            particle_count,
            log_level,
            toast_message,
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_element(element: &web_sys::Element) -> Self {
        Self::from_lookup(|name| element.get_attribute(name))
    }
}

fn parse_non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_attr_f64_with_bounds<F>(lookup: &F, name: &str, default: f64, bounds: (f64, f64)) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    parse_non_empty(lookup, name)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_attr_u32_with_bounds<F>(lookup: &F, name: &str, default: u32, bounds: (u32, u32)) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    parse_non_empty(lookup, name)
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_attr_usize_with_bounds<F>(lookup: &F, name: &str, default: usize, bounds: (usize, usize)) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    parse_non_empty(lookup, name)
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> LandingConfig {
        let attributes: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        LandingConfig::from_lookup(|name| attributes.get(name).cloned())
    }

    #[test]
    fn missing_attributes_use_defaults() {
        assert_eq!(config_from(&[]), LandingConfig::default());
    }

    #[test]
    fn in_bounds_values_are_applied() {
        let config = config_from(&[
            ("data-header-threshold", "64"),
            ("data-back-to-top-threshold", " 800 "),
            ("data-reveal-threshold", "0.25"),
            ("data-particle-count", "12"),
            ("data-log-level", "DEBUG"),
            ("data-toast-message", "Copied!"),
        ]);

        assert_eq!(config.header_threshold, 64.0);
        assert_eq!(config.back_to_top_threshold, 800.0);
        assert_eq!(config.reveal_threshold, 0.25);
        assert_eq!(config.particle_count, 12);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.toast_message, "Copied!");
    }

    #[test]
    fn out_of_bounds_and_malformed_values_fall_back() {
        let config = config_from(&[
            ("data-reveal-threshold", "1.5"),
            ("data-feedback-ms", "50"),
            ("data-particle-count", "lots"),
            ("data-highlight-lookahead", "NaN"),
            ("data-log-level", "verbose"),
            ("data-toast-message", "   "),
        ]);

        assert_eq!(config.reveal_threshold, DEFAULT_REVEAL_THRESHOLD);
        assert_eq!(config.feedback_ms, DEFAULT_FEEDBACK_MS);
        assert_eq!(config.particle_count, DEFAULT_PARTICLE_COUNT);
        assert_eq!(config.highlight_lookahead, DEFAULT_HIGHLIGHT_LOOKAHEAD);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.toast_message, DEFAULT_TOAST_MESSAGE);
    }
}
