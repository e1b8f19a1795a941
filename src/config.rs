// ABOUTME: Configuration module for the quickslides engine
// ABOUTME: Provides gesture thresholds, key bindings and environment variable handling

use crate::keymap::{Key, KeyBindings};
use log::warn;
use std::env;
use std::path::PathBuf;

/// Thresholds for the drag gesture recognizer, in pixels and milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Movement below this is a tap; reaching it locks the axis.
    pub tap_slop_px: f32,
    pub swipe_distance_px: f32,
    pub swipe_velocity_px_per_ms: f32,
    pub exit_distance_px: f32,
    pub velocity_window_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_slop_px: 10.0,
            swipe_distance_px: 80.0,
            swipe_velocity_px_per_ms: 0.5,
            exit_distance_px: 120.0,
            velocity_window_ms: 100,
        }
    }
}

/// Global configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the file store keeps the document.
    pub store_dir: PathBuf,
    pub gesture: GestureConfig,
    pub bindings: KeyBindings,
    pub debounce_ms: u64,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            gesture: GestureConfig::default(),
            bindings: KeyBindings::default(),
            debounce_ms: 500,
            port: 8080,
        }
    }
}

fn default_store_dir() -> PathBuf {
    env::var("HOME")
        .map(|home| PathBuf::from(home).join(".quickslides"))
        .unwrap_or_else(|_| PathBuf::from(".quickslides"))
}

fn env_number<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// A gesture threshold: finite and not negative, else `default`.
fn parse_threshold(raw: Option<&str>, default: f32) -> f32 {
    raw.and_then(|s| s.trim().parse::<f32>().ok())
        .filter(|value| value.is_finite() && *value >= 0.0)
        .unwrap_or(default)
}

fn env_threshold(name: &str, default: f32) -> f32 {
    parse_threshold(env::var(name).ok().as_deref(), default)
}

/// A rebindable key. The fixed navigation keys are refused.
fn parse_binding(raw: Option<&str>, default: Key) -> Key {
    match raw.and_then(Key::parse) {
        Some(key) if key.is_fixed() => {
            warn!("Key {:?} is reserved for navigation, keeping {:?}", key, default);
            default
        }
        Some(key) => key,
        None => default,
    }
}

fn env_key(name: &str, default: Key) -> Key {
    parse_binding(env::var(name).ok().as_deref(), default)
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let store_dir = env::var("QUICKSLIDES_STORE_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.store_dir);

        let gesture = GestureConfig {
            tap_slop_px: env_threshold("QUICKSLIDES_TAP_SLOP", defaults.gesture.tap_slop_px),
            swipe_distance_px: env_threshold(
                "QUICKSLIDES_SWIPE_DISTANCE",
                defaults.gesture.swipe_distance_px,
            ),
            swipe_velocity_px_per_ms: env_threshold(
                "QUICKSLIDES_SWIPE_VELOCITY",
                defaults.gesture.swipe_velocity_px_per_ms,
            ),
            exit_distance_px: env_threshold(
                "QUICKSLIDES_EXIT_DISTANCE",
                defaults.gesture.exit_distance_px,
            ),
            velocity_window_ms: defaults.gesture.velocity_window_ms,
        };

        let bindings = KeyBindings {
            exit: env_key("QUICKSLIDES_EXIT_KEY", defaults.bindings.exit),
            fullscreen: env_key("QUICKSLIDES_FULLSCREEN_KEY", defaults.bindings.fullscreen),
        };

        Self {
            store_dir,
            gesture,
            bindings,
            debounce_ms: env_number("QUICKSLIDES_DEBOUNCE_MS", defaults.debounce_ms),
            port: env_number("QUICKSLIDES_PORT", defaults.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_accepts_plain_numbers() {
        assert_eq!(parse_threshold(Some(" 42.5 "), 80.0), 42.5);
        assert_eq!(parse_threshold(Some("0"), 80.0), 0.0);
        assert_eq!(parse_threshold(None, 80.0), 80.0);
    }

    #[test]
    fn test_threshold_rejects_non_finite_and_negative() {
        assert_eq!(parse_threshold(Some("NaN"), 80.0), 80.0);
        assert_eq!(parse_threshold(Some("inf"), 10.0), 10.0);
        assert_eq!(parse_threshold(Some("-infinity"), 10.0), 10.0);
        assert_eq!(parse_threshold(Some("-5"), 120.0), 120.0);
        assert_eq!(parse_threshold(Some("far"), 120.0), 120.0);
    }

    #[test]
    fn test_binding_refuses_navigation_keys() {
        assert_eq!(parse_binding(Some("space"), Key::Escape), Key::Escape);
        assert_eq!(parse_binding(Some("left"), Key::Escape), Key::Escape);
        assert_eq!(parse_binding(Some("end"), Key::Char('f')), Key::Char('f'));
        assert_eq!(parse_binding(Some("q"), Key::Escape), Key::Char('q'));
        assert_eq!(parse_binding(Some("??"), Key::Escape), Key::Escape);
    }
}
