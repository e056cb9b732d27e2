//! Navigation configuration.
//!
//! Every field has a default, so an empty JSON object or an empty environment
//! yields a usable config. Unknown metaphors and unparsable values are errors
//! rather than silent fallbacks.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::PAN_COSINE_THRESHOLD;
use crate::error::NavigationError;

/// Which rotate modifier drives the `Rotate` gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMetaphor {
    #[default]
    Turntable,
    Trackball,
}

impl NavigationMetaphor {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Turntable => "turntable",
            Self::Trackball => "trackball",
        }
    }
}

impl fmt::Display for NavigationMetaphor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NavigationMetaphor {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "turntable" => Ok(Self::Turntable),
            "trackball" => Ok(Self::Trackball),
            other => Err(NavigationError::InvalidMetaphor(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Initial rotate metaphor.
    pub metaphor: NavigationMetaphor,
    /// Rotate on every move while pointer lock is active, regardless of buttons.
    pub always_rotate_on_move: bool,
    /// Cosine above which two-contact movement counts as a pan.
    pub pan_threshold: f64,
    /// Scale gesture points by the device pixel ratio.
    pub normalize_offsets: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            metaphor: NavigationMetaphor::default(),
            always_rotate_on_move: false,
            pan_threshold: PAN_COSINE_THRESHOLD,
            normalize_offsets: true,
        }
    }
}

impl NavigationConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// [`NavigationError::Json`] on malformed input or an unknown metaphor,
    /// [`NavigationError::InvalidConfig`] when the threshold is out of range.
    pub fn from_json(raw: &str) -> Result<Self, NavigationError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()
    }

    /// Build the config from environment variables.
    ///
    /// Optional:
    /// - `NAV_METAPHOR`: `turntable` (default) or `trackball`
    /// - `NAV_ALWAYS_ROTATE_ON_MOVE`: default false
    /// - `NAV_PAN_THRESHOLD`: default 0.2, within `[-1, 1]`
    /// - `NAV_NORMALIZE_OFFSETS`: default true
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, NavigationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a caller-supplied variable lookup.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, NavigationError> {
        let defaults = Self::default();
        let metaphor = match lookup("NAV_METAPHOR") {
            Some(raw) => raw.parse()?,
            None => defaults.metaphor,
        };
        let config = Self {
            metaphor,
            always_rotate_on_move: env_parse(
                &lookup,
                "NAV_ALWAYS_ROTATE_ON_MOVE",
                defaults.always_rotate_on_move,
                parse_bool,
            )?,
            pan_threshold: env_parse(&lookup, "NAV_PAN_THRESHOLD", defaults.pan_threshold, |v| v.parse().ok())?,
            normalize_offsets: env_parse(&lookup, "NAV_NORMALIZE_OFFSETS", defaults.normalize_offsets, parse_bool)?,
        };
        config.validate()
    }

    fn validate(self) -> Result<Self, NavigationError> {
        if !(-1.0..=1.0).contains(&self.pan_threshold) {
            return Err(NavigationError::InvalidConfig {
                key: "pan_threshold",
                value: self.pan_threshold.to_string(),
            });
        }
        Ok(self)
    }
}

fn env_parse<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, NavigationError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => parse(raw.trim()).ok_or(NavigationError::InvalidConfig { key, value: raw }),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
