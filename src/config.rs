//! Loader configuration: dot layout, color, and cycle timing.
//!
//! Hosts usually build a [`LoaderConfig`] from a JSON props bag; every field
//! is optional and falls back to the defaults in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CYCLE_DURATION_MS, DEFAULT_DOT_COUNT, DEFAULT_DOT_RADIUS};
use crate::error::LoaderError;

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::InvalidConfig`] for any other shape.
    pub fn from_hex(text: &str) -> Result<Self, LoaderError> {
        let invalid = || LoaderError::InvalidConfig(format!("invalid color {text:?}"));
        let hex = text.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) || !(hex.len() == 6 || hex.len() == 8) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self { r: channel(0)?, g: channel(2)?, b: channel(4)?, a })
    }

    /// CSS `rgba(...)` form for Canvas2D fill styles.
    #[must_use]
    pub fn to_css(self) -> String {
        let alpha = f64::from(self.a) / 255.0;
        format!("rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = LoaderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Dot count and radius. Fixed for the lifetime of a loader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotLayout {
    pub dot_count: usize,
    pub dot_radius: f64,
}

impl DotLayout {
    /// Rest x-coordinate of dot `index`, in content-local space.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rest_x(&self, index: usize) -> f64 {
        (3.0 * index as f64 + 2.0) * self.dot_radius
    }

    /// Share of the drag progress consumed by each dot.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn one_full_fraction(&self) -> f64 {
        1.0 / self.dot_count as f64
    }
}

/// Full loader configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Number of dots, at least 1.
    pub dot_count: usize,
    /// Dot radius in CSS pixels, strictly positive.
    pub dot_radius: f64,
    /// Fill color for every dot.
    pub dot_color: Color,
    /// Length of one loading cycle in milliseconds, strictly positive.
    pub cycle_duration_ms: f64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            dot_count: DEFAULT_DOT_COUNT,
            dot_radius: DEFAULT_DOT_RADIUS,
            dot_color: Color::BLACK,
            cycle_duration_ms: DEFAULT_CYCLE_DURATION_MS,
        }
    }
}

impl LoaderConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::ConfigParse`] for malformed JSON and
    /// [`LoaderError::InvalidConfig`] for out-of-range values.
    pub fn from_json(text: &str) -> Result<Self, LoaderError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), LoaderError> {
        if self.dot_count == 0 {
            return Err(LoaderError::InvalidConfig("dot_count must be at least 1".into()));
        }
        if !(self.dot_radius.is_finite() && self.dot_radius > 0.0) {
            return Err(LoaderError::InvalidConfig(format!(
                "dot_radius must be positive, got {}",
                self.dot_radius
            )));
        }
        if !(self.cycle_duration_ms.is_finite() && self.cycle_duration_ms > 0.0) {
            return Err(LoaderError::InvalidConfig(format!(
                "cycle_duration_ms must be positive, got {}",
                self.cycle_duration_ms
            )));
        }
        Ok(())
    }

    /// The layout portion of this config.
    #[must_use]
    pub fn layout(&self) -> DotLayout {
        DotLayout { dot_count: self.dot_count, dot_radius: self.dot_radius }
    }
}
