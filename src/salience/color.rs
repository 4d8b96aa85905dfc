use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced when a color value contains no numeric components
#[derive(Debug, Clone, Error, PartialEq)]
#[error("no numeric components in color value '{0}'")]
pub struct ColorParseError(pub String);

/// An RGBA color as reported by computed style
///
/// Channels are kept as `f64` exactly as extracted from the style text;
/// alpha defaults to 1.0 when the source notation omits it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Opaque white, the fallback background for a fully transparent
    /// ancestor chain
    pub const WHITE: Rgba = Rgba { r: 255.0, g: 255.0, b: 255.0, a: 1.0 };

    /// Transparent black, the neutral substitute for unparseable style text
    pub const TRANSPARENT: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    /// Create a color from explicit channel values
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse a function-notation color string (e.g. `rgb(255, 0, 0)` or
    /// `rgba(0, 0, 0, 0.5)`)
    ///
    /// All numeric tokens are extracted in order. With exactly four tokens
    /// the fourth is alpha; otherwise alpha is 1.0. Channels missing from a
    /// short token list read as 0. A string with no numeric tokens at all is
    /// a [`ColorParseError`].
    pub fn parse(text: &str) -> Result<Self, ColorParseError> {
        let tokens = numeric_tokens(text);
        if tokens.is_empty() {
            return Err(ColorParseError(text.to_string()));
        }

        let channel = |i: usize| tokens.get(i).copied().unwrap_or(0.0);
        let alpha = if tokens.len() == 4 { tokens[3] } else { 1.0 };

        Ok(Self {
            r: channel(0),
            g: channel(1),
            b: channel(2),
            a: alpha,
        })
    }

    /// Parse a color, substituting `fallback` on failure
    ///
    /// Style values on real pages are occasionally absent or malformed; a
    /// single bad value must not abort a traversal, so recovery is local.
    pub fn parse_or(text: &str, fallback: Rgba) -> Self {
        match Self::parse(text) {
            Ok(color) => color,
            Err(err) => {
                log::debug!("substituting fallback color: {}", err);
                fallback
            }
        }
    }

    /// Whether the alpha channel is zero
    pub fn is_transparent(&self) -> bool {
        self.a == 0.0
    }

    /// L1 distance over the r, g, b channels; alpha is excluded
    ///
    /// This is the exact metric the scoring thresholds are calibrated
    /// against, not a perceptual contrast ratio.
    pub fn contrast(&self, other: &Rgba) -> f64 {
        (self.r - other.r).abs() + (self.g - other.g).abs() + (self.b - other.b).abs()
    }
}

/// Extract all numeric tokens from a string, in order
fn numeric_tokens(text: &str) -> Vec<f64> {
    let mut tokens = Vec::new();
    let mut buf = String::new();

    let mut flush = |buf: &mut String| {
        if !buf.is_empty() {
            if let Ok(value) = buf.parse::<f64>() {
                tokens.push(value);
            }
            buf.clear();
        }
    };

    for ch in text.chars() {
        if ch.is_ascii_digit() || ch == '.' || (ch == '-' && buf.is_empty()) {
            buf.push(ch);
        } else {
            flush(&mut buf);
        }
    }
    flush(&mut buf);

    tokens
}
