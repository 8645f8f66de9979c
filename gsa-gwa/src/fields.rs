//! Field-level value types shared by several record grammars.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Token that decodes a nullable numeric field to "unset", alongside the empty token.
pub const UNSET_SENTINEL: &str = "UNDEF";

/// Token for a colour field with no colour assigned.
pub const NO_COLOUR: &str = "NO_RGB";

const PERCENT: char = '%';

/// A modifier that is either a percentage of a base value or an absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PercentOrAbsolute {
    Percentage(f64),
    Absolute(f64),
}

impl PercentOrAbsolute {
    pub fn value(self) -> f64 {
        match self {
            Self::Percentage(v) | Self::Absolute(v) => v,
        }
    }

    pub fn is_percentage(self) -> bool {
        matches!(self, Self::Percentage(_))
    }

    /// Applies the modifier to a base value.
    pub fn apply(self, base: f64) -> f64 {
        match self {
            Self::Percentage(p) => base * p / 100.0,
            Self::Absolute(v) => v,
        }
    }
}

impl FromStr for PercentOrAbsolute {
    type Err = String;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        match token.strip_suffix(PERCENT) {
            Some(pct) => parse_number(pct).map(Self::Percentage),
            None => parse_number(token).map(Self::Absolute),
        }
    }
}

impl fmt::Display for PercentOrAbsolute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentage(v) => write!(f, "{v}{PERCENT}"),
            Self::Absolute(v) => write!(f, "{v}"),
        }
    }
}

/// A display colour; the token is opaque apart from the `NO_RGB` marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Colour {
    #[default]
    NoRgb,
    Value(String),
}

impl FromStr for Colour {
    type Err = String;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        if token.is_empty() || token.eq_ignore_ascii_case(NO_COLOUR) {
            Ok(Self::NoRgb)
        } else {
            Ok(Self::Value(token.to_string()))
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRgb => f.write_str(NO_COLOUR),
            Self::Value(v) => f.write_str(v),
        }
    }
}

/// Parses a finite number; infinities and NaN are rejected.
pub fn parse_number(token: &str) -> Result<f64, String> {
    let token = token.trim();
    if token.is_empty() {
        return Err("expected a number, found an empty token".to_string());
    }
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(format!("'{token}' is not a finite number")),
        Err(_) => Err(format!("'{token}' is not a number")),
    }
}

/// True for tokens that decode a nullable field to unset.
pub fn is_unset(token: &str) -> bool {
    let token = token.trim();
    token.is_empty() || token.eq_ignore_ascii_case(UNSET_SENTINEL)
}
