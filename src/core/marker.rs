//! Participant markers.
//!
//! A `Marker` is the single-token identity a participant leaves inside a
//! game state (a board symbol, a seat letter). Markers are unique within a
//! session and are the keys of the cumulative score table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// Single-character participant marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Marker(pub char);

impl Marker {
    /// Create a new marker, rejecting whitespace and control characters.
    ///
    /// ```
    /// use rust_tbg::core::Marker;
    ///
    /// assert!(Marker::new('X').is_ok());
    /// assert!(Marker::new(' ').is_err());
    /// ```
    pub fn new(symbol: char) -> Result<Self, ConfigurationError> {
        if symbol.is_whitespace() || symbol.is_control() {
            return Err(ConfigurationError::InvalidMarker {
                marker: symbol.to_string(),
            });
        }
        Ok(Self(symbol))
    }

    /// Get the underlying symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        self.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Marker {
    type Err = ConfigurationError;

    /// Parse a marker from a string holding exactly one character.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Marker::new(c),
            _ => Err(ConfigurationError::InvalidMarker {
                marker: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_display() {
        assert_eq!(Marker('X').to_string(), "X");
        assert_eq!(Marker::new('o').unwrap().symbol(), 'o');
    }

    #[test]
    fn test_marker_rejects_blank() {
        assert!(Marker::new(' ').is_err());
        assert!(Marker::new('\n').is_err());
        assert!(Marker::new('\u{7}').is_err());
    }

    #[test]
    fn test_marker_from_str() {
        assert_eq!("X".parse::<Marker>().unwrap(), Marker('X'));
        assert!("XY".parse::<Marker>().is_err());
        assert!("".parse::<Marker>().is_err());
    }

    #[test]
    fn test_marker_serialization() {
        let marker = Marker('Z');
        let json = serde_json::to_string(&marker).unwrap();
        let back: Marker = serde_json::from_str(&json).unwrap();
        assert_eq!(marker, back);
    }
}
