//! Text encoding of a location as sent from the ranging device.
//!
//! The format is two comma-separated decimal numbers, `"x,y"`, in meters.
//! Extra trailing fields are ignored.

use std::fmt;
use std::str::FromStr;

use super::types::SolvedLocation;
use crate::core::Point2D;
use crate::error::PayloadError;

/// A location received as text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocationPayload {
    pub x: f32,
    pub y: f32,
}

impl LocationPayload {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Encode for transmission.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parse a received payload.
    pub fn parse(text: &str) -> Result<Self, PayloadError> {
        text.parse()
    }
}

impl From<&SolvedLocation> for LocationPayload {
    fn from(location: &SolvedLocation) -> Self {
        Self::new(location.x(), location.y())
    }
}

impl fmt::Display for LocationPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for LocationPayload {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(',').map(str::trim).collect();
        if fields.len() < 2 || fields[..2].iter().any(|f| f.is_empty()) {
            return Err(PayloadError::MissingCoordinates(
                fields.iter().filter(|f| !f.is_empty()).count(),
            ));
        }
        let parse = |field: &str| -> Result<f32, PayloadError> {
            field
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| PayloadError::InvalidNumber(field.to_string()))
        };
        Ok(Self::new(parse(fields[0])?, parse(fields[1])?))
    }
}
