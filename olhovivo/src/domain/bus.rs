//! Vehicle types.

use std::fmt;

use super::color::BusColor;
use super::coordinate::Coordinate;
use super::error::ValidationError;

/// A validated SPTrans vehicle id.
///
/// Ids are five digits; the first digit (1-8) is the operating area.
///
/// # Examples
///
/// ```
/// use olhovivo::domain::BusId;
///
/// let id = BusId::parse("12345").unwrap();
/// assert_eq!(id.as_str(), "12345");
/// assert_eq!(id.area(), 1);
///
/// assert!(BusId::parse("92345").is_err());
/// assert!(BusId::parse("1234").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusId([u8; 5]);

impl BusId {
    /// Parse an id matching `[1-8][0-9]{4}`.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let bytes = s.as_bytes();

        if bytes.len() != 5 {
            return Err(ValidationError::new(
                "bus id",
                format!("expected 5 digits, got {s:?}"),
            ));
        }

        if !(b'1'..=b'8').contains(&bytes[0]) {
            return Err(ValidationError::new(
                "bus id",
                format!("area digit must be 1-8, got {s:?}"),
            ));
        }

        if !bytes[1..].iter().all(u8::is_ascii_digit) {
            return Err(ValidationError::new(
                "bus id",
                format!("expected 5 digits, got {s:?}"),
            ));
        }

        Ok(BusId([bytes[0], bytes[1], bytes[2], bytes[3], bytes[4]]))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Operating area (the leading digit, 1-8).
    pub fn area(&self) -> u8 {
        self.0[0] - b'0'
    }
}

impl fmt::Debug for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BusId({})", self.as_str())
    }
}

impl fmt::Display for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bus at a known position.
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    id: BusId,
    accessible: bool,
    position: Coordinate,
    color: BusColor,
}

impl Bus {
    /// Create a bus; the color is derived from the id.
    pub fn new(id: BusId, accessible: bool, position: Coordinate) -> Self {
        Self {
            color: BusColor::for_bus_id(id.as_str()),
            id,
            accessible,
            position,
        }
    }

    /// Parse the id and create the bus in one step.
    pub fn parse(id: &str, accessible: bool, position: Coordinate) -> Result<Self, ValidationError> {
        Ok(Self::new(BusId::parse(id)?, accessible, position))
    }

    pub fn id(&self) -> BusId {
        self.id
    }

    /// Whether the vehicle is wheelchair accessible.
    pub fn is_accessible(&self) -> bool {
        self.accessible
    }

    pub fn position(&self) -> &Coordinate {
        &self.position
    }

    pub fn color(&self) -> BusColor {
        self.color
    }

    /// Numeric RGB code of the livery color.
    pub fn color_code(&self) -> u32 {
        self.color.rgb()
    }
}
