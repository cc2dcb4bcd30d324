//! Bus line types.
//!
//! A line has two identities. The sign code ("8000", "N101") is what
//! riders see on the bus; it is shared by both directions. The line code is
//! the API's internal id and differs per direction, so every query about a
//! specific line uses it.

use std::fmt;

use super::error::{ValidationError, require_non_empty};

/// The four-character code shown on a bus's destination sign.
///
/// Format: a digit or `N`/`n` (night lines), two digits, then one
/// alphanumeric character.
///
/// # Examples
///
/// ```
/// use olhovivo::domain::SignCode;
///
/// assert!(SignCode::parse("8000").is_ok());
/// assert!(SignCode::parse("N101").is_ok());
/// assert!(SignCode::parse("175T").is_ok());
///
/// assert!(SignCode::parse("X000").is_err());
/// assert!(SignCode::parse("80001").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignCode([u8; 4]);

impl SignCode {
    /// Parse a sign code matching `[0-9Nn][0-9]{2}[A-Za-z0-9]`.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let bytes = s.as_bytes();

        let valid = bytes.len() == 4
            && (bytes[0].is_ascii_digit() || bytes[0] == b'N' || bytes[0] == b'n')
            && bytes[1].is_ascii_digit()
            && bytes[2].is_ascii_digit()
            && bytes[3].is_ascii_alphanumeric();

        if !valid {
            return Err(ValidationError::new(
                "sign code",
                format!("expected [0-9N]NN[A-Z0-9], got {s:?}"),
            ));
        }

        Ok(SignCode([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Returns the sign code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII alphanumerics are ever stored
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Whether this is a night line (`N` prefix).
    pub fn is_night(&self) -> bool {
        self.0[0].eq_ignore_ascii_case(&b'N')
    }
}

impl fmt::Debug for SignCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignCode({})", self.as_str())
    }
}

impl fmt::Display for SignCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which way a line runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Main terminal to secondary terminal (wire value 1).
    Outbound,
    /// Secondary terminal back to main terminal (wire value 2).
    Inbound,
}

impl Direction {
    pub fn from_code(code: i64) -> Result<Self, ValidationError> {
        match code {
            1 => Ok(Direction::Outbound),
            2 => Ok(Direction::Inbound),
            other => Err(ValidationError::new(
                "direction",
                format!("must be 1 or 2, got {other}"),
            )),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Direction::Outbound => 1,
            Direction::Inbound => 2,
        }
    }
}

/// Service type suffix of a line (the "10" in "8000-10").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineType {
    /// Regular line (10).
    Standard,
    /// Demand variant 21.
    Demand21,
    /// Demand variant 31.
    Demand31,
    /// Demand variant 41.
    Demand41,
}

impl LineType {
    pub fn from_code(code: i64) -> Result<Self, ValidationError> {
        match code {
            10 => Ok(LineType::Standard),
            21 => Ok(LineType::Demand21),
            31 => Ok(LineType::Demand31),
            41 => Ok(LineType::Demand41),
            other => Err(ValidationError::new(
                "line type",
                format!("must be one of 10, 21, 31, 41, got {other}"),
            )),
        }
    }

    /// Parse the two-character suffix used in compound sign codes.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let code = s.parse::<i64>().map_err(|_| {
            ValidationError::new("line type", format!("expected a number, got {s:?}"))
        })?;
        Self::from_code(code)
    }

    pub fn code(self) -> u8 {
        match self {
            LineType::Standard => 10,
            LineType::Demand21 => 21,
            LineType::Demand31 => 31,
            LineType::Demand41 => 41,
        }
    }

    pub fn is_demand(self) -> bool {
        self != LineType::Standard
    }
}

/// Unvalidated line fields, as they arrive from the API.
#[derive(Debug, Clone)]
pub struct BusLineFields<'a> {
    pub code: &'a str,
    pub circular: bool,
    pub sign: &'a str,
    pub direction: i64,
    pub line_type: i64,
    pub name_forward: &'a str,
    pub name_back: &'a str,
    pub info: &'a str,
}

/// A bus line in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusLine {
    code: String,
    circular: bool,
    sign: SignCode,
    direction: Direction,
    line_type: LineType,
    name_forward: String,
    name_back: String,
    info: String,
}

impl BusLine {
    /// Validate and build a line.
    pub fn new(fields: BusLineFields<'_>) -> Result<Self, ValidationError> {
        require_non_empty("line code", fields.code)?;
        let sign = SignCode::parse(fields.sign)?;
        let direction = Direction::from_code(fields.direction)?;
        let line_type = LineType::from_code(fields.line_type)?;
        require_non_empty("forward name", fields.name_forward)?;
        require_non_empty("back name", fields.name_back)?;

        Ok(Self {
            code: fields.code.to_string(),
            circular: fields.circular,
            sign,
            direction,
            line_type,
            name_forward: fields.name_forward.to_string(),
            name_back: fields.name_back.to_string(),
            info: fields.info.to_string(),
        })
    }

    /// Internal line code; different for each direction.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Whether the line is circular (one-way loop).
    pub fn is_circular(&self) -> bool {
        self.circular
    }

    pub fn sign(&self) -> SignCode {
        self.sign
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn line_type(&self) -> LineType {
        self.line_type
    }

    /// Sign text shown when running outbound.
    pub fn name_forward(&self) -> &str {
        &self.name_forward
    }

    /// Sign text shown when running inbound.
    pub fn name_back(&self) -> &str {
        &self.name_back
    }

    /// Free-form details, e.g. days of operation. Often empty.
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Sign code with type suffix, e.g. `"8000-10"`.
    pub fn full_sign_code(&self) -> String {
        format!("{}-{}", self.sign, self.line_type.code())
    }

    /// The sign text for the direction this line runs.
    pub fn current_sign_name(&self) -> &str {
        match self.direction {
            Direction::Outbound => &self.name_forward,
            Direction::Inbound => &self.name_back,
        }
    }
}

impl fmt::Display for BusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.full_sign_code(), self.current_sign_name())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn valid_sign_codes_parse(s in "[0-9Nn][0-9]{2}[A-Za-z0-9]") {
            let sign = SignCode::parse(&s).unwrap();
            prop_assert_eq!(sign.as_str(), s.as_str());
        }

        #[test]
        fn wrong_length_rejected(s in "[0-9]{0,3}|[0-9]{5,8}") {
            prop_assert!(SignCode::parse(&s).is_err());
        }

        #[test]
        fn unknown_line_types_rejected(code in any::<i64>()) {
            prop_assume!(![10, 21, 31, 41].contains(&code));
            prop_assert!(LineType::from_code(code).is_err());
        }
    }
}
