//! Bus livery colors.
//!
//! São Paulo buses are painted by operating area, and the area is encoded
//! in the first digit of the vehicle id. The mapping from id to color is
//! defined here and nowhere else.

use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;

/// A livery color from the SPTrans palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusColor {
    Cyan,
    DarkBlue,
    DarkGreen,
    DarkRed,
    Green,
    Grey,
    Metal,
    Orange,
    Red,
    Silver,
    Yellow,
}

impl BusColor {
    /// Every color in the palette, in declaration order.
    pub const ALL: [BusColor; 11] = [
        BusColor::Cyan,
        BusColor::DarkBlue,
        BusColor::DarkGreen,
        BusColor::DarkRed,
        BusColor::Green,
        BusColor::Grey,
        BusColor::Metal,
        BusColor::Orange,
        BusColor::Red,
        BusColor::Silver,
        BusColor::Yellow,
    ];

    /// Color for the operating area encoded in a bus id's leading digit.
    ///
    /// Digits 1-8 map to their area color; anything else is `Grey`.
    ///
    /// ```
    /// use olhovivo::domain::BusColor;
    ///
    /// assert_eq!(BusColor::for_bus_id("12345"), BusColor::Green);
    /// assert_eq!(BusColor::for_bus_id("82000"), BusColor::Orange);
    /// assert_eq!(BusColor::for_bus_id("90000"), BusColor::Grey);
    /// ```
    pub fn for_bus_id(id: &str) -> Self {
        match id.as_bytes().first() {
            Some(b'1') => BusColor::Green,
            Some(b'2') => BusColor::DarkBlue,
            Some(b'3') => BusColor::Yellow,
            Some(b'4') => BusColor::Red,
            Some(b'5') => BusColor::DarkGreen,
            Some(b'6') => BusColor::Cyan,
            Some(b'7') => BusColor::DarkRed,
            Some(b'8') => BusColor::Orange,
            _ => BusColor::Grey,
        }
    }

    /// 24-bit RGB value.
    pub fn rgb(self) -> u32 {
        match self {
            BusColor::Cyan => 0x00bfd0,
            BusColor::DarkBlue => 0x005ccf,
            BusColor::DarkGreen => 0x00812c,
            BusColor::DarkRed => 0x990000,
            BusColor::Green => 0x4dff19,
            BusColor::Grey => 0x4d4d4d,
            BusColor::Metal => 0xb3b3b3,
            BusColor::Orange => 0xff5205,
            BusColor::Red => 0xff120d,
            BusColor::Silver => 0xe6e6e6,
            BusColor::Yellow => 0xffe600,
        }
    }

    /// Symbolic name, e.g. `"DARK_BLUE"`.
    pub fn name(self) -> &'static str {
        match self {
            BusColor::Cyan => "CYAN",
            BusColor::DarkBlue => "DARK_BLUE",
            BusColor::DarkGreen => "DARK_GREEN",
            BusColor::DarkRed => "DARK_RED",
            BusColor::Green => "GREEN",
            BusColor::Grey => "GREY",
            BusColor::Metal => "METAL",
            BusColor::Orange => "ORANGE",
            BusColor::Red => "RED",
            BusColor::Silver => "SILVER",
            BusColor::Yellow => "YELLOW",
        }
    }

    /// Reverse lookup from an RGB value.
    pub fn from_rgb(rgb: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.rgb() == rgb)
    }

    /// CSS-style hex string, e.g. `"#4dff19"`.
    pub fn hex(self) -> String {
        format!("#{:06x}", self.rgb())
    }
}

impl fmt::Display for BusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BusColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::new("color", format!("unknown color name {s:?}")))
    }
}
