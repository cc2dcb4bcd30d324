//! Operating companies.

use super::error::{ValidationError, require_non_empty};

/// A transport company operating buses in one area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    area: Option<u8>,
    id: String,
    name: String,
}

impl Company {
    pub fn new(
        area: Option<u8>,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let name = name.into();
        require_non_empty("company id", &id)?;
        require_non_empty("company name", &name)?;

        Ok(Self { area, id, name })
    }

    /// Operating area the company runs in, if known.
    pub fn area(&self) -> Option<u8> {
        self.area
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
