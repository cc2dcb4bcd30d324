//! Stops and busways.

use super::coordinate::Coordinate;
use super::error::{ValidationError, require_non_empty};

/// A bus stop.
#[derive(Debug, Clone, PartialEq)]
pub struct BusStop {
    id: String,
    name: String,
    address: Option<String>,
    coordinate: Option<Coordinate>,
}

impl BusStop {
    /// Create a stop. The id must be non-empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        require_non_empty("stop id", &id)?;

        Ok(Self {
            id,
            name: name.into(),
            address: None,
            coordinate: None,
        })
    }

    /// Attach a street address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Attach a position.
    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn coordinate(&self) -> Option<&Coordinate> {
        self.coordinate.as_ref()
    }
}

/// A dedicated bus corridor ("corredor").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Busway {
    id: String,
    name: String,
}

impl Busway {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        require_non_empty("busway id", &id)?;

        Ok(Self {
            id,
            name: name.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_requires_id() {
        assert!(BusStop::new("", "Anywhere").is_err());
        assert_eq!(BusStop::new(" ", "x").unwrap_err().field(), "stop id");
    }

    #[test]
    fn stop_optional_parts() {
        let plain = BusStop::new("340015329", "AFONSO BRAZ B/C1").unwrap();
        assert_eq!(plain.address(), None);
        assert_eq!(plain.coordinate(), None);

        let coord = Coordinate::new(-23.592938, -46.672727).unwrap();
        let full = plain
            .clone()
            .with_address("R ARMINDA/ R BALTHAZAR DA VEIGA")
            .with_coordinate(coord.clone());
        assert_eq!(full.id(), "340015329");
        assert_eq!(full.address(), Some("R ARMINDA/ R BALTHAZAR DA VEIGA"));
        assert_eq!(full.coordinate(), Some(&coord));
        assert_ne!(plain, full);
    }

    #[test]
    fn busway_requires_id() {
        assert!(Busway::new("", "Campo Limpo").is_err());
        let busway = Busway::new("8", "Campo Limpo").unwrap();
        assert_eq!(busway.id(), "8");
        assert_eq!(busway.name(), "Campo Limpo");
    }
}
