//! Geographic coordinates.

use super::error::ValidationError;

/// A WGS84 position, optionally labelled (e.g. with a stop name).
///
/// # Examples
///
/// ```
/// use olhovivo::domain::Coordinate;
///
/// let se = Coordinate::new(-23.5503, -46.6339).unwrap();
/// assert_eq!(se.latitude(), -23.5503);
///
/// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
/// assert!(Coordinate::new(-91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
    label: Option<String>,
}

impl Coordinate {
    /// Create an unlabelled coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::new(
                "latitude",
                format!("{latitude} is outside -90..=90"),
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::new(
                "longitude",
                format!("{longitude} is outside -180..=180"),
            ));
        }

        Ok(Self {
            latitude,
            longitude,
            label: None,
        })
    }

    /// Create a coordinate carrying a label.
    pub fn labelled(
        latitude: f64,
        longitude: f64,
        label: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let mut coord = Self::new(latitude, longitude)?;
        coord.label = Some(label.into());
        Ok(coord)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            Coordinate::new(90.5, 0.0).unwrap_err().field(),
            "latitude"
        );
        assert_eq!(
            Coordinate::new(0.0, -180.5).unwrap_err().field(),
            "longitude"
        );
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinate::new(f64::INFINITY, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NEG_INFINITY).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn label() {
        let plain = Coordinate::new(-23.5, -46.6).unwrap();
        assert_eq!(plain.label(), None);

        let named = Coordinate::labelled(-23.5, -46.6, "Pq. Dom Pedro II").unwrap();
        assert_eq!(named.label(), Some("Pq. Dom Pedro II"));
        assert_ne!(plain, named);
    }
}
