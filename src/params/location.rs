//! v2 search locations.
//!
//! There are three ways to specify where a v2 search happens, and exactly one
//! of them must be used per request. The original wire protocol left that as a
//! caller-enforced rule; here the choice is a closed sum with no unset state,
//! so a request cannot be built with zero or two locations.

use crate::params::Parameter;

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One of the three mutually exclusive ways to specify a v2 search location.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// A neighborhood, address or city, with an optional coordinate hint for
    /// the geocoder to disambiguate the text. Renders under `location`, the
    /// hint under `cll`.
    FreeText {
        text: String,
        hint: Option<Coordinate>,
    },
    /// A geographic point. Renders under `ll` as
    /// `"<lat>,<lon>[,<accuracy>[,<altitude>[,<altitude_accuracy>]]]"` —
    /// altitude is only rendered if accuracy is present, and altitude accuracy
    /// only if both are. No gaps in the chain.
    Point {
        coordinate: Coordinate,
        accuracy: Option<f64>,
        altitude: Option<f64>,
        altitude_accuracy: Option<f64>,
    },
    /// A bounding box from a southwest to a northeast corner. Renders under
    /// `bounds` as `"<sw_lat>,<sw_lon>|<ne_lat>,<ne_lon>"`.
    BoundingBox {
        southwest: Coordinate,
        northeast: Coordinate,
    },
}

impl Location {
    pub fn free_text(text: impl Into<String>) -> Self {
        Self::FreeText {
            text: text.into(),
            hint: None,
        }
    }

    pub fn free_text_with_hint(text: impl Into<String>, hint: Coordinate) -> Self {
        Self::FreeText {
            text: text.into(),
            hint: Some(hint),
        }
    }

    pub fn point(coordinate: Coordinate) -> Self {
        Self::Point {
            coordinate,
            accuracy: None,
            altitude: None,
            altitude_accuracy: None,
        }
    }

    pub fn bounding_box(southwest: Coordinate, northeast: Coordinate) -> Self {
        Self::BoundingBox {
            southwest,
            northeast,
        }
    }

    /// The coordinate hint, if this is free text carrying one.
    pub(crate) fn hint(&self) -> Option<HintParameter> {
        match self {
            Self::FreeText {
                hint: Some(coordinate),
                ..
            } => Some(HintParameter(*coordinate)),
            _ => None,
        }
    }
}

impl Parameter for Location {
    fn key(&self) -> &'static str {
        match self {
            Self::FreeText { .. } => "location",
            Self::Point { .. } => "ll",
            Self::BoundingBox { .. } => "bounds",
        }
    }

    fn value(&self) -> String {
        match self {
            Self::FreeText { text, .. } => text.clone(),
            Self::Point {
                coordinate,
                accuracy,
                altitude,
                altitude_accuracy,
            } => {
                let mut rendered = format!("{},{}", coordinate.latitude, coordinate.longitude);
                if let Some(accuracy) = accuracy {
                    rendered.push_str(&format!(",{accuracy}"));
                    if let Some(altitude) = altitude {
                        rendered.push_str(&format!(",{altitude}"));
                        if let Some(altitude_accuracy) = altitude_accuracy {
                            rendered.push_str(&format!(",{altitude_accuracy}"));
                        }
                    }
                }
                rendered
            }
            Self::BoundingBox {
                southwest,
                northeast,
            } => format!(
                "{},{}|{},{}",
                southwest.latitude, southwest.longitude, northeast.latitude, northeast.longitude
            ),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value())
    }
}

/// The `cll` geocoder hint accompanying a free-text location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HintParameter(pub Coordinate);

impl Parameter for HintParameter {
    fn key(&self) -> &'static str {
        "cll"
    }

    fn value(&self) -> String {
        format!("{},{}", self.0.latitude, self.0.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_text_renders_raw_text() {
        let location = Location::free_text("Portland, OR");
        assert_eq!(location.key(), "location");
        assert_eq!(location.value(), "Portland, OR");
        assert!(location.hint().is_none());
    }

    #[test]
    fn free_text_hint_renders_lat_lon() {
        let location =
            Location::free_text_with_hint("Portland, OR", Coordinate::new(45.52, -122.68));
        let hint = location.hint().unwrap();
        assert_eq!(hint.key(), "cll");
        assert_eq!(hint.value(), "45.52,-122.68");
    }

    #[test]
    fn point_renders_lat_lon() {
        let location = Location::point(Coordinate::new(37.77, -122.42));
        assert_eq!(location.key(), "ll");
        assert_eq!(location.value(), "37.77,-122.42");
    }

    #[test]
    fn point_optional_chain_is_strict_left_to_right() {
        let with_accuracy = Location::Point {
            coordinate: Coordinate::new(1.0, 2.0),
            accuracy: Some(3.0),
            altitude: None,
            altitude_accuracy: None,
        };
        assert_eq!(with_accuracy.value(), "1,2,3");

        let full = Location::Point {
            coordinate: Coordinate::new(1.0, 2.0),
            accuracy: Some(3.0),
            altitude: Some(4.0),
            altitude_accuracy: Some(5.0),
        };
        assert_eq!(full.value(), "1,2,3,4,5");

        // Altitude without accuracy never renders.
        let gap = Location::Point {
            coordinate: Coordinate::new(1.0, 2.0),
            accuracy: None,
            altitude: Some(4.0),
            altitude_accuracy: Some(5.0),
        };
        assert_eq!(gap.value(), "1,2");

        // Altitude accuracy requires both predecessors.
        let no_altitude = Location::Point {
            coordinate: Coordinate::new(1.0, 2.0),
            accuracy: Some(3.0),
            altitude: None,
            altitude_accuracy: Some(5.0),
        };
        assert_eq!(no_altitude.value(), "1,2,3");
    }

    #[test]
    fn bounding_box_renders_corner_pair() {
        let location = Location::bounding_box(
            Coordinate::new(37.7, -122.5),
            Coordinate::new(37.8, -122.4),
        );
        assert_eq!(location.key(), "bounds");
        assert_eq!(location.value(), "37.7,-122.5|37.8,-122.4");
    }
}
