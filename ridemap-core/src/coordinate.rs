//! WGS84 coordinates and the rectangles that enclose them.
//!
//! [`Coordinate`] keeps latitude and longitude named explicitly so callers
//! never have to remember which axis is `x`. Conversions to and from
//! [`geo::Coord`] follow the usual convention of `x = longitude` and
//! `y = latitude`.

use std::fmt;
use std::str::FromStr;

use geo::{BoundingRect, Coord, LineString, Rect};
use thiserror::Error;

/// A single WGS84 position.
///
/// # Examples
/// ```
/// use ridemap_core::Coordinate;
///
/// # fn main() -> Result<(), ridemap_core::CoordinateError> {
/// let origin = Coordinate::new(-27.552_141_3, -48.621_353_5)?;
/// assert_eq!(origin.latitude, -27.552_141_3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Degrees north of the equator, in `[-90.0, 90.0]`.
    pub latitude: f64,
    /// Degrees east of the prime meridian, in `[-180.0, 180.0]`.
    pub longitude: f64,
}

/// Errors returned by [`Coordinate::new`] and [`Coordinate::from_str`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude was not finite or fell outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    /// Longitude was not finite or fell outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
    /// Text did not have the `lat,lon` shape.
    #[error("expected `lat,lon`, got {input:?}")]
    Malformed {
        /// The rejected input.
        input: String,
    },
}

impl Coordinate {
    /// Validate and construct a coordinate.
    ///
    /// # Errors
    /// Returns [`CoordinateError`] when either component is not finite or
    /// outside its valid range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Convert into a `geo` coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn to_geo(self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            latitude: coord.y,
            longitude: coord.x,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    /// Parse `"lat,lon"`, tolerating whitespace around either component.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordinateError::Malformed {
            input: s.to_owned(),
        };
        let (lat, lon) = s.split_once(',').ok_or_else(malformed)?;
        let latitude = lat.trim().parse::<f64>().map_err(|_| malformed())?;
        let longitude = lon.trim().parse::<f64>().map_err(|_| malformed())?;
        Self::new(latitude, longitude)
    }
}

/// The minimal latitude/longitude rectangle enclosing a set of points.
///
/// Bounds are inclusive, so a region built from a single point contains
/// exactly that point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingRegion {
    /// Southern edge.
    pub min_latitude: f64,
    /// Western edge.
    pub min_longitude: f64,
    /// Northern edge.
    pub max_latitude: f64,
    /// Eastern edge.
    pub max_longitude: f64,
}

impl BoundingRegion {
    /// Compute the region enclosing `points`, or `None` when empty.
    ///
    /// # Examples
    /// ```
    /// use ridemap_core::{BoundingRegion, Coordinate};
    ///
    /// let a = Coordinate { latitude: -27.55, longitude: -48.62 };
    /// let b = Coordinate { latitude: -27.60, longitude: -48.55 };
    /// let region = BoundingRegion::enclosing(&[a, b]).expect("non-empty");
    /// assert!(region.contains(a) && region.contains(b));
    /// ```
    #[must_use]
    pub fn enclosing(points: &[Coordinate]) -> Option<Self> {
        let line: LineString<f64> = points.iter().map(|point| point.to_geo()).collect();
        line.bounding_rect().map(Self::from)
    }

    /// Whether `point` lies within the region, edges included.
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude)
    }

    /// Midpoint of the region.
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Rect::from(*self).center().into()
    }
}

impl From<Rect<f64>> for BoundingRegion {
    fn from(rect: Rect<f64>) -> Self {
        let min = rect.min();
        let max = rect.max();
        Self {
            min_latitude: min.y,
            min_longitude: min.x,
            max_latitude: max.y,
            max_longitude: max.x,
        }
    }
}

impl From<BoundingRegion> for Rect<f64> {
    fn from(region: BoundingRegion) -> Self {
        Self::new(
            Coord {
                x: region.min_longitude,
                y: region.min_latitude,
            },
            Coord {
                x: region.max_longitude,
                y: region.max_latitude,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-27.552_141_3, -48.621_353_5)]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    fn accepts_valid_coordinates(#[case] latitude: f64, #[case] longitude: f64) {
        let coordinate = Coordinate::new(latitude, longitude).expect("valid coordinate");
        assert_eq!(coordinate.latitude, latitude);
        assert_eq!(coordinate.longitude, longitude);
    }

    #[rstest]
    #[case(90.5, 0.0)]
    #[case(f64::NAN, 0.0)]
    fn rejects_invalid_latitude(#[case] latitude: f64, #[case] longitude: f64) {
        let err = Coordinate::new(latitude, longitude).expect_err("latitude out of range");
        assert!(matches!(err, CoordinateError::Latitude(_)));
    }

    #[rstest]
    #[case(0.0, 180.5)]
    #[case(0.0, f64::INFINITY)]
    fn rejects_invalid_longitude(#[case] latitude: f64, #[case] longitude: f64) {
        let err = Coordinate::new(latitude, longitude).expect_err("longitude out of range");
        assert!(matches!(err, CoordinateError::Longitude(_)));
    }

    #[rstest]
    #[case("-27.5521413,-48.6213535", -27.552_141_3, -48.621_353_5)]
    #[case(" -27.5962788 , -48.551487 ", -27.596_278_8, -48.551_487)]
    fn parses_lat_lon_text(#[case] input: &str, #[case] latitude: f64, #[case] longitude: f64) {
        let coordinate: Coordinate = input.parse().expect("parse coordinate");
        assert_eq!(coordinate.latitude, latitude);
        assert_eq!(coordinate.longitude, longitude);
    }

    #[rstest]
    #[case("")]
    #[case("-27.55")]
    #[case("north,east")]
    fn rejects_malformed_text(#[case] input: &str) {
        let err = input.parse::<Coordinate>().expect_err("malformed input");
        assert!(matches!(err, CoordinateError::Malformed { .. }));
    }

    #[rstest]
    fn geo_conversion_swaps_axes() {
        let coordinate = Coordinate {
            latitude: 1.0,
            longitude: 2.0,
        };
        let coord = coordinate.to_geo();
        assert_eq!(coord, Coord { x: 2.0, y: 1.0 });
        assert_eq!(Coordinate::from(coord), coordinate);
    }

    #[rstest]
    fn enclosing_region_is_minimal() {
        let points = [
            Coordinate {
                latitude: -27.55,
                longitude: -48.62,
            },
            Coordinate {
                latitude: -27.60,
                longitude: -48.55,
            },
            Coordinate {
                latitude: -27.57,
                longitude: -48.60,
            },
        ];
        let region = BoundingRegion::enclosing(&points).expect("non-empty input");
        assert_eq!(region.min_latitude, -27.60);
        assert_eq!(region.max_latitude, -27.55);
        assert_eq!(region.min_longitude, -48.62);
        assert_eq!(region.max_longitude, -48.55);
        assert!(points.iter().all(|point| region.contains(*point)));
    }

    #[rstest]
    fn enclosing_nothing_is_none() {
        assert!(BoundingRegion::enclosing(&[]).is_none());
    }

    #[rstest]
    fn region_center_is_midpoint() {
        let region = BoundingRegion {
            min_latitude: -2.0,
            min_longitude: 10.0,
            max_latitude: 2.0,
            max_longitude: 20.0,
        };
        let center = region.center();
        assert_eq!(center.latitude, 0.0);
        assert_eq!(center.longitude, 15.0);
    }
}
