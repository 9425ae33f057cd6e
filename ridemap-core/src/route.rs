//! Route requests and the polylines resolved for them.

use std::time::Duration;

use crate::{BoundingRegion, Coordinate, RouteError};

/// How the route will be travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransportMode {
    /// Travel by car on drivable roads.
    #[default]
    Driving,
}

impl TransportMode {
    /// Routing-profile name understood by OSRM-style services.
    #[must_use]
    pub const fn profile(self) -> &'static str {
        match self {
            Self::Driving => "driving",
        }
    }
}

/// A request for a route between two points.
///
/// Origin and destination may coincide; providers decide whether such a
/// route exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    /// Where the trip starts.
    pub origin: Coordinate,
    /// Where the trip ends.
    pub destination: Coordinate,
    /// How the trip is travelled.
    pub transport_mode: TransportMode,
}

impl RouteRequest {
    /// Build a driving request.
    ///
    /// # Examples
    /// ```
    /// use ridemap_core::{Coordinate, RouteRequest, TransportMode};
    ///
    /// let a = Coordinate { latitude: 0.0, longitude: 0.0 };
    /// let b = Coordinate { latitude: 1.0, longitude: 1.0 };
    /// let request = RouteRequest::driving(a, b);
    /// assert_eq!(request.transport_mode, TransportMode::Driving);
    /// ```
    #[must_use]
    pub const fn driving(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
            transport_mode: TransportMode::Driving,
        }
    }
}

/// A resolved route.
///
/// The bounding region is derived from the polyline on construction and
/// always encloses every vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    polyline: Vec<Coordinate>,
    bounding_region: BoundingRegion,
    distance_metres: f64,
    expected_travel_time: Duration,
}

impl RouteResult {
    /// Construct a result from an ordered polyline.
    ///
    /// # Errors
    /// Returns [`RouteError::NoRouteFound`] when the polyline is empty.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use ridemap_core::{Coordinate, RouteResult};
    ///
    /// # fn main() -> Result<(), ridemap_core::RouteError> {
    /// let a = Coordinate { latitude: 0.0, longitude: 0.0 };
    /// let b = Coordinate { latitude: 1.0, longitude: 1.0 };
    /// let route = RouteResult::new(vec![a, b], 157_000.0, Duration::from_secs(600))?;
    /// assert!(route.bounding_region().contains(b));
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        polyline: Vec<Coordinate>,
        distance_metres: f64,
        expected_travel_time: Duration,
    ) -> Result<Self, RouteError> {
        let bounding_region =
            BoundingRegion::enclosing(&polyline).ok_or(RouteError::NoRouteFound)?;
        Ok(Self {
            polyline,
            bounding_region,
            distance_metres,
            expected_travel_time,
        })
    }

    /// Build a straight two-point route between the request's endpoints.
    ///
    /// Distance and travel time are left at zero; useful for tests and
    /// offline previews.
    #[must_use]
    pub fn straight_line(request: &RouteRequest) -> Self {
        let polyline = vec![request.origin, request.destination];
        let bounding_region = BoundingRegion::enclosing(&polyline).unwrap_or(BoundingRegion {
            min_latitude: request.origin.latitude,
            min_longitude: request.origin.longitude,
            max_latitude: request.origin.latitude,
            max_longitude: request.origin.longitude,
        });
        Self {
            polyline,
            bounding_region,
            distance_metres: 0.0,
            expected_travel_time: Duration::ZERO,
        }
    }

    /// Ordered vertices of the route.
    #[must_use]
    pub fn polyline(&self) -> &[Coordinate] {
        &self.polyline
    }

    /// Minimal rectangle enclosing the polyline.
    #[must_use]
    pub const fn bounding_region(&self) -> BoundingRegion {
        self.bounding_region
    }

    /// Route length reported by the provider, in metres.
    #[must_use]
    pub const fn distance_metres(&self) -> f64 {
        self.distance_metres
    }

    /// Travel time reported by the provider.
    #[must_use]
    pub const fn expected_travel_time(&self) -> Duration {
        self.expected_travel_time
    }
}
