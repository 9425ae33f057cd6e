//! OSRM API response types for the Route service.
//!
//! This module provides deserialisation types for the OSRM Route API
//! response when requested with `overview=full&geometries=geojson`. Each
//! route carries a GeoJSON `LineString` whose positions are `[lon, lat]`.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM Route API response.
///
/// The response contains one or more routes on success or an error message
/// on failure. The `code` field indicates the response status.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route between the coordinates
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"NoSegment"` - A coordinate could not be snapped to the network
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first. Absent on error.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Check if OSRM reported that no route exists.
    ///
    /// `NoSegment` means an endpoint could not be snapped to the road
    /// network, so no route exists either.
    #[must_use]
    pub fn is_no_route(&self) -> bool {
        matches!(self.code.as_str(), "NoRoute" | "NoSegment")
    }
}

/// One route from the `routes` array.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Route length in metres.
    pub distance: f64,
    /// Expected travel time in seconds.
    pub duration: f64,
    /// Full-resolution route geometry.
    pub geometry: LineGeometry,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct LineGeometry {
    /// Positions as `[longitude, latitude]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 9812.4,
                "duration": 903.1,
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-48.6213535, -27.5521413], [-48.551487, -27.5962788]]
                }
            }],
            "waypoints": []
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        assert!(response.message.is_none());
        let route = response.routes.first().expect("should have a route");
        assert_eq!(route.geometry.coordinates.len(), 2);
        assert_eq!(
            route.geometry.coordinates.first(),
            Some(&[-48.621_353_5, -27.552_141_3])
        );
    }

    #[test]
    fn deserialise_no_route_response() {
        let json = r#"{
            "code": "NoRoute",
            "message": "Impossible route between points"
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert!(response.is_no_route());
        assert!(response.routes.is_empty());
    }
}
