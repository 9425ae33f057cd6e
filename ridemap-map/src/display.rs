//! The view-state contract the coordinator drives.

use ridemap_core::{Coordinate, LocationFix};

use crate::renderer::MapRenderer;

/// What a screen can be asked to show.
///
/// Implementations decide how to present it; [`MapRenderer`] keeps a
/// headless [`MapSurface`](crate::MapSurface) up to date.
pub trait TripDisplay {
    /// Show the route between two points, replacing any previous one.
    fn show_route(&mut self, origin: Coordinate, destination: Coordinate);

    /// Centre the map on `fix`, or leave it where it is when there is none.
    fn show_centered_map(&mut self, fix: Option<&LocationFix>);
}

impl TripDisplay for MapRenderer {
    fn show_route(&mut self, origin: Coordinate, destination: Coordinate) {
        if let Err(err) = self.draw_route(origin, destination) {
            log::debug!("route from {origin} to {destination} not drawn: {err}");
        }
    }

    fn show_centered_map(&mut self, fix: Option<&LocationFix>) {
        self.center_on(fix);
    }
}
