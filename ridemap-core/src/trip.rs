//! Trip estimates and the driver offers shown alongside them.

use crate::Coordinate;

/// A driver's offer for the estimated trip.
///
/// All fields are display strings; pricing and rating are not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverOffer {
    /// Driver's display name.
    pub name: String,
    /// Short introduction written by the driver.
    pub introduction: String,
    /// Vehicle description.
    pub vehicle: String,
    /// Rating as displayed, e.g. `"4.9/5"`.
    pub rating: String,
    /// Price as displayed, e.g. `"R$ 25,00"`.
    pub price: String,
}

/// The estimate-ready event: where the trip goes and who offers to drive.
#[derive(Debug, Clone, PartialEq)]
pub struct TripEstimate {
    /// Pick-up point.
    pub origin: Coordinate,
    /// Drop-off point.
    pub destination: Coordinate,
    /// Offers in display order.
    pub offers: Vec<DriverOffer>,
}

impl TripEstimate {
    /// Build an estimate with no offers attached.
    #[must_use]
    pub const fn route_only(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
            offers: Vec::new(),
        }
    }
}
