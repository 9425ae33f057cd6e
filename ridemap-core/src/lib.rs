//! Core domain types for the ridemap route-estimation engine.
//!
//! Responsibilities:
//! - Model coordinates, route requests and resolved routes.
//! - Define the [`RouteProvider`] and [`LocationService`] seams that
//!   adapters implement.
//! - Describe the error taxonomy shared by the renderer and the adapters.
//!
//! Constructors that take external input return `Result` so invalid
//! values are caught at the boundary.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod annotation;
mod coordinate;
mod location;
mod route;
pub mod routing;
mod trip;

#[doc(hidden)]
pub mod test_support;

pub use annotation::{Annotation, AnnotationLabel};
pub use coordinate::{BoundingRegion, Coordinate, CoordinateError};
pub use location::{LocationError, LocationFix, LocationService, LocationUpdates, PermissionState};
pub use route::{RouteRequest, RouteResult, TransportMode};
pub use routing::{ProviderFailureKind, RouteError, RouteProvider};
pub use trip::{DriverOffer, TripEstimate};
