//! Facade crate for the ridemap trip-estimate map.
//!
//! This crate re-exports the core domain types and the map screen, and
//! exposes the OSRM route provider behind a feature flag.

#![forbid(unsafe_code)]

pub use ridemap_core::{
    Annotation, AnnotationLabel, BoundingRegion, Coordinate, CoordinateError, DriverOffer,
    LocationError, LocationFix, LocationService, LocationUpdates, PermissionState,
    ProviderFailureKind, RouteError, RouteProvider, RouteRequest, RouteResult, TransportMode,
    TripEstimate,
};

pub use ridemap_map::{
    MapRenderer, MapSurface, RenderOutcome, RendererError, RouteOverlay, RouteTicket,
    Subscription, TripCoordinator, TripDisplay, TripIntent, Viewport,
};

#[cfg(feature = "routing-osrm")]
pub use ridemap_data::routing::{HttpRouteProvider, HttpRouteProviderConfig, ProviderBuildError};
