//! Map presentation for the ridemap route-estimation engine.
//!
//! - [`MapRenderer`] draws the origin/destination pair and the resolved
//!   route onto a headless [`MapSurface`], applying only the newest result.
//! - [`LocationTracker`] keeps the latest device fix from a
//!   [`LocationService`](ridemap_core::LocationService).
//! - [`TripCoordinator`] wires both together with estimate events and
//!   forwards rider intents to scoped [`Subscription`]s.
//!
//! Route resolution runs on Tokio tasks; every surface mutation happens on
//! the thread that owns the renderer.

#![forbid(unsafe_code)]

mod coordinator;
mod display;
mod renderer;
mod subscription;
mod surface;
mod tracker;

pub use coordinator::{TripCoordinator, TripIntent};
pub use display::TripDisplay;
pub use renderer::{MapRenderer, RenderOutcome, RendererError, RouteTicket};
pub use subscription::{IntentListeners, Subscription};
pub use surface::{
    CENTER_SPAN, CoordinateSpan, EdgeInsets, MapSurface, MarkerIcon, OverlayLevel, OverlayStyle,
    PADDING, ROUTE_STYLE, Rgb, RouteOverlay, Viewport,
};
pub use tracker::LocationTracker;
