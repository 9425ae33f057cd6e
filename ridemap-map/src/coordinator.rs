//! Screen-level controller for the trip estimate map.
//!
//! [`TripCoordinator`] wires location fixes and estimate-ready events into
//! the renderer and forwards the rider's "estimate trip" intent to whoever
//! subscribed. It owns the renderer and the tracker; listeners registered
//! through [`TripCoordinator::on_estimate_trip_requested`] live only as long
//! as their [`Subscription`] guard.

use ridemap_core::{
    Coordinate, DriverOffer, LocationError, LocationFix, LocationService, TripEstimate,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::display::TripDisplay;
use crate::renderer::{MapRenderer, RenderOutcome};
use crate::subscription::{IntentListeners, Subscription};
use crate::surface::MapSurface;
use crate::tracker::LocationTracker;

/// The rider asked for a trip estimate between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripIntent {
    /// Pick-up point.
    pub origin: Coordinate,
    /// Drop-off point.
    pub destination: Coordinate,
}

/// Sequences location and estimate events into map updates.
#[derive(Debug)]
pub struct TripCoordinator<S> {
    renderer: MapRenderer,
    tracker: LocationTracker<S>,
    offers: Vec<DriverOffer>,
    intents: IntentListeners<TripIntent>,
}

impl<S: LocationService> TripCoordinator<S> {
    /// Build the coordinator and start following the device if allowed.
    ///
    /// Asks for location access when it has not been decided yet. A refusal
    /// is logged and the map simply does not follow the device.
    #[must_use]
    pub fn new(renderer: MapRenderer, service: S) -> Self {
        let mut tracker = LocationTracker::new(service);
        let permission = tracker.request_authorization();
        if permission.is_authorized() {
            if let Err(err) = tracker.start_updating() {
                log::warn!("location updates unavailable: {err}");
            }
        } else {
            log::info!("location permission is {permission:?}; map will not follow the device");
        }
        Self {
            renderer,
            tracker,
            offers: Vec::new(),
            intents: IntentListeners::new(),
        }
    }

    /// Current surface state.
    #[must_use]
    pub const fn surface(&self) -> &MapSurface {
        self.renderer.surface()
    }

    /// The renderer this coordinator drives.
    #[must_use]
    pub const fn renderer(&self) -> &MapRenderer {
        &self.renderer
    }

    /// The location tracker.
    #[must_use]
    pub const fn tracker(&self) -> &LocationTracker<S> {
        &self.tracker
    }

    /// Show the route for an estimate and keep its offers for display.
    pub fn handle_estimate(&mut self, estimate: TripEstimate) {
        let TripEstimate {
            origin,
            destination,
            offers,
        } = estimate;
        log::debug!("estimate ready with {} offers", offers.len());
        self.offers = offers;
        self.renderer.show_route(origin, destination);
    }

    /// Centre on a new fix while location access is granted.
    pub fn handle_fix(&mut self, fix: LocationFix) {
        self.show_centered_map(Some(&fix));
    }

    /// Centre on the most recent fix, if there is one.
    pub fn show_current_location(&mut self) {
        let latest = self.tracker.latest().copied();
        self.show_centered_map(latest.as_ref());
    }

    /// Register `handler` for estimate requests.
    ///
    /// The handler is called until the returned guard is dropped.
    pub fn on_estimate_trip_requested(
        &self,
        handler: impl Fn(&TripIntent) + 'static,
    ) -> Subscription {
        self.intents.subscribe(handler)
    }

    /// Forward the rider's request to every live listener.
    ///
    /// Returns how many listeners received it.
    #[must_use]
    pub fn request_trip_estimate(&self, origin: Coordinate, destination: Coordinate) -> usize {
        let delivered = self.intents.emit(&TripIntent {
            origin,
            destination,
        });
        if delivered == 0 {
            log::debug!("estimate requested with no listener attached");
        }
        delivered
    }

    /// Number of driver offers on display.
    #[must_use]
    pub fn offer_count(&self) -> usize {
        self.offers.len()
    }

    /// Offer shown in `row`.
    #[must_use]
    pub fn offer_at(&self, row: usize) -> Option<&DriverOffer> {
        self.offers.get(row)
    }

    /// All offers in display order.
    #[must_use]
    pub fn offers(&self) -> &[DriverOffer] {
        &self.offers
    }

    /// Drive the screen until shutdown or until there is nothing left to do.
    ///
    /// Applies location fixes, estimate events and route results as they
    /// arrive. The loop ends when `shutdown` fires, or when `estimates` is
    /// closed and no route is pending. The renderer is disposed on exit and
    /// the final surface returned.
    pub async fn run(
        mut self,
        mut estimates: mpsc::Receiver<TripEstimate>,
        shutdown: CancellationToken,
    ) -> MapSurface {
        let mut estimates_open = true;
        loop {
            let pending = self.renderer.has_pending();
            if !estimates_open && !pending {
                break;
            }
            let streaming = self.tracker.is_streaming();
            tokio::select! {
                biased;
                () = shutdown.cancelled() => {
                    log::debug!("trip coordinator shutting down");
                    break;
                }
                outcome = self.renderer.next_completion(), if pending => {
                    log_outcome(outcome.as_ref());
                }
                next = self.tracker.next_fix(), if streaming => {
                    if let Some(fix) = next {
                        self.handle_fix(fix);
                    }
                }
                received = estimates.recv(), if estimates_open => match received {
                    Some(estimate) => self.handle_estimate(estimate),
                    None => estimates_open = false,
                },
            }
        }
        self.renderer.dispose();
        self.renderer.surface().clone()
    }
}

impl<S: LocationService> TripDisplay for TripCoordinator<S> {
    fn show_route(&mut self, origin: Coordinate, destination: Coordinate) {
        self.renderer.show_route(origin, destination);
    }

    /// Centring is a no-op unless location access is granted.
    fn show_centered_map(&mut self, fix: Option<&LocationFix>) {
        if !self.tracker.permission().is_authorized() {
            log::debug!("not centring: {}", LocationError::PermissionDenied);
            return;
        }
        self.renderer.show_centered_map(fix);
    }
}

fn log_outcome(outcome: Option<&RenderOutcome>) {
    match outcome {
        Some(RenderOutcome::Drawn(ticket)) => log::debug!("{ticket} drawn"),
        Some(RenderOutcome::Superseded(ticket)) => log::debug!("{ticket} superseded"),
        // Failures were already logged by the renderer.
        Some(RenderOutcome::Failed { .. }) | None => {}
    }
}
