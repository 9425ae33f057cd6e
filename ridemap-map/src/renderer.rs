//! Route drawing and camera control over a [`MapSurface`].
//!
//! [`MapRenderer::draw_route`] places the annotation pair immediately and
//! resolves the route on a spawned task. Results come back over a channel
//! and are applied on the renderer's own thread, either by awaiting
//! [`MapRenderer::next_completion`] from an event loop or by draining
//! [`MapRenderer::apply_ready`].
//!
//! Every draw call gets a [`RouteTicket`] with a strictly increasing
//! sequence number. Only the result for the newest ticket may touch the
//! overlay; anything older is discarded. Disposing the renderer cancels
//! in-flight requests and ignores every result that still arrives.

use std::fmt;
use std::sync::Arc;

use ridemap_core::{
    Coordinate, LocationFix, ProviderFailureKind, RouteError, RouteProvider, RouteRequest,
    RouteResult,
};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;

use crate::surface::{MapSurface, ROUTE_STYLE, RouteOverlay};

/// Identifies one [`MapRenderer::draw_route`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteTicket(u64);

impl RouteTicket {
    /// Sequence number of the draw call, starting at one.
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RouteTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route #{}", self.0)
    }
}

/// What applying a route completion did to the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// The overlay and viewport now show the route for this ticket.
    Drawn(RouteTicket),
    /// Resolution failed; the previous overlay was left in place.
    Failed {
        /// Draw call that failed.
        ticket: RouteTicket,
        /// Why it failed.
        error: RouteError,
    },
    /// A newer draw call exists; the result was discarded.
    Superseded(RouteTicket),
}

/// Errors returned by [`MapRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RendererError {
    /// Construction happened outside a Tokio runtime.
    #[error("map renderer requires a Tokio runtime")]
    NoRuntime,
    /// The renderer has been disposed and accepts no more work.
    #[error("map renderer has been disposed")]
    Disposed,
}

#[derive(Debug)]
struct Completion {
    ticket: RouteTicket,
    request: RouteRequest,
    result: Result<RouteResult, RouteError>,
}

/// Owns the map surface and keeps it consistent with route results.
pub struct MapRenderer {
    provider: Arc<dyn RouteProvider>,
    runtime: Handle,
    surface: MapSurface,
    sequence: u64,
    outstanding: usize,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    cancel: CancellationToken,
    disposed: bool,
}

impl fmt::Debug for MapRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapRenderer")
            .field("surface", &self.surface)
            .field("sequence", &self.sequence)
            .field("outstanding", &self.outstanding)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl MapRenderer {
    /// Create a renderer that resolves routes on the current Tokio runtime.
    ///
    /// # Errors
    /// Returns [`RendererError::NoRuntime`] when called outside a runtime.
    pub fn new(provider: Arc<dyn RouteProvider>) -> Result<Self, RendererError> {
        let runtime = Handle::try_current().map_err(|_| RendererError::NoRuntime)?;
        Ok(Self::with_handle(provider, runtime))
    }

    /// Create a renderer that resolves routes on `runtime`.
    #[must_use]
    pub fn with_handle(provider: Arc<dyn RouteProvider>, runtime: Handle) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            provider,
            runtime,
            surface: MapSurface::default(),
            sequence: 0,
            outstanding: 0,
            completions_tx,
            completions_rx,
            cancel: CancellationToken::new(),
            disposed: false,
        }
    }

    /// Current surface state.
    #[must_use]
    pub const fn surface(&self) -> &MapSurface {
        &self.surface
    }

    /// Whether any draw call is still waiting for its result.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        !self.disposed && self.outstanding > 0
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Replace the annotations and start resolving a route.
    ///
    /// The origin/destination annotations are in place when this returns.
    /// The overlay and viewport change later, when the result is applied.
    ///
    /// # Errors
    /// Returns [`RendererError::Disposed`] after [`dispose`](Self::dispose).
    pub fn draw_route(
        &mut self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteTicket, RendererError> {
        if self.disposed {
            return Err(RendererError::Disposed);
        }
        self.surface.replace_annotations(origin, destination);

        self.sequence = self.sequence.saturating_add(1);
        let ticket = RouteTicket(self.sequence);
        self.outstanding = self.outstanding.saturating_add(1);

        let request = RouteRequest::driving(origin, destination);
        let provider = Arc::clone(&self.provider);
        let cancel = self.cancel.clone();
        let completions = self.completions_tx.clone();
        self.runtime.spawn(async move {
            let mut resolution =
                tokio::spawn(async move { provider.resolve_route(&request).await });
            let joined = tokio::select! {
                () = cancel.cancelled() => None,
                output = &mut resolution => Some(output),
            };
            let result = match joined {
                Some(answer) => answer.unwrap_or_else(|err| Err(join_failure(&err))),
                None => {
                    resolution.abort();
                    Err(RouteError::Cancelled)
                }
            };
            let completion = Completion {
                ticket,
                request,
                result,
            };
            if completions.send(completion).is_err() {
                log::debug!("renderer dropped before {ticket} resolved");
            }
        });
        log::debug!("requested {ticket} from {origin} to {destination}");
        Ok(ticket)
    }

    /// Centre the viewport on `fix` with a fixed span.
    ///
    /// Without a fix nothing changes; the absence is logged, not raised.
    pub fn center_on(&mut self, fix: Option<&LocationFix>) {
        if self.disposed {
            log::debug!("ignoring centre request on disposed renderer");
            return;
        }
        match fix {
            Some(current) => self.surface.center_on(current.coordinate),
            None => log::info!("current location unavailable; viewport unchanged"),
        }
    }

    /// Wait for the next route result and apply it.
    ///
    /// Returns `None` straight away when nothing is pending or the renderer
    /// has been disposed. Cancel-safe: dropping the future loses nothing.
    pub async fn next_completion(&mut self) -> Option<RenderOutcome> {
        if !self.has_pending() {
            return None;
        }
        let completion = self.completions_rx.recv().await?;
        self.apply(completion)
    }

    /// Apply every result that has already arrived, without waiting.
    pub fn apply_ready(&mut self) -> Vec<RenderOutcome> {
        let mut outcomes = Vec::new();
        while self.has_pending() {
            let Ok(completion) = self.completions_rx.try_recv() else {
                break;
            };
            outcomes.extend(self.apply(completion));
        }
        outcomes
    }

    /// Stop accepting work and ignore every result still in flight.
    ///
    /// The surface keeps its last state. Calling this twice is harmless.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.outstanding = 0;
        self.cancel.cancel();
        self.completions_rx.close();
        log::debug!("map renderer disposed after {} draw calls", self.sequence);
    }

    fn apply(&mut self, completion: Completion) -> Option<RenderOutcome> {
        if self.disposed {
            return None;
        }
        self.outstanding = self.outstanding.saturating_sub(1);

        let Completion {
            ticket,
            request,
            result,
        } = completion;
        if ticket.sequence() != self.sequence {
            log::debug!("discarding {ticket}; route #{} is current", self.sequence);
            return Some(RenderOutcome::Superseded(ticket));
        }

        Some(match result {
            Ok(route) => {
                self.surface.replace_overlay(RouteOverlay {
                    ticket,
                    request,
                    route,
                    style: ROUTE_STYLE,
                });
                RenderOutcome::Drawn(ticket)
            }
            Err(error) => {
                log::warn!("{ticket} failed: {error}");
                RenderOutcome::Failed { ticket, error }
            }
        })
    }
}

/// A resolution task that died without answering still completes its ticket.
fn join_failure(err: &JoinError) -> RouteError {
    if err.is_cancelled() {
        RouteError::Cancelled
    } else {
        RouteError::provider(ProviderFailureKind::Internal, err.to_string())
    }
}

impl Drop for MapRenderer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
