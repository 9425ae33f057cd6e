//! Deterministic test doubles for routing and location.
//!
//! - [`StubRouteProvider`] answers every request immediately with a fixed
//!   outcome.
//! - [`GatedRouteProvider`] parks every request until the test releases it,
//!   so tests control the order in which results arrive.
//! - [`ScriptedLocationService`] plays back fixes pushed through a
//!   [`LocationFeed`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::{Notify, mpsc, oneshot};

use crate::{
    Coordinate, LocationError, LocationFix, LocationService, LocationUpdates, PermissionState,
    RouteError, RouteProvider, RouteRequest, RouteResult,
};

/// Stub `RouteProvider` returning a pre-configured outcome.
///
/// # Example
///
/// ```
/// use ridemap_core::test_support::StubRouteProvider;
/// use ridemap_core::{Coordinate, RouteError, RouteProvider, RouteRequest};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let provider = StubRouteProvider::with_error(RouteError::NoRouteFound);
/// let a = Coordinate { latitude: 0.0, longitude: 0.0 };
/// let result = provider.resolve_route(&RouteRequest::driving(a, a)).await;
/// assert_eq!(result, Err(RouteError::NoRouteFound));
/// # }
/// ```
#[derive(Debug)]
pub struct StubRouteProvider {
    response: StubResponse,
    calls: AtomicUsize,
}

#[derive(Debug, Clone)]
enum StubResponse {
    StraightLine,
    Route(RouteResult),
    Error(RouteError),
}

impl StubRouteProvider {
    /// Answer every request with a two-point route between its endpoints.
    #[must_use]
    pub const fn straight_line() -> Self {
        Self::from_response(StubResponse::StraightLine)
    }

    /// Answer every request with `route`, whatever the endpoints.
    #[must_use]
    pub const fn with_route(route: RouteResult) -> Self {
        Self::from_response(StubResponse::Route(route))
    }

    /// Fail every request with `error`.
    #[must_use]
    pub const fn with_error(error: RouteError) -> Self {
        Self::from_response(StubResponse::Error(error))
    }

    const fn from_response(response: StubResponse) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of requests resolved so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RouteProvider for StubRouteProvider {
    async fn resolve_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            StubResponse::StraightLine => Ok(RouteResult::straight_line(request)),
            StubResponse::Route(route) => Ok(route.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

type Reply = Result<RouteResult, RouteError>;

#[derive(Debug, Default)]
struct GateState {
    requests: Vec<RouteRequest>,
    replies: Vec<Option<oneshot::Sender<Reply>>>,
}

/// `RouteProvider` whose requests stay pending until released.
///
/// Requests are numbered in arrival order starting at zero. Clones share
/// the same gates, so a test keeps one clone and hands the other to the
/// code under test. A request whose gate is dropped unreleased resolves to
/// [`RouteError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct GatedRouteProvider {
    state: Arc<Mutex<GateState>>,
    arrived: Arc<Notify>,
}

impl GatedRouteProvider {
    /// Create a provider with no pending requests.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn received(&self) -> usize {
        self.lock().requests.len()
    }

    /// Wait until at least `count` requests have arrived.
    pub async fn wait_for_requests(&self, count: usize) {
        loop {
            let arrived = self.arrived.notified();
            if self.received() >= count {
                return;
            }
            arrived.await;
        }
    }

    /// Resolve request `index` with a straight line between its endpoints.
    ///
    /// Waits for the request to arrive first. Returns `false` when the
    /// caller stopped waiting for the answer or it was already released.
    #[must_use]
    pub async fn release_with_route(&self, index: usize) -> bool {
        self.wait_for_requests(index.saturating_add(1)).await;
        let request = self.lock().requests.get(index).copied();
        match request {
            Some(request) => self.send(index, Ok(RouteResult::straight_line(&request))),
            None => false,
        }
    }

    /// Resolve request `index` with `error`.
    ///
    /// Waits for the request to arrive first. Returns `false` when the
    /// caller stopped waiting for the answer or it was already released.
    #[must_use]
    pub async fn release_with_error(&self, index: usize, error: RouteError) -> bool {
        self.wait_for_requests(index.saturating_add(1)).await;
        self.send(index, Err(error))
    }

    fn send(&self, index: usize, reply: Reply) -> bool {
        let sender = self
            .lock()
            .replies
            .get_mut(index)
            .and_then(Option::take);
        sender.is_some_and(|tx| tx.send(reply).is_ok())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RouteProvider for GatedRouteProvider {
    async fn resolve_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError> {
        let (tx, rx) = oneshot::channel();
        {
            let mut state = self.lock();
            state.requests.push(*request);
            state.replies.push(Some(tx));
        }
        self.arrived.notify_waiters();
        rx.await.unwrap_or(Err(RouteError::Cancelled))
    }
}

/// `LocationService` driven by a test through a [`LocationFeed`].
#[derive(Debug)]
pub struct ScriptedLocationService {
    status: PermissionState,
    grant: PermissionState,
    updates: Option<LocationUpdates>,
    prompts: Arc<AtomicUsize>,
}

/// Test-side handle for pushing fixes into a [`ScriptedLocationService`].
#[derive(Debug, Clone)]
pub struct LocationFeed {
    sender: mpsc::UnboundedSender<Vec<LocationFix>>,
    prompts: Arc<AtomicUsize>,
}

impl ScriptedLocationService {
    /// Service starting in `status` that moves to `grant` when asked for
    /// access from `NotDetermined`.
    #[must_use]
    pub fn new(status: PermissionState, grant: PermissionState) -> (Self, LocationFeed) {
        let (sender, updates) = mpsc::unbounded_channel();
        let prompts = Arc::new(AtomicUsize::new(0));
        let service = Self {
            status,
            grant,
            updates: Some(updates),
            prompts: Arc::clone(&prompts),
        };
        (service, LocationFeed { sender, prompts })
    }

    /// Service that is already authorised.
    #[must_use]
    pub fn authorized() -> (Self, LocationFeed) {
        Self::new(PermissionState::Authorized, PermissionState::Authorized)
    }
}

impl LocationService for ScriptedLocationService {
    fn authorization_status(&self) -> PermissionState {
        self.status
    }

    fn request_authorization(&mut self) -> PermissionState {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        if self.status == PermissionState::NotDetermined {
            self.status = self.grant;
        }
        self.status
    }

    fn start_updates(&mut self) -> Result<LocationUpdates, LocationError> {
        if !self.status.is_authorized() {
            return Err(LocationError::PermissionDenied);
        }
        self.updates.take().ok_or(LocationError::AlreadyStreaming)
    }
}

impl LocationFeed {
    /// Deliver a single-fix batch. Returns `false` once the stream is gone.
    #[must_use]
    pub fn send_fix(&self, coordinate: Coordinate) -> bool {
        self.send_batch(vec![LocationFix::now(coordinate)])
    }

    /// Deliver a batch as the platform would. Returns `false` once the
    /// stream is gone.
    #[must_use]
    pub fn send_batch(&self, batch: Vec<LocationFix>) -> bool {
        self.sender.send(batch).is_ok()
    }

    /// Deliver a callback that carried no fix.
    #[must_use]
    pub fn send_empty(&self) -> bool {
        self.send_batch(Vec::new())
    }

    /// Number of times the service was asked for access.
    #[must_use]
    pub fn authorization_prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}
