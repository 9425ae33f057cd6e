//! Route provider trait for origin/destination pairs.

use async_trait::async_trait;

use crate::{RouteRequest, RouteResult};

use super::error::RouteError;

/// Resolve a route for a single origin/destination pair.
///
/// Each call is independent: implementations must not queue, merge or
/// retry requests. A failure is reported once and the caller decides what
/// to do next. Implementations are `Send + Sync` so resolution can run on
/// a spawned task while the caller keeps its own state on one thread.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use ridemap_core::{Coordinate, RouteError, RouteProvider, RouteRequest, RouteResult};
///
/// struct StraightLine;
///
/// #[async_trait]
/// impl RouteProvider for StraightLine {
///     async fn resolve_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError> {
///         Ok(RouteResult::straight_line(request))
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), RouteError> {
/// let a = Coordinate { latitude: 0.0, longitude: 0.0 };
/// let b = Coordinate { latitude: 1.0, longitude: 1.0 };
/// let route = StraightLine.resolve_route(&RouteRequest::driving(a, b)).await?;
/// assert_eq!(route.polyline().len(), 2);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Resolve `request` into a polyline route.
    ///
    /// Implementations return `Err(RouteError::NoRouteFound)` when the
    /// service has no path between the endpoints.
    async fn resolve_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError>;
}
