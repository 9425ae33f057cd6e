//! HTTP-based `RouteProvider` using OSRM's Route API.
//!
//! This module provides [`HttpRouteProvider`], an implementation of the
//! [`RouteProvider`] trait that resolves driving routes from an OSRM
//! routing service via HTTP.
//!
//! # Example
//!
//! ```no_run
//! use ridemap_data::routing::HttpRouteProvider;
//! use ridemap_core::{Coordinate, RouteProvider, RouteRequest};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = HttpRouteProvider::new("http://localhost:5000")?;
//! let request = RouteRequest::driving(
//!     Coordinate::new(-27.552_141_3, -48.621_353_5)?,
//!     Coordinate::new(-27.596_278_8, -48.551_487)?,
//! );
//!
//! let route = provider.resolve_route(&request).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use ridemap_core::{
    Coordinate, ProviderFailureKind, RouteError, RouteProvider, RouteRequest, RouteResult,
};
use thiserror::Error;

use super::osrm::{OsrmRoute, RouteResponse};

/// Error type for [`HttpRouteProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "ridemap-routing/0.1";

/// Default base URL for a locally hosted OSRM server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpRouteProvider`].
#[derive(Debug, Clone)]
pub struct HttpRouteProviderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpRouteProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpRouteProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP-based route provider using the OSRM Route API.
///
/// Every call to [`RouteProvider::resolve_route`] performs exactly one GET
/// request. The first route in the response is used; alternatives are
/// ignored. Nothing is cached and failures are not retried.
#[derive(Debug, Clone)]
pub struct HttpRouteProvider {
    client: Client,
    config: HttpRouteProviderConfig,
}

impl HttpRouteProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for the OSRM service (e.g., `"http://localhost:5000"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRouteProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: HttpRouteProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// Configuration the provider was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpRouteProviderConfig {
        &self.config
    }

    /// Build the OSRM Route API URL for the given request.
    ///
    /// The URL format is:
    /// `{base_url}/route/v1/{profile}/{lon},{lat};{lon},{lat}?overview=full&geometries=geojson`.
    fn build_route_url(&self, request: &RouteRequest) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            request.transport_mode.profile(),
            request.origin.longitude,
            request.origin.latitude,
            request.destination.longitude,
            request.destination.latitude,
        )
    }

    /// Convert a reqwest error to a `RouteError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RouteError {
        if error.is_timeout() {
            return RouteError::provider(
                ProviderFailureKind::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                },
                format!("request to {url} timed out"),
            );
        }

        if let Some(status) = error.status() {
            return RouteError::provider(
                ProviderFailureKind::Http {
                    status: status.as_u16(),
                },
                error.to_string(),
            );
        }

        RouteError::provider(ProviderFailureKind::Network, format!("{url}: {error}"))
    }

    /// Decode a response body, falling back to the HTTP status when the
    /// body is not an OSRM document.
    ///
    /// OSRM reports `NoRoute` and query errors with a 400 status and a JSON
    /// body, so the body is consulted before the status.
    fn decode_body(status: StatusCode, body: &[u8]) -> Result<RouteResult, RouteError> {
        match serde_json::from_slice::<RouteResponse>(body) {
            Ok(response) => Self::convert_response(response),
            Err(err) if status.is_success() => Err(RouteError::provider(
                ProviderFailureKind::Parse,
                err.to_string(),
            )),
            Err(_) => Err(RouteError::provider(
                ProviderFailureKind::Http {
                    status: status.as_u16(),
                },
                status.to_string(),
            )),
        }
    }

    /// Convert an OSRM response to a `RouteResult`.
    fn convert_response(response: RouteResponse) -> Result<RouteResult, RouteError> {
        if response.is_no_route() {
            return Err(RouteError::NoRouteFound);
        }
        if !response.is_ok() {
            return Err(RouteError::provider(
                ProviderFailureKind::Service {
                    code: response.code,
                },
                response.message.unwrap_or_default(),
            ));
        }

        let Some(route) = response.routes.into_iter().next() else {
            return Err(RouteError::NoRouteFound);
        };
        Self::convert_route(route)
    }

    fn convert_route(route: OsrmRoute) -> Result<RouteResult, RouteError> {
        let polyline = route
            .geometry
            .coordinates
            .into_iter()
            .map(|[longitude, latitude]| Coordinate::new(latitude, longitude))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| RouteError::provider(ProviderFailureKind::Parse, err.to_string()))?;

        let travel_time = Duration::try_from_secs_f64(route.duration).map_err(|err| {
            RouteError::provider(
                ProviderFailureKind::Parse,
                format!("invalid route duration {}: {err}", route.duration),
            )
        })?;

        RouteResult::new(polyline, route.distance, travel_time)
    }
}

#[async_trait]
impl RouteProvider for HttpRouteProvider {
    async fn resolve_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError> {
        let url = self.build_route_url(request);
        log::debug!("requesting route from {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        Self::decode_body(status, &body)
    }
}
