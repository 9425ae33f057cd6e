#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for [`HttpRouteProvider`] against a local HTTP stub.
//!
//! Each test binds a one-shot server on the loopback interface that
//! answers with a canned OSRM document, so no running OSRM service is
//! required.

use std::time::Duration;

use ridemap_core::{Coordinate, ProviderFailureKind, RouteError, RouteProvider, RouteRequest};
use ridemap_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
use rstest::{fixture, rstest};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const ROUTE_BODY: &str = r#"{
    "code": "Ok",
    "routes": [{
        "distance": 9812.4,
        "duration": 903.1,
        "geometry": {
            "type": "LineString",
            "coordinates": [
                [-48.6213535, -27.5521413],
                [-48.5901, -27.5702],
                [-48.551487, -27.5962788]
            ]
        }
    }]
}"#;

const NO_ROUTE_BODY: &str = r#"{"code":"NoRoute","message":"Impossible route between points"}"#;

#[fixture]
fn request() -> RouteRequest {
    RouteRequest::driving(
        Coordinate {
            latitude: -27.552_141_3,
            longitude: -48.621_353_5,
        },
        Coordinate {
            latitude: -27.596_278_8,
            longitude: -48.551_487,
        },
    )
}

/// Serve a single HTTP response and return the base URL plus a handle
/// yielding the raw request line.
async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept connection");
        let mut buffer = vec![0_u8; 4096];
        let read = socket.read(&mut buffer).await.expect("read request");
        let request = String::from_utf8_lossy(buffer.get(..read).unwrap_or_default()).into_owned();
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        socket.shutdown().await.expect("shutdown socket");
        request.lines().next().unwrap_or_default().to_owned()
    });
    (format!("http://{addr}"), handle)
}

#[rstest]
#[tokio::test]
async fn resolves_route_geometry(request: RouteRequest) {
    let (base_url, server) = serve_once("200 OK", ROUTE_BODY).await;
    let provider = HttpRouteProvider::new(base_url).expect("provider should build");

    let route = provider
        .resolve_route(&request)
        .await
        .expect("route should resolve");

    assert_eq!(route.polyline().len(), 3);
    assert_eq!(route.polyline().first(), Some(&request.origin));
    assert_eq!(route.polyline().last(), Some(&request.destination));
    assert!(route.bounding_region().contains(request.origin));
    assert!(route.bounding_region().contains(request.destination));

    let request_line = server.await.expect("server task");
    assert!(
        request_line.starts_with(
            "GET /route/v1/driving/-48.6213535,-27.5521413;-48.551487,-27.5962788?overview=full&geometries=geojson"
        ),
        "unexpected request line {request_line:?}"
    );
}

#[rstest]
#[tokio::test]
async fn maps_no_route_behind_bad_request(request: RouteRequest) {
    let (base_url, _server) = serve_once("400 Bad Request", NO_ROUTE_BODY).await;
    let provider = HttpRouteProvider::new(base_url).expect("provider should build");

    let err = provider
        .resolve_route(&request)
        .await
        .expect_err("no route expected");

    assert_eq!(err, RouteError::NoRouteFound);
}

#[rstest]
#[tokio::test]
async fn reports_http_status_for_opaque_errors(request: RouteRequest) {
    let (base_url, _server) = serve_once("503 Service Unavailable", "busy").await;
    let provider = HttpRouteProvider::new(base_url).expect("provider should build");

    let err = provider
        .resolve_route(&request)
        .await
        .expect_err("failure expected");

    assert!(
        matches!(
            err,
            RouteError::ProviderFailure {
                kind: ProviderFailureKind::Http { status: 503 },
                ..
            }
        ),
        "expected HTTP 503 failure, got {err:?}"
    );
}

#[rstest]
#[tokio::test]
async fn reports_network_failure_when_nothing_listens(request: RouteRequest) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    let provider = HttpRouteProvider::new(format!("http://{addr}")).expect("provider should build");

    let err = provider
        .resolve_route(&request)
        .await
        .expect_err("failure expected");

    assert!(
        matches!(
            err,
            RouteError::ProviderFailure {
                kind: ProviderFailureKind::Network,
                ..
            }
        ),
        "expected network failure, got {err:?}"
    );
}

#[rstest]
#[tokio::test]
async fn reports_timeout_when_server_stalls(request: RouteRequest) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    let _stall = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.expect("accept connection");
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(socket);
    });
    let config = HttpRouteProviderConfig::new(format!("http://{addr}"))
        .with_timeout(Duration::from_millis(200));
    let provider = HttpRouteProvider::with_config(config).expect("provider should build");

    let err = provider
        .resolve_route(&request)
        .await
        .expect_err("timeout expected");

    assert!(
        matches!(
            err,
            RouteError::ProviderFailure {
                kind: ProviderFailureKind::Timeout { .. },
                ..
            }
        ),
        "expected timeout, got {err:?}"
    );
}
