#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for `RouteProvider` implementations.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tokio::runtime::Runtime;
use ridemap_core::{
    Coordinate, RouteError, RouteProvider, RouteRequest, RouteResult,
    test_support::StubRouteProvider,
};

/// Result cell holding the outcome of a route request.
type ResultCell = RefCell<Option<Result<RouteResult, RouteError>>>;

fn lagoa_to_campus() -> RouteRequest {
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

#[fixture]
fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("build Tokio runtime")
}

#[fixture]
fn provider() -> RefCell<Option<StubRouteProvider>> {
    RefCell::new(None)
}

#[fixture]
fn result() -> ResultCell {
    RefCell::new(None)
}

#[given("a provider returning straight-line routes")]
fn given_straight_line(#[from(provider)] provider: &RefCell<Option<StubRouteProvider>>) {
    *provider.borrow_mut() = Some(StubRouteProvider::straight_line());
}

#[given("a provider that finds no route")]
fn given_no_route(#[from(provider)] provider: &RefCell<Option<StubRouteProvider>>) {
    *provider.borrow_mut() = Some(StubRouteProvider::with_error(RouteError::NoRouteFound));
}

#[when("I request a route from the Lagoa to the university campus")]
fn request_route(
    #[from(runtime)] runtime: &Runtime,
    #[from(provider)] provider: &RefCell<Option<StubRouteProvider>>,
    #[from(result)] result: &ResultCell,
) {
    let guard = provider.borrow();
    let stub = guard.as_ref().expect("provider must be initialised");
    let request = lagoa_to_campus();
    *result.borrow_mut() = Some(runtime.block_on(stub.resolve_route(&request)));
}

#[then("a polyline joining both coordinates is returned")]
fn then_polyline(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    let route = borrowed
        .as_ref()
        .expect("a request was made")
        .as_ref()
        .expect("expected Ok result");
    let request = lagoa_to_campus();
    assert_eq!(route.polyline().first(), Some(&request.origin));
    assert_eq!(route.polyline().last(), Some(&request.destination));
}

#[then("the bounding region contains both coordinates")]
fn then_bounds(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    let route = borrowed
        .as_ref()
        .expect("a request was made")
        .as_ref()
        .expect("expected Ok result");
    let request = lagoa_to_campus();
    let region = route.bounding_region();
    assert!(region.contains(request.origin), "origin outside {region:?}");
    assert!(
        region.contains(request.destination),
        "destination outside {region:?}"
    );
}

#[then("a no-route error is returned")]
fn then_no_route(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    assert!(
        matches!(&*borrowed, Some(Err(RouteError::NoRouteFound))),
        "expected NoRouteFound, got {borrowed:?}"
    );
}

#[then("the provider was asked exactly once")]
fn then_single_call(#[from(provider)] provider: &RefCell<Option<StubRouteProvider>>) {
    let guard = provider.borrow();
    let stub = guard.as_ref().expect("provider must be initialised");
    assert_eq!(stub.calls(), 1);
}

#[scenario(path = "tests/features/route_provider.feature", index = 0)]
fn route_resolved(
    runtime: Runtime,
    provider: RefCell<Option<StubRouteProvider>>,
    result: ResultCell,
) {
    let _ = (runtime, provider, result);
}

#[scenario(path = "tests/features/route_provider.feature", index = 1)]
fn no_route_reported(
    runtime: Runtime,
    provider: RefCell<Option<StubRouteProvider>>,
    result: ResultCell,
) {
    let _ = (runtime, provider, result);
}
