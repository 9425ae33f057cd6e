//! Unit tests for the JSON estimate report.

use super::helpers::{CAMPUS, LAGOA, sample_offers};
use crate::report::{EstimateReport, ViewportReport};
use ridemap_core::test_support::StubRouteProvider;
use ridemap_core::{AnnotationLabel, BoundingRegion, Coordinate};
use ridemap_map::{CENTER_SPAN, CoordinateSpan, EdgeInsets, MapRenderer, PADDING, Viewport};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

fn coordinate(raw: &str) -> Coordinate {
    raw.parse().expect("fixture coordinate should parse")
}

#[rstest]
fn fit_route_viewport_reports_uniform_padding() {
    let bounds = BoundingRegion::enclosing(&[coordinate(LAGOA), coordinate(CAMPUS)])
        .expect("two points enclose a region");
    let viewport = Viewport::FitRoute {
        bounds,
        padding: EdgeInsets::uniform(PADDING),
    };

    let report = ViewportReport::from(&viewport);

    assert_eq!(
        report,
        ViewportReport::FitRoute {
            bounds,
            padding: PADDING,
        }
    );
}

#[rstest]
fn centred_viewport_serialises_with_kind_tag() {
    let viewport = Viewport::Centered {
        center: Coordinate {
            latitude: 1.0,
            longitude: 2.0,
        },
        span: CoordinateSpan {
            latitude_delta: CENTER_SPAN,
            longitude_delta: CENTER_SPAN,
        },
    };

    let value = serde_json::to_value(ViewportReport::from(&viewport)).expect("serialise");

    assert_eq!(
        value,
        json!({
            "kind": "centered",
            "center": { "latitude": 1.0, "longitude": 2.0 },
            "latitude_delta": CENTER_SPAN,
            "longitude_delta": CENTER_SPAN,
        })
    );
}

#[rstest]
fn report_captures_drawn_route() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    let mut renderer = MapRenderer::with_handle(
        Arc::new(StubRouteProvider::straight_line()),
        runtime.handle().clone(),
    );
    renderer
        .draw_route(coordinate(LAGOA), coordinate(CAMPUS))
        .expect("renderer accepts draws");
    let outcome = runtime.block_on(renderer.next_completion());
    assert!(outcome.is_some(), "draw should complete");

    let report = EstimateReport::new(renderer.surface(), sample_offers());

    let labels: Vec<_> = report
        .annotations
        .iter()
        .map(|annotation| (annotation.label, annotation.icon.as_str()))
        .collect();
    assert_eq!(
        labels,
        [
            (AnnotationLabel::Origin, "a"),
            (AnnotationLabel::Destination, "b"),
        ]
    );
    let overlay = report.overlay.as_ref().expect("overlay drawn");
    assert_eq!(overlay.polyline, [coordinate(LAGOA), coordinate(CAMPUS)]);
    assert_eq!(overlay.stroke, "#FFA500");
    assert!(matches!(
        report.viewport,
        Some(ViewportReport::FitRoute { .. })
    ));
    assert_eq!(report.offers.len(), 2);

    let value = serde_json::to_value(&report).expect("serialise");
    assert_eq!(
        value.pointer("/annotations/0/label"),
        Some(&Value::from("origin"))
    );
    assert_eq!(
        value.pointer("/viewport/kind"),
        Some(&Value::from("fit_route"))
    );
}
