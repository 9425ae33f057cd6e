//! JSON report of the final map state.

use ridemap_core::{AnnotationLabel, BoundingRegion, Coordinate, DriverOffer};
use ridemap_map::{MapSurface, MarkerIcon, Rgb, RouteOverlay, Viewport};
use serde::{Deserialize, Serialize};

/// Everything the map shows once the estimate has been handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct EstimateReport {
    pub(crate) annotations: Vec<AnnotationReport>,
    pub(crate) overlay: Option<OverlayReport>,
    pub(crate) viewport: Option<ViewportReport>,
    pub(crate) offers: Vec<DriverOffer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct AnnotationReport {
    pub(crate) label: AnnotationLabel,
    pub(crate) position: Coordinate,
    pub(crate) icon: String,
    pub(crate) title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct OverlayReport {
    pub(crate) polyline: Vec<Coordinate>,
    pub(crate) bounds: BoundingRegion,
    pub(crate) distance_metres: f64,
    pub(crate) travel_time_secs: f64,
    pub(crate) stroke: String,
    pub(crate) line_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum ViewportReport {
    FitRoute {
        bounds: BoundingRegion,
        padding: f64,
    },
    Centered {
        center: Coordinate,
        latitude_delta: f64,
        longitude_delta: f64,
    },
}

impl EstimateReport {
    pub(crate) fn new(surface: &MapSurface, offers: Vec<DriverOffer>) -> Self {
        let annotations = surface
            .markers()
            .map(|(annotation, icon)| AnnotationReport::new(annotation.label, annotation.position, icon))
            .collect();
        Self {
            annotations,
            overlay: surface.overlay().map(OverlayReport::from),
            viewport: surface.viewport().map(ViewportReport::from),
            offers,
        }
    }
}

impl AnnotationReport {
    fn new(label: AnnotationLabel, position: Coordinate, icon: &MarkerIcon) -> Self {
        Self {
            label,
            position,
            icon: icon.asset.to_owned(),
            title: icon.title.to_owned(),
        }
    }
}

impl From<&RouteOverlay> for OverlayReport {
    fn from(overlay: &RouteOverlay) -> Self {
        let Rgb(red, green, blue) = overlay.style.stroke;
        Self {
            polyline: overlay.route.polyline().to_vec(),
            bounds: overlay.route.bounding_region(),
            distance_metres: overlay.route.distance_metres(),
            travel_time_secs: overlay.route.expected_travel_time().as_secs_f64(),
            stroke: format!("#{red:02X}{green:02X}{blue:02X}"),
            line_width: overlay.style.line_width,
        }
    }
}

impl From<&Viewport> for ViewportReport {
    fn from(viewport: &Viewport) -> Self {
        match *viewport {
            Viewport::FitRoute { bounds, padding } => Self::FitRoute {
                bounds,
                padding: padding.top,
            },
            Viewport::Centered { center, span } => Self::Centered {
                center,
                latitude_delta: span.latitude_delta,
                longitude_delta: span.longitude_delta,
            },
        }
    }
}
