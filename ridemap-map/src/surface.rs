//! Headless model of the map surface.
//!
//! [`MapSurface`] holds exactly what a platform map view would show: the
//! annotation pair, at most one route overlay and the visible viewport.
//! Only [`MapRenderer`](crate::MapRenderer) mutates it; everything else
//! reads it.

use ridemap_core::{Annotation, AnnotationLabel, BoundingRegion, Coordinate, RouteRequest, RouteResult};

use crate::renderer::RouteTicket;

/// Edge padding, in screen points, applied when fitting a route.
pub const PADDING: f64 = 50.0;

/// Latitude and longitude delta used when centring on a fix.
pub const CENTER_SPAN: f64 = 0.01;

/// Insets kept clear around a fitted region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeInsets {
    /// Top inset.
    pub top: f64,
    /// Left inset.
    pub left: f64,
    /// Bottom inset.
    pub bottom: f64,
    /// Right inset.
    pub right: f64,
}

impl EdgeInsets {
    /// Same inset on every edge.
    #[must_use]
    pub const fn uniform(inset: f64) -> Self {
        Self {
            top: inset,
            left: inset,
            bottom: inset,
            right: inset,
        }
    }
}

/// Size of a centred region in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSpan {
    /// Height of the region.
    pub latitude_delta: f64,
    /// Width of the region.
    pub longitude_delta: f64,
}

/// What part of the world the map shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    /// Fit a route's bounding region, keeping `padding` clear.
    FitRoute {
        /// Region that must be fully visible.
        bounds: BoundingRegion,
        /// Screen insets around the region.
        padding: EdgeInsets,
    },
    /// Fixed-size region around a point.
    Centered {
        /// Centre of the visible region.
        center: Coordinate,
        /// Size of the visible region.
        span: CoordinateSpan,
    },
}

impl Viewport {
    /// Centre of the visible region.
    #[must_use]
    pub fn center(&self) -> Coordinate {
        match self {
            Self::FitRoute { bounds, .. } => bounds.center(),
            Self::Centered { center, .. } => *center,
        }
    }
}

/// Stacking level of an overlay relative to map content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayLevel {
    /// Above roads, below labels.
    AboveRoads,
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Stroke styling for a route polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Stroke colour.
    pub stroke: Rgb,
    /// Stroke width in screen points.
    pub line_width: f64,
    /// Stacking level.
    pub level: OverlayLevel,
}

/// Orange six-point stroke drawn above roads.
pub const ROUTE_STYLE: OverlayStyle = OverlayStyle {
    stroke: Rgb(0xFF, 0xA5, 0x00),
    line_width: 6.0,
    level: OverlayLevel::AboveRoads,
};

/// Image used to draw an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerIcon {
    /// Asset name in the host's image catalogue.
    pub asset: &'static str,
    /// Accessibility title.
    pub title: &'static str,
    /// Rendered width and height in screen points.
    pub size: (u16, u16),
}

const ORIGIN_ICON: MarkerIcon = MarkerIcon {
    asset: "a",
    title: "Point A",
    size: (20, 20),
};

const DESTINATION_ICON: MarkerIcon = MarkerIcon {
    asset: "b",
    title: "Point B",
    size: (20, 20),
};

impl MarkerIcon {
    /// Icon for `label`.
    #[must_use]
    pub const fn for_label(label: AnnotationLabel) -> &'static Self {
        match label {
            AnnotationLabel::Origin => &ORIGIN_ICON,
            AnnotationLabel::Destination => &DESTINATION_ICON,
        }
    }
}

/// A resolved route drawn on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOverlay {
    /// Draw call that produced the overlay.
    pub ticket: RouteTicket,
    /// Endpoints the route was requested for.
    pub request: RouteRequest,
    /// The resolved route.
    pub route: RouteResult,
    /// Stroke styling.
    pub style: OverlayStyle,
}

/// Everything currently shown on the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSurface {
    annotations: Vec<Annotation>,
    overlay: Option<RouteOverlay>,
    viewport: Option<Viewport>,
}

impl MapSurface {
    /// Annotations in placement order.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Annotations paired with the icon each is drawn with.
    pub fn markers(&self) -> impl Iterator<Item = (&Annotation, &'static MarkerIcon)> {
        self.annotations
            .iter()
            .map(|annotation| (annotation, MarkerIcon::for_label(annotation.label)))
    }

    /// The route overlay, if one has been drawn.
    #[must_use]
    pub const fn overlay(&self) -> Option<&RouteOverlay> {
        self.overlay.as_ref()
    }

    /// The viewport, if it has been set.
    #[must_use]
    pub const fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub(crate) fn replace_annotations(&mut self, origin: Coordinate, destination: Coordinate) {
        self.annotations.clear();
        self.annotations
            .extend(Annotation::pair(origin, destination));
    }

    pub(crate) fn replace_overlay(&mut self, overlay: RouteOverlay) {
        self.viewport = Some(Viewport::FitRoute {
            bounds: overlay.route.bounding_region(),
            padding: EdgeInsets::uniform(PADDING),
        });
        self.overlay = Some(overlay);
    }

    pub(crate) const fn center_on(&mut self, center: Coordinate) {
        self.viewport = Some(Viewport::Centered {
            center,
            span: CoordinateSpan {
                latitude_delta: CENTER_SPAN,
                longitude_delta: CENTER_SPAN,
            },
        });
    }
}
