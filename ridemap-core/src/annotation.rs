//! Labelled markers pinned to the map.

use crate::Coordinate;

/// Which end of the trip an annotation marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AnnotationLabel {
    /// Pick-up point.
    Origin,
    /// Drop-off point.
    Destination,
}

/// A labelled marker at a coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    /// Where the marker is pinned.
    pub position: Coordinate,
    /// What the marker represents.
    pub label: AnnotationLabel,
}

impl Annotation {
    /// The origin/destination pair for a trip, origin first.
    #[must_use]
    pub const fn pair(origin: Coordinate, destination: Coordinate) -> [Self; 2] {
        [
            Self {
                position: origin,
                label: AnnotationLabel::Origin,
            },
            Self {
                position: destination,
                label: AnnotationLabel::Destination,
            },
        ]
    }
}
