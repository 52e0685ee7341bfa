//! Keyframe curves.
//!
//! A curve is the editor's `{"Points": [...]}` object. Each point carries a
//! `co` coordinate (`X` is the frame/time, `Y` the value) and an integer
//! interpolation mode. Keys the editor adds (bezier handles and the like) are
//! kept in the flattened maps so foreign curves survive a round trip.
//! Coordinates are stored as JSON numbers, so `90` stays `90` and `90.0`
//! stays `90.0`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Interpolation code written on every point this crate creates.
pub const HOLD_INTERPOLATION: i64 = 0;

/// Time coordinate of the single point in a constant curve.
const HOLD_TIME: u64 = 1;

/// An ordered list of control points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    #[serde(rename = "Points", default)]
    pub points: Vec<Point>,

    #[serde(flatten)]
    pub unknown_fields: Map<String, Value>,
}

/// A single control point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub co: Coordinate,
    pub interpolation: i64,

    #[serde(flatten)]
    pub unknown_fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "X")]
    pub x: Number,
    #[serde(rename = "Y")]
    pub y: Number,

    #[serde(flatten)]
    pub unknown_fields: Map<String, Value>,
}

impl Curve {
    /// A single-point curve that holds `value` for the whole clip.
    pub fn constant(value: impl Into<Number>) -> Self {
        Self {
            points: vec![Point {
                co: Coordinate {
                    x: Number::from(HOLD_TIME),
                    y: value.into(),
                    unknown_fields: Map::new(),
                },
                interpolation: HOLD_INTERPOLATION,
                unknown_fields: Map::new(),
            }],
            unknown_fields: Map::new(),
        }
    }

    /// The held value when the curve has exactly one point.
    pub fn constant_value(&self) -> Option<f64> {
        match self.points.as_slice() {
            [only] => only.co.y.as_f64(),
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        self.points.len() == 1
    }
}
