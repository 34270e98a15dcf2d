use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::geometry::hit_testing;
use crate::renderer;

/// A location on the drawing surface, already translated for scroll and offset
pub type Point = Pos2;

/// One continuous stroke.
///
/// A path always holds at least one point: the first one is supplied on
/// creation and points are only ever appended afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PathData")]
pub struct Path {
    color: String,
    width: f32,
    points: Vec<Point>,
}

/// Wire shape of a [`Path`], checked before it becomes one
#[derive(Deserialize)]
struct PathData {
    color: String,
    width: f32,
    points: Vec<Point>,
}

impl TryFrom<PathData> for Path {
    type Error = &'static str;

    fn try_from(data: PathData) -> Result<Self, Self::Error> {
        if data.points.is_empty() {
            return Err("a path needs at least one point");
        }
        Ok(Self {
            color: data.color,
            width: data.width,
            points: data.points,
        })
    }
}

impl Path {
    pub fn new(color: impl Into<String>, width: f32, first: Point) -> Self {
        Self {
            color: color.into(),
            width,
            points: vec![first],
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn last_point(&self) -> Point {
        // non-empty by construction
        self.points[self.points.len() - 1]
    }

    /// Appends a move sample unless it shares either coordinate with the
    /// previous point. Returns whether the point was kept.
    ///
    /// Purely horizontal or vertical motion is dropped as well; existing
    /// pictures were captured with this rule so it is kept as is.
    pub(crate) fn append_sample(&mut self, point: Point) -> bool {
        let last = self.last_point();
        if last.x == point.x || last.y == point.y {
            return false;
        }
        self.points.push(point);
        true
    }

    /// SVG-style descriptor for this path, see [`renderer::path_descriptor`]
    pub fn descriptor(&self) -> String {
        renderer::path_descriptor(&self.points)
    }

    /// Whether an eraser of `radius` centred on `point` touches this stroke
    pub fn is_hit_by(&self, point: Point, radius: f32) -> bool {
        hit_testing::polyline_distance(&self.points, point) <= radius + self.width / 2.0
    }
}
