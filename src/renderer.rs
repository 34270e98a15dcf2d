use crate::path::Point;
use crate::picture::Picture;

/// Turns points into an SVG-style path descriptor.
///
/// The first point becomes a move-to and every following point a line-to,
/// in capture order: `[(0,0), (5,0), (5,5)]` renders as `"M 0,0 L 5,0 L 5,5"`.
/// No points render as an empty descriptor.
///
/// Negative zero is written as `0`.
pub fn path_descriptor(points: &[Point]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let command = if i == 0 { 'M' } else { 'L' };
            format!("{} {},{}", command, coordinate(point.x), coordinate(point.y))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn coordinate(value: f32) -> f32 {
    // -0.0 == 0.0, so this maps both to positive zero
    if value == 0.0 { 0.0 } else { value }
}

/// One descriptor per path, bottom-most first
pub fn picture_descriptors(picture: &Picture) -> Vec<String> {
    picture.paths().iter().map(|path| path.descriptor()).collect()
}
