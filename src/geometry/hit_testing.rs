use egui::Pos2;

/// Distance from `point` to the segment `a`-`b`
pub fn segment_distance(a: Pos2, b: Pos2, point: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Shortest distance from `point` to a polyline.
///
/// A single-point polyline is treated as a dot; an empty one is infinitely far away.
pub fn polyline_distance(points: &[Pos2], point: Pos2) -> f32 {
    match points {
        [] => f32::INFINITY,
        [only] => point.distance(*only),
        _ => points
            .windows(2)
            .map(|pair| segment_distance(pair[0], pair[1], point))
            .fold(f32::INFINITY, f32::min),
    }
}
