use super::{InputEvent, SurfaceGeometry, Touch, TouchKind};
use crate::path::Point;

/// Maps raw events to surface points, applying palm rejection to touch input.
///
/// Pure: resolving never mutates anything. A `None` result means the event
/// must be ignored entirely, including any default-gesture suppression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinateResolver {
    /// Only accept stylus touches
    pub palm_rejection: bool,
}

impl CoordinateResolver {
    pub fn new(palm_rejection: bool) -> Self {
        Self { palm_rejection }
    }

    /// Pick the touch an event should be interpreted by.
    ///
    /// Without palm rejection this is the first changed touch, whatever made
    /// it. With palm rejection it is the first stylus touch, if any.
    pub fn select_touch<'a>(&self, touches: &'a [Touch]) -> Option<&'a Touch> {
        if !self.palm_rejection {
            return touches.first();
        }
        touches.iter().find(|touch| touch.kind == TouchKind::Stylus)
    }

    pub fn resolve(&self, event: &InputEvent, geometry: &SurfaceGeometry) -> Option<Point> {
        match event {
            InputEvent::Mouse { offset, .. } => Some(*offset),
            InputEvent::Touch {
                changed_touches, ..
            } => self
                .select_touch(changed_touches)
                .map(|touch| touch_point(touch, geometry)),
        }
    }
}

/// `client - scroll - bounds.min`
pub fn touch_point(touch: &Touch, geometry: &SurfaceGeometry) -> Point {
    touch.client - geometry.scroll - geometry.bounds.min.to_vec2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Phase;
    use egui::{Rect, pos2, vec2};

    fn geometry() -> SurfaceGeometry {
        SurfaceGeometry::new(
            Rect::from_min_size(pos2(10.0, 20.0), vec2(300.0, 200.0)),
            vec2(0.0, 5.0),
        )
    }

    fn touch_event(touches: Vec<Touch>) -> InputEvent {
        InputEvent::Touch {
            phase: Phase::Down,
            changed_touches: touches,
        }
    }

    #[test]
    fn test_mouse_uses_offset() {
        let resolver = CoordinateResolver::new(true);
        let event = InputEvent::Mouse {
            phase: Phase::Move,
            offset: pos2(7.0, 8.0),
        };
        assert_eq!(resolver.resolve(&event, &geometry()), Some(pos2(7.0, 8.0)));
    }

    #[test]
    fn test_touch_is_translated() {
        let resolver = CoordinateResolver::new(false);
        let event = touch_event(vec![Touch::finger(pos2(50.0, 60.0))]);
        assert_eq!(resolver.resolve(&event, &geometry()), Some(pos2(40.0, 35.0)));
    }

    #[test]
    fn test_without_palm_rejection_first_touch_wins() {
        let resolver = CoordinateResolver::new(false);
        let touches = [Touch::finger(pos2(1.0, 1.0)), Touch::stylus(pos2(2.0, 2.0))];
        assert_eq!(resolver.select_touch(&touches), Some(&touches[0]));
        assert_eq!(resolver.select_touch(&[]), None);
    }

    #[test]
    fn test_palm_rejection_prefers_stylus() {
        let resolver = CoordinateResolver::new(true);
        let mixed = touch_event(vec![
            Touch::finger(pos2(100.0, 100.0)),
            Touch::stylus(pos2(30.0, 40.0)),
        ]);
        assert_eq!(resolver.resolve(&mixed, &geometry()), Some(pos2(20.0, 15.0)));

        let fingers = touch_event(vec![
            Touch::finger(pos2(100.0, 100.0)),
            Touch::finger(pos2(30.0, 40.0)),
        ]);
        assert_eq!(resolver.resolve(&fingers, &geometry()), None);
    }
}
