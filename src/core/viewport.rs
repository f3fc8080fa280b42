use crate::core::gesture::GestureEvent;
use crate::core::tier::ZoomBounds;
use crate::models::{PlacementRecord, Point, ViewerTransform, ViewportRect};

/// Fraction of max zoom above which a double tap zooms back out
const DOUBLE_TAP_RESET_RATIO: f64 = 0.9;

impl ViewerTransform {
    /// Map a layout position to screen space
    #[inline]
    pub fn project(&self, position: Point, origin: Point) -> Point {
        Point::new(
            (position.x - origin.x) * self.zoom_scale + origin.x + self.pan_offset.x,
            (position.y - origin.y) * self.zoom_scale + origin.y + self.pan_offset.y,
        )
    }

    pub fn apply_pan(&mut self, delta_x: f64, delta_y: f64) {
        self.pan_offset.x += delta_x;
        self.pan_offset.y += delta_y;
    }

    /// Multiply the zoom by a raw pinch ratio, clamped to the tier's bounds
    pub fn apply_pinch(&mut self, scale: f64, bounds: ZoomBounds) {
        if !scale.is_finite() || scale <= 0.0 {
            return;
        }
        self.zoom_scale = bounds.clamp(self.zoom_scale * scale);
    }

    /// Zoom in towards a tapped point, or back to 1.0 when already near max
    ///
    /// Zoom and pan change together.
    pub fn apply_double_tap(&mut self, at: Point, origin: Point, bounds: ZoomBounds) {
        let zoom = if self.zoom_scale >= bounds.max * DOUBLE_TAP_RESET_RATIO {
            1.0
        } else {
            (self.zoom_scale * 2.0).min(bounds.max)
        };

        *self = ViewerTransform {
            zoom_scale: bounds.clamp(zoom),
            pan_offset: Point::new(
                self.pan_offset.x - (at.x - origin.x) * 0.5,
                self.pan_offset.y - (at.y - origin.y) * 0.5,
            ),
        };
    }

    /// Apply one recognized gesture; returns whether the transform changed
    pub fn apply(&mut self, event: &GestureEvent, origin: Point, bounds: ZoomBounds) -> bool {
        let before = *self;
        match *event {
            GestureEvent::Pan { delta_x, delta_y } => self.apply_pan(delta_x, delta_y),
            GestureEvent::Pinch { scale, .. } => self.apply_pinch(scale, bounds),
            GestureEvent::DoubleTap { x, y } => {
                self.apply_double_tap(Point::new(x, y), origin, bounds)
            }
            GestureEvent::LongPress { .. } => {}
        }
        *self != before
    }

    /// Re-clamp after the viewer's tier changed
    pub fn clamp_to(&mut self, bounds: ZoomBounds) {
        self.zoom_scale = bounds.clamp(self.zoom_scale);
    }

    pub fn reset(&mut self) {
        *self = ViewerTransform::default();
    }
}

/// Filters placements down to those on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportCuller {
    pub viewport: ViewportRect,
    pub origin: Point,
    pub margin: f64,
}

impl ViewportCuller {
    /// Culler centered on the viewport
    pub fn new(viewport: ViewportRect, margin: f64) -> Self {
        Self {
            origin: viewport.center(),
            viewport,
            margin,
        }
    }

    #[inline]
    fn contains(&self, p: &Point) -> bool {
        let v = &self.viewport;
        p.x >= v.x - self.margin
            && p.x <= v.x + v.width + self.margin
            && p.y >= v.y - self.margin
            && p.y <= v.y + v.height + self.margin
    }

    /// Whether a placement lands inside the expanded viewport under `transform`
    pub fn is_visible(&self, placement: &PlacementRecord, transform: &ViewerTransform) -> bool {
        self.contains(&transform.project(placement.position(), self.origin))
    }

    /// Lazily yield the placements intersecting the expanded viewport
    pub fn iter_visible<'a>(
        &'a self,
        placements: &'a [PlacementRecord],
        transform: &'a ViewerTransform,
    ) -> impl Iterator<Item = &'a PlacementRecord> + 'a {
        placements
            .iter()
            .filter(move |p| self.is_visible(p, transform))
    }

    pub fn visible<'a>(
        &self,
        placements: &'a [PlacementRecord],
        transform: &ViewerTransform,
    ) -> Vec<&'a PlacementRecord> {
        placements
            .iter()
            .filter(|p| self.is_visible(p, transform))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Fidelity;

    fn record(id: &str, x: f64, y: f64) -> PlacementRecord {
        PlacementRecord {
            candidate_id: id.to_string(),
            angle_radians: 0.0,
            radial_distance: 0.0,
            x,
            y,
            score: 50,
            fidelity: Fidelity::Full,
            fallback: false,
        }
    }

    const BOUNDS: ZoomBounds = ZoomBounds { min: 0.5, max: 2.0 };

    #[test]
    fn test_identity_transform_culls_outside() {
        let culler = ViewportCuller::new(ViewportRect::new(400.0, 800.0), 100.0);
        let placements = vec![
            record("inside", 200.0, 400.0),
            record("margin", -80.0, 400.0),
            record("outside", 650.0, 400.0),
        ];

        let visible = culler.visible(&placements, &ViewerTransform::default());
        let ids: Vec<_> = visible.iter().map(|p| p.candidate_id.as_str()).collect();

        assert_eq!(ids, vec!["inside", "margin"]);
    }

    #[test]
    fn test_zoom_and_pan_move_points() {
        let culler = ViewportCuller::new(ViewportRect::new(400.0, 400.0), 0.0);
        let placements = vec![record("a", 350.0, 200.0)];

        // Zoom 2x about (200,200) pushes x to 500, off screen
        let zoomed = ViewerTransform { zoom_scale: 2.0, pan_offset: Point::default() };
        assert!(culler.visible(&placements, &zoomed).is_empty());

        // Panning left brings it back
        let panned = ViewerTransform { zoom_scale: 2.0, pan_offset: Point::new(-150.0, 0.0) };
        assert_eq!(culler.visible(&placements, &panned).len(), 1);
        assert_eq!(culler.iter_visible(&placements, &panned).count(), 1);
    }

    #[test]
    fn test_empty_placements() {
        let culler = ViewportCuller::new(ViewportRect::new(400.0, 400.0), 50.0);
        assert!(culler.visible(&[], &ViewerTransform::default()).is_empty());
    }

    #[test]
    fn test_pinch_clamps_to_bounds() {
        let mut t = ViewerTransform::default();
        t.apply_pinch(10.0, BOUNDS);
        assert_eq!(t.zoom_scale, 2.0);
        t.apply_pinch(0.01, BOUNDS);
        assert_eq!(t.zoom_scale, 0.5);
        t.apply_pinch(f64::NAN, BOUNDS);
        assert_eq!(t.zoom_scale, 0.5);
    }

    #[test]
    fn test_double_tap_zooms_then_resets() {
        let origin = Point::new(200.0, 200.0);
        let mut t = ViewerTransform::default();

        t.apply_double_tap(Point::new(300.0, 200.0), origin, BOUNDS);
        assert_eq!(t.zoom_scale, 2.0);
        assert_eq!(t.pan_offset, Point::new(-50.0, 0.0));

        // Already at max, the next double tap zooms back out
        t.apply_double_tap(origin, origin, BOUNDS);
        assert_eq!(t.zoom_scale, 1.0);
        assert_eq!(t.pan_offset, Point::new(-50.0, 0.0));
    }

    #[test]
    fn test_apply_gesture_events() {
        let origin = Point::new(0.0, 0.0);
        let mut t = ViewerTransform::default();

        assert!(t.apply(&GestureEvent::Pan { delta_x: 5.0, delta_y: -3.0 }, origin, BOUNDS));
        assert!(t.apply(
            &GestureEvent::Pinch { scale: 1.5, center: Point::new(10.0, 10.0) },
            origin,
            BOUNDS
        ));
        assert!(!t.apply(&GestureEvent::LongPress { x: 1.0, y: 1.0 }, origin, BOUNDS));

        assert_eq!(t.pan_offset, Point::new(5.0, -3.0));
        assert_eq!(t.zoom_scale, 1.5);
    }

    #[test]
    fn test_tier_downgrade_reclamps() {
        let mut t = ViewerTransform { zoom_scale: 2.8, pan_offset: Point::default() };
        t.clamp_to(ZoomBounds { min: 0.8, max: 1.3 });
        assert_eq!(t.zoom_scale, 1.3);
        t.reset();
        assert_eq!(t, ViewerTransform::default());
    }
}
