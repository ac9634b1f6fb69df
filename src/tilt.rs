//! Pointer-driven 3D tilt for recommendation cards.
//!
//! The tilt is a pure function of the latest pointer sample and the card's
//! current bounds. `TiltController` only remembers whether the card is tilted
//! and by how much, so every card owns an independent instance.

use std::fmt;

/// Degrees of rotation per unit of pointer offset from the card centre
pub const TILT_MAGNITUDE: f32 = 5.0;

/// Perspective distance in pixels
pub const PERSPECTIVE: f32 = 700.0;

/// Uniform scale applied while tilted
pub const TILT_SCALE: f32 = 0.95;

/// Screen-space bounds of a card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// A rect with no area has not been laid out yet
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    fn center(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

impl From<egui::Rect> for BoundingRect {
    fn from(rect: egui::Rect) -> Self {
        Self::new(rect.left(), rect.top(), rect.width(), rect.height())
    }
}

/// Rotation about the X and Y axes, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltVector {
    pub tilt_x: f32,
    pub tilt_y: f32,
}

/// Compute the tilt for a pointer position over `rect`.
///
/// Returns `None` when the rect has not been measured.
pub fn compute_tilt(pointer_x: f32, pointer_y: f32, rect: &BoundingRect) -> Option<TiltVector> {
    if !rect.is_measured() {
        return None;
    }

    let relative_x = (pointer_x - rect.left) / rect.width;
    let relative_y = (pointer_y - rect.top) / rect.height;

    Some(TiltVector {
        tilt_x: (relative_y - 0.5) * TILT_MAGNITUDE,
        tilt_y: (relative_x - 0.5) * -TILT_MAGNITUDE,
    })
}

/// Full transform descriptor for a tilted card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltTransform {
    pub perspective: f32,
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub scale: f32,
}

impl TiltTransform {
    pub fn from_vector(vector: TiltVector) -> Self {
        Self {
            perspective: PERSPECTIVE,
            rotate_x: vector.tilt_x,
            rotate_y: vector.tilt_y,
            scale: TILT_SCALE,
        }
    }

    /// Project a point of the card plane (relative to the card centre) onto the screen.
    ///
    /// Applies scale, then rotateX, then rotateY, then perspective divide,
    /// the same order a browser composes the equivalent CSS transform.
    fn project(&self, x: f32, y: f32) -> (f32, f32) {
        let (x, y) = (x * self.scale, y * self.scale);

        // CSS axes: y points down, z points at the viewer
        let (sin_x, cos_x) = self.rotate_x.to_radians().sin_cos();
        let (y, z) = (y * cos_x, y * sin_x);

        let (sin_y, cos_y) = self.rotate_y.to_radians().sin_cos();
        let (x, z) = (x * cos_y + z * sin_y, -x * sin_y + z * cos_y);

        let w = self.perspective / (self.perspective - z);
        (x * w, y * w)
    }

    /// Screen-space corners of `rect` under this transform.
    ///
    /// Order: top-left, top-right, bottom-right, bottom-left.
    pub fn project_corners(&self, rect: &BoundingRect) -> [(f32, f32); 4] {
        let (cx, cy) = rect.center();
        let (hw, hh) = (rect.width / 2.0, rect.height / 2.0);
        [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(x, y)| {
            let (px, py) = self.project(x, y);
            (cx + px, cy + py)
        })
    }
}

impl fmt::Display for TiltTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "perspective({}px) rotateX({}deg) rotateY({}deg) scale3d({s}, {s}, {s})",
            self.perspective,
            self.rotate_x,
            self.rotate_y,
            s = self.scale
        )
    }
}

/// Tilt state of one card
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TiltState {
    #[default]
    Neutral,
    Tilted { tilt_x: f32, tilt_y: f32 },
}

/// Per-card tilt tracker
#[derive(Debug, Clone, Default)]
pub struct TiltController {
    state: TiltState,
}

impl TiltController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TiltState {
        self.state
    }

    /// Recompute the tilt from a pointer sample. A missing or unmeasured rect is ignored.
    pub fn on_pointer_move(&mut self, pointer_x: f32, pointer_y: f32, rect: Option<BoundingRect>) {
        let Some(vector) = rect.and_then(|r| compute_tilt(pointer_x, pointer_y, &r)) else {
            return;
        };

        self.state = TiltState::Tilted {
            tilt_x: vector.tilt_x,
            tilt_y: vector.tilt_y,
        };
    }

    pub fn on_pointer_leave(&mut self) {
        self.state = TiltState::Neutral;
    }

    /// Current transform, or `None` for no transform
    pub fn transform(&self) -> Option<TiltTransform> {
        match self.state {
            TiltState::Neutral => None,
            TiltState::Tilted { tilt_x, tilt_y } => {
                Some(TiltTransform::from_vector(TiltVector { tilt_x, tilt_y }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> BoundingRect {
        BoundingRect::new(0.0, 0.0, 100.0, 100.0)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_centered_pointer_is_flat() {
        let tilt = compute_tilt(50.0, 50.0, &square()).unwrap();
        assert_eq!(tilt.tilt_x, 0.0);
        // -0.0 compares equal to 0.0
        assert_eq!(tilt.tilt_y, 0.0);
    }

    #[test]
    fn test_top_left_corner() {
        let tilt = compute_tilt(0.0, 0.0, &square()).unwrap();
        assert_eq!(tilt.tilt_x, -2.5);
        assert_eq!(tilt.tilt_y, 2.5);
    }

    #[test]
    fn test_offset_rect_uses_relative_position() {
        let rect = BoundingRect::new(200.0, 100.0, 400.0, 200.0);
        let tilt = compute_tilt(600.0, 300.0, &rect).unwrap();
        assert_eq!(tilt.tilt_x, 2.5);
        assert_eq!(tilt.tilt_y, -2.5);
    }

    #[test]
    fn test_unmeasured_rect_is_ignored() {
        assert!(compute_tilt(10.0, 10.0, &BoundingRect::new(0.0, 0.0, 0.0, 50.0)).is_none());

        let mut controller = TiltController::new();
        controller.on_pointer_move(10.0, 10.0, None);
        assert_eq!(controller.state(), TiltState::Neutral);

        controller.on_pointer_move(0.0, 0.0, Some(square()));
        controller.on_pointer_move(90.0, 90.0, None);
        assert_eq!(
            controller.state(),
            TiltState::Tilted { tilt_x: -2.5, tilt_y: 2.5 }
        );
    }

    #[test]
    fn test_moves_replace_previous_tilt() {
        let mut controller = TiltController::new();
        controller.on_pointer_move(0.0, 0.0, Some(square()));
        controller.on_pointer_move(100.0, 100.0, Some(square()));
        assert_eq!(
            controller.state(),
            TiltState::Tilted { tilt_x: 2.5, tilt_y: -2.5 }
        );
    }

    #[test]
    fn test_leave_resets_to_neutral() {
        let mut controller = TiltController::new();
        controller.on_pointer_move(0.0, 100.0, Some(square()));
        assert!(controller.transform().is_some());

        controller.on_pointer_leave();
        assert_eq!(controller.state(), TiltState::Neutral);
        assert!(controller.transform().is_none());

        // Leaving while already neutral is harmless
        controller.on_pointer_leave();
        assert_eq!(controller.state(), TiltState::Neutral);
    }

    #[test]
    fn test_transform_css() {
        let transform = TiltTransform::from_vector(TiltVector { tilt_x: -2.5, tilt_y: 2.5 });
        assert_eq!(
            transform.to_string(),
            "perspective(700px) rotateX(-2.5deg) rotateY(2.5deg) scale3d(0.95, 0.95, 0.95)"
        );
    }

    #[test]
    fn test_flat_projection_is_scaled_rect() {
        let transform = TiltTransform::from_vector(TiltVector { tilt_x: 0.0, tilt_y: 0.0 });
        let corners = transform.project_corners(&square());
        let expected = [(2.5, 2.5), (97.5, 2.5), (97.5, 97.5), (2.5, 97.5)];
        for ((x, y), (ex, ey)) in corners.iter().zip(expected) {
            assert!(approx(*x, ex) && approx(*y, ey), "got ({x}, {y})");
        }
    }

    #[test]
    fn test_negative_rotate_x_brings_top_edge_forward() {
        // Pointer near the top edge gives a negative rotateX, which moves the
        // top edge toward the viewer so it projects wider than the bottom edge
        let transform = TiltTransform::from_vector(TiltVector { tilt_x: -2.5, tilt_y: 0.0 });
        let [tl, tr, br, bl] = transform.project_corners(&square());
        let top_width = tr.0 - tl.0;
        let bottom_width = br.0 - bl.0;
        assert!(top_width > bottom_width);
    }
}
