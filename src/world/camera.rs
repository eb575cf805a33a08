use glam::{Vec2, vec2};

/// Length of the camera-plane vector; encodes the horizontal FoV
/// (0.66 ≈ 66° with a unit forward vector).
pub const PLANE_LENGTH: f32 = 0.66;

/// First-person view-point on the map grid.
///
/// * `dir` is the unit forward vector; rays fan across `dir ± plane`.
/// * `plane` stays perpendicular to `dir` with length [`PLANE_LENGTH`].
/// * `dir` is unit-length except during rotation frames; the motion
///   controller re-derives it analytically when a turn completes.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub pos: Vec2,
    pub dir: Vec2,
    pub plane: Vec2,
}

impl Camera {
    /// Create a camera at `pos` facing `dir` (normalised here).
    pub fn new(pos: Vec2, dir: Vec2) -> Self {
        let dir = dir.normalize();
        Self {
            pos,
            dir,
            plane: perp(dir) * PLANE_LENGTH,
        }
    }

    /// Heading angle in radians (0 = +X, counter-clockwise).
    #[inline]
    pub fn heading(&self) -> f32 {
        self.dir.y.atan2(self.dir.x)
    }

    /// Rotate `dir` and `plane` by `rads` about the vertical axis.
    pub(crate) fn rotate(&mut self, rads: f32) {
        let (s, c) = rads.sin_cos();
        self.dir = vec2(self.dir.x * c - self.dir.y * s, self.dir.x * s + self.dir.y * c);
        self.plane = vec2(
            self.plane.x * c - self.plane.y * s,
            self.plane.x * s + self.plane.y * c,
        );
    }

    /// Snap to an exact heading, rebuilding `dir` and `plane` from the
    /// angle. Incremental rotation drifts; this is the drift sink.
    pub(crate) fn snap_heading(&mut self, angle: f32) {
        let (s, c) = angle.sin_cos();
        self.dir = vec2(c, s);
        self.plane = perp(self.dir).normalize() * PLANE_LENGTH;
    }
}

/// Clockwise perpendicular: `(x, y) -> (y, -x)`.
#[inline]
fn perp(v: Vec2) -> Vec2 {
    vec2(v.y, -v.x)
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn new_normalises_and_derives_plane() {
        let cam = Camera::new(vec2(2.0, 3.0), vec2(3.0, 0.0));
        assert!((cam.dir - vec2(1.0, 0.0)).length() < 1e-6);
        assert!((cam.plane - vec2(0.0, -PLANE_LENGTH)).length() < 1e-6);
        assert!(cam.dir.dot(cam.plane).abs() < 1e-6);
    }

    #[test]
    fn rotate_quarter_turn() {
        let mut cam = Camera::new(Vec2::ZERO, vec2(1.0, 0.0));
        cam.rotate(FRAC_PI_2);
        assert!((cam.dir - vec2(0.0, 1.0)).length() < 1e-6);
        assert!((cam.plane - vec2(PLANE_LENGTH, 0.0)).length() < 1e-6);
    }

    #[test]
    fn snap_heading_restores_exact_vectors() {
        let mut cam = Camera::new(Vec2::ZERO, vec2(1.0, 0.0));
        // drift a little, then snap back to east
        cam.rotate(0.013);
        cam.snap_heading(0.0);
        assert_eq!(cam.dir, vec2(1.0, 0.0));
        assert_eq!(cam.plane, vec2(0.0, -PLANE_LENGTH));
        assert!((cam.heading()).abs() < 1e-6);
    }
}
