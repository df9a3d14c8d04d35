use glam::{DVec2, IVec2};

/// Viewer pose on the grid.
///
/// * `pos` is in fractional map cells (`x` = row axis, `y` = column axis).
/// * `dir` is the facing vector, `plane` the camera plane.
/// * `plane ⟂ dir`; `|plane| / |dir|` sets the field of view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub pos: DVec2,
    pub dir: DVec2,
    pub plane: DVec2,
}

impl Pose {
    /// Facing +X with the camera plane along +Y.
    pub fn new(pos: DVec2, plane_len: f64) -> Self {
        Self::facing(pos, DVec2::X, plane_len)
    }

    /// Facing `dir` (normalised; a zero vector falls back to +X).
    pub fn facing(pos: DVec2, dir: DVec2, plane_len: f64) -> Self {
        let dir = dir.try_normalize().unwrap_or(DVec2::X);
        Self {
            pos,
            dir,
            plane: dir.perp() * plane_len,
        }
    }

    /// Map cell containing the viewer.
    #[inline]
    pub fn cell(&self) -> IVec2 {
        self.pos.floor().as_ivec2()
    }

    /// Unit vector 90° counter-clockwise from `dir`.
    #[inline]
    pub fn left(&self) -> DVec2 {
        self.dir.perp().normalize_or_zero()
    }

    /// Horizontal field of view in radians.
    pub fn fov(&self) -> f64 {
        2.0 * (self.plane.length() / self.dir.length()).atan()
    }

    /// Rotate `dir` and `plane` by `theta` radians (positive = CCW).
    ///
    /// Both vectors go through the same matrix and are read before either
    /// is written, so they stay perpendicular however many turns accumulate.
    pub fn rotate(&mut self, theta: f64) {
        let sc = theta.sin_cos();
        self.dir = rotated(self.dir, sc);
        self.plane = rotated(self.plane, sc);
    }
}

/// `[cos -sin; sin cos] · v`
#[inline(always)]
fn rotated(v: DVec2, (s, c): (f64, f64)) -> DVec2 {
    DVec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn default_pose_matches_classic_camera() {
        let p = Pose::new(DVec2::new(1.5, 1.5), 0.66);
        assert_eq!(p.dir, DVec2::new(1.0, 0.0));
        assert!(close(p.plane, DVec2::new(0.0, 0.66)));
        assert_eq!(p.cell(), IVec2::new(1, 1));
    }

    #[test]
    fn quarter_turn_uses_snapshot() {
        // Reusing the updated x when computing y would give (0, 0) here.
        let mut p = Pose::new(DVec2::ZERO, 0.66);
        p.rotate(FRAC_PI_2);
        assert!(close(p.dir, DVec2::new(0.0, 1.0)));
        assert!(close(p.plane, DVec2::new(-0.66, 0.0)));
    }

    #[test]
    fn rotate_round_trip() {
        for theta in [0.075, -0.075, 0.5, 1.0, FRAC_PI_2, PI, 3.0] {
            let start = Pose::facing(DVec2::new(2.5, 2.5), DVec2::new(0.3, -0.8), 0.66);
            let mut p = start;
            p.rotate(theta);
            p.rotate(-theta);
            assert!(close(p.dir, start.dir), "dir drifted for θ = {theta}");
            assert!(close(p.plane, start.plane), "plane drifted for θ = {theta}");
        }
    }

    #[test]
    fn many_turns_stay_perpendicular() {
        let mut p = Pose::new(DVec2::ZERO, 0.66);
        for _ in 0..10_000 {
            p.rotate(0.075);
        }
        assert!(p.dir.dot(p.plane).abs() < 1e-9);
        assert!((p.dir.length() - 1.0).abs() < 1e-9);
        assert!((p.plane.length() - 0.66).abs() < 1e-9);
    }

    #[test]
    fn fov_from_plane_length() {
        let p = Pose::new(DVec2::ZERO, 1.0);
        assert!((p.fov() - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn facing_zero_falls_back_to_x() {
        let p = Pose::facing(DVec2::ZERO, DVec2::ZERO, 0.66);
        assert_eq!(p.dir, DVec2::X);
        assert!(close(p.left(), DVec2::Y));
    }
}
