//! Viewer state on a grid map: pose, collision-checked movement and the
//! per-column ray caster.
//!
//! A [`View`] owns the level's [`Grid`] and the viewer [`Pose`]. The host
//! calls one mutator per input event (`look_*`, `move_*`) and then
//! [`View::cast`] to get the wall columns for the frame. Movement reports a
//! [`MoveOutcome`] instead of reaching into host state.

mod camera;
mod caster;
mod config;
mod movement;

use glam::DVec2;

use crate::world::Grid;

pub use camera::Pose;
pub use caster::{ColumnSpan, Columns, RayHit, Side};
pub use config::ViewConfig;
pub use movement::MoveOutcome;

/// Rejected `View` construction.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ViewError {
    #[error("start position ({x}, {y}) lies outside the grid")]
    StartOutOfBounds { x: f64, y: f64 },

    #[error("start position is not finite")]
    NonFiniteStart,

    #[error("viewport {width}×{height} must be at least 1×1 and fit in i32")]
    BadViewport { width: u32, height: u32 },

    /// A speed is negative or not finite, or `plane_len` is not finite.
    #[error("config field `{field}` is out of range")]
    BadConfig { field: &'static str },
}

/// One viewer walking one level.
#[derive(Clone, Debug)]
pub struct View {
    grid: Grid,
    pose: Pose,
    config: ViewConfig,
    sprinting: bool,
}

impl View {
    /// Viewer at `(x, y)` facing +X with the default camera plane.
    pub fn new(grid: Grid, x: f64, y: f64, config: ViewConfig) -> Result<Self, ViewError> {
        let pose = Pose::new(DVec2::new(x, y), config.plane_len);
        Self::with_pose(grid, pose, config)
    }

    /// Viewer with an explicit pose. The starting cell must be on the map.
    pub fn with_pose(grid: Grid, pose: Pose, config: ViewConfig) -> Result<Self, ViewError> {
        let ViewConfig { width, height, .. } = config;
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(ViewError::BadViewport { width, height });
        }
        if let Some(field) = config.invalid_field() {
            return Err(ViewError::BadConfig { field });
        }
        if !pose.pos.is_finite() || !pose.dir.is_finite() || !pose.plane.is_finite() {
            return Err(ViewError::NonFiniteStart);
        }
        let cell = pose.cell();
        if !grid.contains(cell.x, cell.y) {
            return Err(ViewError::StartOutOfBounds {
                x: pose.pos.x,
                y: pose.pos.y,
            });
        }
        Ok(Self {
            grid,
            pose,
            config,
            sprinting: false,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    #[inline]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    #[inline]
    pub fn pos(&self) -> DVec2 {
        self.pose.pos
    }

    /*──────────────────────── rotation ──────────────────────────────*/

    /// Turn by `theta` radians (positive = counter-clockwise).
    pub fn rotate(&mut self, theta: f64) {
        self.pose.rotate(theta);
    }

    pub fn look_left(&mut self) {
        self.rotate(self.config.rot_speed);
    }

    pub fn look_right(&mut self) {
        self.rotate(-self.config.rot_speed);
    }

    /*──────────────────────── sprint ────────────────────────────────*/

    #[inline]
    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    pub fn set_sprinting(&mut self, on: bool) {
        log::trace!("sprint {}", if on { "on" } else { "off" });
        self.sprinting = on;
    }

    /// Flip the sprint flag and return the new state.
    pub fn toggle_sprint(&mut self) -> bool {
        self.set_sprinting(!self.sprinting);
        self.sprinting
    }

    /// Map cells covered by one move at the current gait.
    #[inline]
    pub fn speed(&self) -> f64 {
        if self.sprinting {
            self.config.sprint_speed
        } else {
            self.config.walk_speed
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_must_be_on_grid() {
        let cfg = ViewConfig::default();
        assert!(View::new(Grid::sample(), 2.5, 2.5, cfg).is_ok());
        assert_eq!(
            View::new(Grid::sample(), 5.0, 1.0, cfg).unwrap_err(),
            ViewError::StartOutOfBounds { x: 5.0, y: 1.0 }
        );
        assert_eq!(
            View::new(Grid::sample(), -0.5, 1.0, cfg).unwrap_err(),
            ViewError::StartOutOfBounds { x: -0.5, y: 1.0 }
        );
        assert_eq!(
            View::new(Grid::sample(), f64::NAN, 1.0, cfg).unwrap_err(),
            ViewError::NonFiniteStart
        );
    }

    #[test]
    fn empty_viewport_rejected() {
        let cfg = ViewConfig::default().with_viewport(0, 480);
        assert_eq!(
            View::new(Grid::sample(), 2.5, 2.5, cfg).unwrap_err(),
            ViewError::BadViewport {
                width: 0,
                height: 480
            }
        );
    }

    #[test]
    fn bad_speeds_rejected() {
        let open = Grid::new([[0u8; 3]; 3]).unwrap();
        let place = |cfg| View::new(open.clone(), 1.5, 1.5, cfg).map(|_| ());
        let base = ViewConfig::default();

        assert_eq!(
            place(ViewConfig { walk_speed: f64::NAN, ..base }),
            Err(ViewError::BadConfig { field: "walk_speed" })
        );
        assert_eq!(
            place(ViewConfig { sprint_speed: -0.2, ..base }),
            Err(ViewError::BadConfig { field: "sprint_speed" })
        );
        assert_eq!(
            place(ViewConfig { rot_speed: f64::INFINITY, ..base }),
            Err(ViewError::BadConfig { field: "rot_speed" })
        );
        assert_eq!(
            place(ViewConfig { plane_len: f64::NAN, ..base }),
            Err(ViewError::BadConfig { field: "plane_len" })
        );
        assert_eq!(place(ViewConfig { walk_speed: 0.0, ..base }), Ok(()));
    }

    #[test]
    fn look_left_then_right_restores_pose() {
        let mut v = View::new(Grid::sample(), 2.5, 2.5, ViewConfig::default()).unwrap();
        let before = *v.pose();
        v.look_left();
        assert!(v.pose().dir.y > 0.0, "look_left turns counter-clockwise");
        v.look_right();
        assert!((v.pose().dir - before.dir).length() < 1e-12);
        assert!((v.pose().plane - before.plane).length() < 1e-12);
    }

    #[test]
    fn sprint_toggles_speed() {
        let mut v = View::new(Grid::sample(), 2.5, 2.5, ViewConfig::default()).unwrap();
        assert_eq!(v.speed(), 0.1);
        assert!(v.toggle_sprint());
        assert_eq!(v.speed(), 0.2);
        assert!(!v.toggle_sprint());
        assert_eq!(v.speed(), 0.1);
    }
}
