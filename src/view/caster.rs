//! Per-column DDA ray caster.
//!
//! Column `i` of a `width`-wide screen maps to camera-plane offset
//! `2i / width - 1`. Its ray steps from grid line to grid line until it
//! enters a non-empty cell or leaves the map. The perpendicular distance to
//! that cell sets the height of the column's wall slice.
//!
//! ```text
//!   rayDir    = dir + plane * camX
//!   deltaDist = (|ray| / |ray.x|, |ray| / |ray.y|)
//!   perpDist  = |(map.x - pos.x + (1 - step.x) / 2) / ray.x|   (X side)
//!   lineH     = height / perpDist
//! ```

use std::iter::FusedIterator;

use glam::{DVec2, IVec2};

use super::{Pose, View};
use crate::world::{Cell, TextureId};

/// Keeps `height / dist` finite when the viewer is flush against a wall.
const DIST_EPSILON: f64 = 1e-6;

/// Which family of grid lines the ray crossed last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// crossed a line of constant `x` (stepped along the row axis)
    X,
    /// crossed a line of constant `y`
    Y,
}

/// Result of tracing one ray through the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub ray_dir: DVec2,
    /// Last visited cell: the wall that stopped the ray, or the first cell
    /// outside the map.
    pub cell: IVec2,
    /// `Wall`, `Exit` or `OutOfBounds`; never `Empty`.
    pub hit: Cell,
    pub side: Side,
    /// Distance measured along `dir`, not along the ray (no fisheye).
    pub perp_dist: f64,
}

impl RayHit {
    /// `NO_TEXTURE` when the ray left the map.
    #[inline]
    pub fn texture(&self) -> TextureId {
        self.hit.texture()
    }

    #[inline]
    pub fn contact(&self) -> bool {
        self.hit != Cell::OutOfBounds
    }

    /// World-space point where the ray met the cell boundary.
    #[inline]
    pub fn point(&self, origin: DVec2) -> DVec2 {
        origin + self.ray_dir * self.perp_dist
    }
}

/// One vertical wall slice: column `x`, rows `y_start ..= y_end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSpan {
    pub x: i32,
    pub y_start: i32,
    pub y_end: i32,
    pub texture: TextureId,
    pub side: Side,
    pub perp_dist: f64,
}

impl ColumnSpan {
    /// `(x1, y1, x2, y2, texture)` line-segment form.
    #[inline]
    pub fn to_tuple(self) -> (i32, i32, i32, i32, TextureId) {
        (self.x, self.y_start, self.x, self.y_end, self.texture)
    }
}

impl From<ColumnSpan> for (i32, i32, i32, i32, TextureId) {
    fn from(span: ColumnSpan) -> Self {
        span.to_tuple()
    }
}

/// Lazy left-to-right sequence of [`ColumnSpan`]s for one pose.
///
/// Borrowing the view freezes the pose for the iterator's lifetime; clone
/// the iterator to walk the same frame again.
#[derive(Clone, Debug)]
pub struct Columns<'a> {
    view: &'a View,
    next: u32,
    end: u32,
}

impl Iterator for Columns<'_> {
    type Item = ColumnSpan;

    fn next(&mut self) -> Option<ColumnSpan> {
        if self.next >= self.end {
            return None;
        }
        let span = self.view.column(self.next);
        self.next += 1;
        Some(span)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.end - self.next) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Columns<'_> {}
impl FusedIterator for Columns<'_> {}

impl View {
    /// All `width` columns for the current pose, ascending `x`.
    pub fn cast(&self) -> Columns<'_> {
        Columns {
            view: self,
            next: 0,
            end: self.config.width,
        }
    }

    /// Wall slice for screen column `x` (`x < width`).
    pub fn column(&self, x: u32) -> ColumnSpan {
        let camera_x = 2.0 * f64::from(x) / f64::from(self.config.width) - 1.0;
        let hit = self.cast_ray(camera_x);

        let h = f64::from(self.config.height);
        let line_h = (h / (hit.perp_dist + DIST_EPSILON)).abs().trunc();
        let half = h / 2.0;
        let max_y = h - 1.0;
        // clamp is monotonic, so start <= end survives it
        let y_start = (half - line_h / 2.0).clamp(0.0, max_y) as i32;
        let y_end = (half + line_h / 2.0).clamp(0.0, max_y) as i32;

        ColumnSpan {
            x: x as i32,
            y_start,
            y_end,
            texture: hit.texture(),
            side: hit.side,
            perp_dist: hit.perp_dist,
        }
    }

    /// Trace the ray at camera-plane offset `camera_x` (−1 = left edge,
    /// 0 = centre, 1 = right edge).
    pub fn cast_ray(&self, camera_x: f64) -> RayHit {
        let Pose { pos, dir, plane } = self.pose;
        let ray = dir + plane * camera_x;

        let delta = DVec2::new(axis_delta(ray.x, ray.y), axis_delta(ray.y, ray.x));
        let step = IVec2::new(step_of(ray.x), step_of(ray.y));

        let mut map = pos.floor().as_ivec2();
        let mut side_dist = DVec2::new(
            first_crossing(pos.x, map.x, step.x) * delta.x,
            first_crossing(pos.y, map.y, step.y) * delta.y,
        );

        // Every step moves one axis toward the map edge, so this ends within
        // rows + cols steps. A zero ray has both distances infinite and
        // walks +Y off the map.
        let (hit, side) = loop {
            let side = if side_dist.x < side_dist.y {
                side_dist.x += delta.x;
                map.x += step.x;
                Side::X
            } else {
                side_dist.y += delta.y;
                map.y += step.y;
                Side::Y
            };
            match self.grid.cell_at(map) {
                Cell::Empty => continue,
                stop => break (stop, side),
            }
        };

        let perp_dist = match side {
            Side::X => ((f64::from(map.x) - pos.x + f64::from(1 - step.x) / 2.0) / ray.x).abs(),
            Side::Y => ((f64::from(map.y) - pos.y + f64::from(1 - step.y) / 2.0) / ray.y).abs(),
        };

        RayHit {
            ray_dir: ray,
            cell: map,
            hit,
            side,
            perp_dist,
        }
    }
}

/// Ray length per unit advance along `along`; infinite for a zero component.
#[inline]
fn axis_delta(along: f64, across: f64) -> f64 {
    if along == 0.0 {
        f64::INFINITY
    } else {
        (1.0 + (across / along).powi(2)).sqrt()
    }
}

#[inline]
fn step_of(component: f64) -> i32 {
    if component < 0.0 { -1 } else { 1 }
}

/// Fraction of a cell between `p` and the first grid line in `step` direction.
#[inline]
fn first_crossing(p: f64, cell: i32, step: i32) -> f64 {
    if step < 0 {
        p - f64::from(cell)
    } else {
        f64::from(cell) + 1.0 - p
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
