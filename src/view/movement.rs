//! Axis-blocked movement on the grid.
//!
//! Forward/back test the single cell the move would land in. Strafing tests
//! each axis on its own so the viewer slides along walls. Anything outside
//! the map counts as solid.

use glam::{DVec2, IVec2};

use super::View;
use crate::world::Cell;

/// What a movement call did. The host decides what an exit means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Blocked,
    /// Viewer bumped into the exit cell; position is unchanged.
    TriggeredExit,
}

impl View {
    pub fn move_forward(&mut self) -> MoveOutcome {
        self.advance(self.pose.dir * self.speed())
    }

    pub fn move_back(&mut self) -> MoveOutcome {
        self.advance(-self.pose.dir * self.speed())
    }

    pub fn move_left(&mut self) -> MoveOutcome {
        self.slide(self.pose.left() * self.speed())
    }

    pub fn move_right(&mut self) -> MoveOutcome {
        self.slide(-self.pose.left() * self.speed())
    }

    /// All-or-nothing step: commit only if the landing cell is empty.
    fn advance(&mut self, delta: DVec2) -> MoveOutcome {
        let target = self.pose.pos + delta;
        match self.grid.cell_at(cell_of(target)) {
            Cell::Empty => {
                self.pose.pos = target;
                MoveOutcome::Moved
            }
            Cell::Exit => {
                log::debug!("exit reached from {}", self.pose.pos);
                MoveOutcome::TriggeredExit
            }
            blocker => {
                log::debug!("move to {target} blocked by {blocker:?}");
                MoveOutcome::Blocked
            }
        }
    }

    /// X then Y, each gated by its own cell; Y is tested from the new X.
    /// An exit on either axis commits neither.
    fn slide(&mut self, delta: DVec2) -> MoveOutcome {
        let from = self.pose.pos;
        let mut to = from;

        for axis in [0, 1] {
            if delta[axis] == 0.0 {
                continue;
            }
            let mut step = to;
            step[axis] += delta[axis];
            match self.grid.cell_at(cell_of(step)) {
                Cell::Empty => to = step,
                Cell::Exit => {
                    log::debug!("exit reached while strafing from {from}");
                    return MoveOutcome::TriggeredExit;
                }
                _ => {}
            }
        }

        if to == from {
            log::debug!("strafe from {from} blocked on both axes");
            return MoveOutcome::Blocked;
        }
        self.pose.pos = to;
        MoveOutcome::Moved
    }
}

/// Floor, not truncation: `-0.2` is cell `-1`, i.e. off the map.
#[inline]
fn cell_of(p: DVec2) -> IVec2 {
    p.floor().as_ivec2()
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
