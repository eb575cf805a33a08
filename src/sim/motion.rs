// Grid-step camera animation: discrete move/turn commands integrated
// over wall-clock milliseconds.

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use crate::world::Camera;

/// Milliseconds for one full map-unit translation (`dir / 350 * dt`).
pub const MOVE_DIVISOR: f32 = 350.0;

/// Turn speed in radians per millisecond.
pub const TURN_RATE: f32 = 0.004;

/// The one in-flight motion, if any.
///
/// Exactly one variant is active at a time; commands issued while not
/// [`Motion::Idle`] are dropped rather than queued, so at most one motion
/// is ever in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Idle,
    Translating {
        /// Where the move ends; position snaps here on the final tick.
        target: Vec2,
        /// Unit step direction (forward or backward).
        dir: Vec2,
        /// Map units left to cover.
        remaining: f32,
    },
    Rotating {
        /// Absolute heading the turn ends at.
        target: f32,
        /// +1 = counter-clockwise, -1 = clockwise.
        sign: f32,
        /// Radians left to sweep.
        remaining: f32,
    },
}

/// Owns a [`Camera`] and animates it one motion at a time.
///
/// `advance` is the single mutator: it integrates the active motion over
/// the elapsed milliseconds and snaps to the exact target on the final
/// tick, so repeated frames never accumulate overshoot.
pub struct CameraRig {
    pub camera: Camera,
    motion: Motion,
}

impl CameraRig {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            motion: Motion::Idle,
        }
    }

    #[inline]
    pub fn motion(&self) -> Motion {
        self.motion
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.motion == Motion::Idle
    }

    /// Start a one-cell move along the facing direction. No-op unless idle.
    pub fn move_forward(&mut self) {
        self.begin_move(self.camera.dir);
    }

    /// Start a one-cell move against the facing direction. No-op unless idle.
    pub fn move_backward(&mut self) {
        self.begin_move(-self.camera.dir);
    }

    /// Start a quarter turn counter-clockwise. No-op unless idle.
    pub fn rotate_left(&mut self) {
        self.begin_turn(1.0);
    }

    /// Start a quarter turn clockwise. No-op unless idle.
    pub fn rotate_right(&mut self) {
        self.begin_turn(-1.0);
    }

    fn begin_move(&mut self, dir: Vec2) {
        if self.motion != Motion::Idle {
            return;
        }
        let target = self.camera.pos + dir;
        self.motion = Motion::Translating {
            target,
            dir,
            remaining: (target - self.camera.pos).length(),
        };
    }

    fn begin_turn(&mut self, sign: f32) {
        if self.motion != Motion::Idle {
            return;
        }
        self.motion = Motion::Rotating {
            target: self.camera.heading() + sign * FRAC_PI_2,
            sign,
            remaining: FRAC_PI_2,
        };
    }

    /// Integrate the active motion over `dt_ms` elapsed milliseconds.
    pub fn advance(&mut self, dt_ms: f32) {
        match self.motion {
            Motion::Idle => {}

            Motion::Translating {
                target,
                dir,
                mut remaining,
            } => {
                let step = dir / MOVE_DIVISOR * dt_ms;
                self.camera.pos += step;
                remaining -= step.length();
                if remaining <= 0.0 {
                    // kill the overshoot from the last partial tick
                    self.camera.pos = target;
                    self.motion = Motion::Idle;
                } else {
                    self.motion = Motion::Translating {
                        target,
                        dir,
                        remaining,
                    };
                }
            }

            Motion::Rotating {
                target,
                sign,
                mut remaining,
            } => {
                let rotation = (TURN_RATE * dt_ms).min(remaining) * sign;
                self.camera.rotate(rotation);
                remaining -= rotation.abs();
                if remaining <= 0.0 {
                    // exact heading; incremental matrices drift
                    self.camera.snap_heading(target);
                    self.motion = Motion::Idle;
                } else {
                    self.motion = Motion::Rotating {
                        target,
                        sign,
                        remaining,
                    };
                }
            }
        }
    }
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/
