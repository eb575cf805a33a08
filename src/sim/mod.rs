mod motion;

pub use motion::{CameraRig, MOVE_DIVISOR, Motion, TURN_RATE};
