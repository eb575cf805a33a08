//! Yet another Wolfenstein-style grid ray caster.
//!
//! One frame per [`renderer::RayCaster::render`] call: a per-column DDA
//! against a [`world::GridMap`], distance shading via the pre-lit
//! variants of each [`world::Texture`], and a [`sim::CameraRig`] that
//! animates discrete grid moves and quarter turns into smooth,
//! overshoot-free trajectories. Presentation, input and asset decoding
//! stay in the binary.

pub mod assets;
pub mod renderer;
pub mod sim;
pub mod world;
