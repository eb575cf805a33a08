//! Rendering layer.
//!
//! *The rest of the crate never touches a pixel buffer directly.*
//! The world supplies a [`crate::world::Camera`] pose and a
//! [`crate::world::GridMap`]; the software caster turns them into one
//! finished frame per call. Presentation (window, vsync, key polling)
//! stays outside the library.

pub mod software;

pub use software::{PlaneTextures, RayCaster, RenderError, SetupError};
