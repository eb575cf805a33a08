mod camera;
mod grid;
mod texture;

pub use camera::{Camera, PLANE_LENGTH};
pub use grid::{GridMap, MapError};
pub use texture::{
    DARKNESS_LEVELS, Pixel, TEXTURE_SIZE, Texture, TextureBank, TextureError, TextureId,
};
