//! Texture sources for the demo binary.
//!
//! Decodes 64×64 PNG files into pre-lit [`Texture`]s, with a procedural
//! fallback set so the walker runs with nothing on disk. The library
//! core never loads assets itself; it only consumes decoded pixels.

use std::path::Path;

use crate::world::{Pixel, TEXTURE_SIZE, Texture, TextureBank, TextureError};

/// Number of textures the demo map references (codes 1..=6).
pub const DEMO_TEXTURES: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to decode {path}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("{path} is {width}x{height}, textures must be {TEXTURE_SIZE}x{TEXTURE_SIZE}")]
    BadDimensions {
        path: String,
        width: u32,
        height: u32,
    },

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Decode one 64×64 RGBA image file into a pre-lit texture.
///
/// A decode failure or wrong-size image aborts construction; no partial
/// texture is produced.
pub fn load_texture(path: &Path) -> Result<Texture, AssetError> {
    let img = image::open(path)
        .map_err(|source| AssetError::Decode {
            path: path.display().to_string(),
            source,
        })?
        .to_rgba8();
    if img.width() as usize != TEXTURE_SIZE || img.height() as usize != TEXTURE_SIZE {
        return Err(AssetError::BadDimensions {
            path: path.display().to_string(),
            width: img.width(),
            height: img.height(),
        });
    }
    let pixels: Vec<Pixel> = img
        .pixels()
        .map(|p| Pixel {
            r: p[0],
            g: p[1],
            b: p[2],
            a: p[3],
        })
        .collect();
    Ok(Texture::build(&pixels)?)
}

/// Load `0.png ..= 5.png` from `dir`, in map-code order.
pub fn load_bank(dir: &Path) -> Result<TextureBank, AssetError> {
    let mut bank = TextureBank::new();
    for i in 0..DEMO_TEXTURES {
        bank.push(load_texture(&dir.join(format!("{i}.png")))?);
    }
    Ok(bank)
}

/// Procedural stand-in set, one texture per demo map code; index 4 is
/// the floor/ceiling tile, matching the demo's plane configuration.
pub fn builtin_bank() -> TextureBank {
    let tex = |src: Vec<Pixel>| Texture::build(&src).expect("generators emit 64x64 buffers");

    let mut bank = TextureBank::new();
    bank.push(tex(brick(
        Pixel::opaque(170, 60, 50),
        Pixel::opaque(110, 100, 95),
    )));
    bank.push(tex(tiles(
        Pixel::opaque(60, 80, 160),
        Pixel::opaque(35, 45, 90),
    )));
    bank.push(tex(brick(
        Pixel::opaque(130, 130, 125),
        Pixel::opaque(70, 70, 68),
    )));
    bank.push(tex(planks(
        Pixel::opaque(150, 105, 60),
        Pixel::opaque(90, 60, 35),
    )));
    bank.push(tex(tiles(
        Pixel::opaque(105, 105, 100),
        Pixel::opaque(60, 60, 58),
    )));
    bank.push(tex(checker(
        Pixel::opaque(200, 200, 200),
        Pixel::opaque(60, 60, 60),
    )));
    bank
}

/// Running-bond brick courses, 16×8 bricks with one-texel mortar lines.
fn brick(brick: Pixel, mortar: Pixel) -> Vec<Pixel> {
    let mut px = vec![mortar; TEXTURE_SIZE * TEXTURE_SIZE];
    for y in 0..TEXTURE_SIZE {
        let offset = if (y / 8) & 1 == 0 { 0 } else { 8 };
        for x in 0..TEXTURE_SIZE {
            let in_mortar = y % 8 == 7 || (x + offset) % 16 == 15;
            if !in_mortar {
                px[y * TEXTURE_SIZE + x] = brick;
            }
        }
    }
    px
}

/// 16×16 tiles separated by grout lines.
fn tiles(base: Pixel, line: Pixel) -> Vec<Pixel> {
    (0..TEXTURE_SIZE * TEXTURE_SIZE)
        .map(|i| {
            let (x, y) = (i % TEXTURE_SIZE, i / TEXTURE_SIZE);
            if x % 16 == 0 || y % 16 == 0 { line } else { base }
        })
        .collect()
}

/// Vertical 8-texel planks with seams.
fn planks(wood: Pixel, seam: Pixel) -> Vec<Pixel> {
    (0..TEXTURE_SIZE * TEXTURE_SIZE)
        .map(|i| {
            let (x, y) = (i % TEXTURE_SIZE, i / TEXTURE_SIZE);
            // stagger the butt joints every other plank
            let joint_row = if (x / 8) & 1 == 0 { 0 } else { 16 };
            if x % 8 == 7 || y % 32 == joint_row {
                seam
            } else {
                wood
            }
        })
        .collect()
}

/// Classic 8×8 checkerboard.
fn checker(a: Pixel, b: Pixel) -> Vec<Pixel> {
    (0..TEXTURE_SIZE * TEXTURE_SIZE)
        .map(|i| {
            let (x, y) = (i % TEXTURE_SIZE, i / TEXTURE_SIZE);
            if (x / 8 + y / 8) & 1 == 0 { a } else { b }
        })
        .collect()
}
