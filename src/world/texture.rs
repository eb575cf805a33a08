// Pre-lit texture storage for the software caster.
// The renderer and map logic interact through `TextureId` only.

/// Side length of every wall/floor texture, in texels.
pub const TEXTURE_SIZE: usize = 64;

/// Number of precomputed darkness variants per texture.
pub const DARKNESS_LEVELS: usize = 48;

/// Runtime handle for a texture in a [`TextureBank`].
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// Fixed-layout RGBA pixel.
///
/// Shading math works on the named channels, never on a packed word, so
/// the divide-then-truncate arithmetic is byte-order independent. Packing
/// into the window framebuffer format happens only at the presentation
/// seam ([`Pixel::to_0rgb`]).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::opaque(0, 0, 0);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Pixel { r, g, b, a: 255 }
    }

    /// Divide each colour channel by `divisor` and truncate.
    /// Alpha comes out fully opaque regardless of the source.
    fn attenuated(self, divisor: f32) -> Self {
        Pixel {
            r: (self.r as f32 / divisor) as u8,
            g: (self.g as f32 / divisor) as u8,
            b: (self.b as f32 / divisor) as u8,
            a: 255,
        }
    }

    /// Pack for a minifb-style 0x00RRGGBB framebuffer word.
    #[inline]
    pub fn to_0rgb(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

/// Things that can go wrong when building or querying textures.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Source buffer is not exactly `TEXTURE_SIZE * TEXTURE_SIZE` pixels.
    #[error("texture source holds {0} pixels, expected {expected}", expected = TEXTURE_SIZE * TEXTURE_SIZE)]
    WrongSize(usize),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),
}

/// Per-level attenuation divisors.
///
/// `k(0) = 1.0`, `k(d) = k(d-1) + d*0.0125 + d²*0.00025`, evaluated in
/// f32. Monotonically increasing, so a higher level is always darker.
/// The exact coefficients are load-bearing: they set how fast walls fade
/// with distance, and the tests pin them.
fn divisor_table() -> [f32; DARKNESS_LEVELS] {
    let mut k = [1.0f32; DARKNESS_LEVELS];
    for d in 1..DARKNESS_LEVELS {
        let df = d as f32;
        k[d] = k[d - 1] + df * 0.0125 + df * df * 0.000_25;
    }
    k
}

/// One 64×64 texture plus its 48 pre-shaded variants.
///
/// Level 0 is the unattenuated source; level 47 the darkest. All levels
/// are built once at construction and immutable afterwards, so distance
/// shading at render time is a plain indexed load.
#[derive(Debug)]
pub struct Texture {
    /// `levels[d]` is a row-major `TEXTURE_SIZE * TEXTURE_SIZE` buffer.
    levels: Vec<Vec<Pixel>>,
}

impl Texture {
    /// Build the darkness cache from a decoded row-major RGBA source.
    ///
    /// Fails if the source is not exactly 64×64; no partial texture is
    /// ever produced.
    pub fn build(source: &[Pixel]) -> Result<Self, TextureError> {
        if source.len() != TEXTURE_SIZE * TEXTURE_SIZE {
            return Err(TextureError::WrongSize(source.len()));
        }
        let levels = divisor_table()
            .iter()
            .map(|&k| source.iter().map(|px| px.attenuated(k)).collect())
            .collect();
        Ok(Self { levels })
    }

    /// Borrow the pixel buffer for darkness level `d`.
    ///
    /// Levels past the darkest clamp to level 47 so the accessor is total.
    #[inline]
    pub fn level(&self, d: usize) -> &[Pixel] {
        &self.levels[d.min(DARKNESS_LEVELS - 1)]
    }

    /// Single texel fetch from darkness level `d`.
    #[inline]
    pub fn sample(&self, d: usize, x: usize, y: usize) -> Pixel {
        self.level(d)[y * TEXTURE_SIZE + x]
    }
}

/// Ordered texture library addressed by map cell codes.
///
/// Map code `n > 0` refers to the texture at index `n - 1`; the ordering
/// is the caller's asset-loading order and ids never move afterwards.
///
/// **Thread-safety:** access a `TextureBank` from a single thread or wrap
/// it in `RwLock`; the struct itself holds no interior mutability.
#[derive(Debug, Default)]
pub struct TextureBank {
    data: Vec<Texture>,
}

impl TextureBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of textures stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a texture and return its newly assigned id.
    pub fn push(&mut self, tex: Texture) -> TextureId {
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        id
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
