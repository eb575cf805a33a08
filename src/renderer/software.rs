//! ---------------------------------------------------------------------------
//! Classic software (CPU) grid ray caster
//!
//! * One ray per output column, DDA-traversed against the tile map.
//! * Walls, then floor and mirrored ceiling, per column — no Z-buffer,
//!   no per-pixel lighting; distance shading is an indexed load from the
//!   pre-lit texture variants.
//! * Writes into a caller-owned `&mut [Pixel]` frame, row-major
//!   `x + width * y`, dimensions fixed at construction.
//!
//! A frame either completes fully or fails with a [`RenderError`]; the
//! only runtime failure for a well-formed map is a ray escaping an
//! unenclosed border, which the caster reports instead of reading out
//! of bounds.
//! ---------------------------------------------------------------------------

mod planes;
mod walls;

use crate::world::{
    Camera, DARKNESS_LEVELS, GridMap, Pixel, TextureBank, TextureError, TextureId,
};

/// Which library textures pave the floor and the ceiling.
///
/// Explicit configuration rather than a reserved library slot, so the
/// asset order carries no hidden meaning.
#[derive(Clone, Copy, Debug)]
pub struct PlaneTextures {
    pub floor: TextureId,
    pub ceiling: TextureId,
}

/// Construction-time failures. No partial engine is ever produced.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("render target must be nonzero, got {width}x{height}")]
    ZeroTarget { width: usize, height: usize },

    #[error("texture bank is empty")]
    NoTextures,

    #[error("floor/ceiling texture id {0} out of range")]
    BadPlaneTexture(TextureId),
}

/// Per-frame failures. The frame is aborted, never partially trusted.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("frame buffer holds {got} pixels, expected {expected}")]
    BadFrameSize { expected: usize, got: usize },

    #[error("map cell code {code} needs more than the {have} textures loaded")]
    MissingTexture { code: u8, have: usize },

    #[error("ray for column {column} left the map at ({x}, {y}); the border must be closed")]
    RayEscaped { column: usize, x: i32, y: i32 },

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// The renderer. Owns the texture library and the per-row distance
/// table; one instance per render target, single-threaded use.
#[derive(Debug)]
pub struct RayCaster {
    width: usize,
    height: usize,
    bank: TextureBank,
    planes: PlaneTextures,
    /// Perspective distance of each floor row: `height / (2y - height)`.
    row_dist: Vec<f64>,
    shading: bool,
}

impl RayCaster {
    /// Validate the configuration and build the row-distance table.
    pub fn new(
        width: usize,
        height: usize,
        bank: TextureBank,
        planes: PlaneTextures,
    ) -> Result<Self, SetupError> {
        if width == 0 || height == 0 {
            return Err(SetupError::ZeroTarget { width, height });
        }
        if bank.is_empty() {
            return Err(SetupError::NoTextures);
        }
        for id in [planes.floor, planes.ceiling] {
            if id as usize >= bank.len() {
                return Err(SetupError::BadPlaneTexture(id));
            }
        }

        let row_dist = (0..height)
            .map(|y| height as f64 / (2.0 * y as f64 - height as f64))
            .collect();

        Ok(Self {
            width,
            height,
            bank,
            planes,
            row_dist,
            shading: true,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn bank(&self) -> &TextureBank {
        &self.bank
    }

    /// Toggle distance shading; when off every sample uses level 0.
    pub fn set_shading(&mut self, on: bool) {
        self.shading = on;
    }

    /// Render one frame into `frame` (`width * height` pixels, row-major).
    ///
    /// The buffer is cleared to opaque black first; wall, floor and
    /// ceiling writes are the only other mutation. Rendering the same
    /// pose and map twice produces byte-identical frames.
    pub fn render(
        &self,
        camera: &Camera,
        map: &GridMap,
        frame: &mut [Pixel],
    ) -> Result<(), RenderError> {
        let expected = self.width * self.height;
        if frame.len() != expected {
            return Err(RenderError::BadFrameSize {
                expected,
                got: frame.len(),
            });
        }
        // one check per frame covers every wall code the map can produce
        if map.max_code() as usize > self.bank.len() {
            return Err(RenderError::MissingTexture {
                code: map.max_code(),
                have: self.bank.len(),
            });
        }

        frame.fill(Pixel::BLACK);

        let pos = camera.pos.as_dvec2();
        for x in 0..self.width {
            let hit = walls::cast(camera, map, x, self.width)?;
            let span = Span::new(self.height, hit.dist);
            self.draw_wall_column(frame, x, &hit, &span)?;
            self.draw_plane_column(frame, x, &hit, &span, pos)?;
        }
        Ok(())
    }

    /// Distance to darkness level: `clamp(floor(dist * 2), 0, 47)`.
    #[inline]
    fn shade_level(&self, dist: f64) -> usize {
        if !self.shading {
            return 0;
        }
        ((dist * 2.0) as i64).clamp(0, DARKNESS_LEVELS as i64 - 1) as usize
    }
}

/// Vertical extent of one wall column on screen.
struct Span {
    line_height: i64,
    draw_start: usize,
    draw_end: usize,
}

impl Span {
    fn new(height: usize, dist: f64) -> Self {
        // the cap keeps the fixed-point texel math inside i64 when the
        // camera is flush against a wall
        let line_height = ((height as f64 / dist) as i64).min(i32::MAX as i64);
        let mid = height as i64 / 2;
        let half = line_height / 2;
        Self {
            line_height,
            draw_start: (mid - half).clamp(0, height as i64 - 1) as usize,
            draw_end: (mid + half).clamp(0, height as i64 - 1) as usize,
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::TEXTURE_SIZE;
    use glam::vec2;

    fn solid(r: u8, g: u8, b: u8) -> crate::world::Texture {
        crate::world::Texture::build(&vec![Pixel::opaque(r, g, b); TEXTURE_SIZE * TEXTURE_SIZE])
            .unwrap()
    }

    /// Five solid-colour textures; index 0 = red walls, index 4 = green
    /// floor/ceiling, matching the demo's asset order.
    fn demo_bank() -> TextureBank {
        let mut bank = TextureBank::new();
        bank.push(solid(255, 0, 0));
        bank.push(solid(0, 0, 255));
        bank.push(solid(255, 255, 0));
        bank.push(solid(128, 128, 128));
        bank.push(solid(0, 255, 0));
        bank
    }

    fn demo_planes() -> PlaneTextures {
        PlaneTextures { floor: 4, ceiling: 4 }
    }

    /// `n`×`n` map of open space ringed by wall code 1.
    fn bordered_map(n: usize) -> GridMap {
        let mut cells = vec![0u8; n * n];
        for i in 0..n {
            cells[i] = 1;
            cells[(n - 1) * n + i] = 1;
            cells[i * n] = 1;
            cells[i * n + n - 1] = 1;
        }
        GridMap::new(n, n, cells).unwrap()
    }

    fn head_on_scene() -> (RayCaster, Camera, GridMap) {
        let engine = RayCaster::new(640, 480, demo_bank(), demo_planes()).unwrap();
        let camera = Camera::new(vec2(5.5, 5.5), vec2(1.0, 0.0));
        (engine, camera, bordered_map(10))
    }

    #[test]
    fn construction_rejects_bad_configuration() {
        assert_eq!(
            RayCaster::new(0, 480, demo_bank(), demo_planes()).unwrap_err(),
            SetupError::ZeroTarget { width: 0, height: 480 }
        );
        assert_eq!(
            RayCaster::new(640, 480, TextureBank::new(), demo_planes()).unwrap_err(),
            SetupError::NoTextures
        );
        let planes = PlaneTextures { floor: 9, ceiling: 4 };
        assert_eq!(
            RayCaster::new(640, 480, demo_bank(), planes).unwrap_err(),
            SetupError::BadPlaneTexture(9)
        );
    }

    #[test]
    fn row_distance_table_matches_projection() {
        let engine = RayCaster::new(640, 480, demo_bank(), demo_planes()).unwrap();
        assert_eq!(engine.row_dist[400], 480.0 / (800.0 - 480.0));
        assert_eq!(engine.row_dist[479], 480.0 / (958.0 - 480.0));
    }

    #[test]
    fn head_on_wall_band_is_centred_and_shaded() {
        let (engine, camera, map) = head_on_scene();
        let mut frame = vec![Pixel::default(); 640 * 480];
        engine.render(&camera, &map, &mut frame).unwrap();

        // perpendicular distance 3.5 → lineHeight 137, band 172..308,
        // darkness level floor(3.5 * 2) = 7
        let wall = engine.bank().texture(0).unwrap().sample(7, 0, 0);
        let col = 320;
        assert_eq!(frame[240 * 640 + col], wall);
        assert_eq!(frame[172 * 640 + col], wall);
        assert_eq!(frame[307 * 640 + col], wall);

        // floor row 400: distance 1.5 → level 3; ceiling mirrors it at 80
        let plane = engine.bank().texture(4).unwrap().sample(3, 0, 0);
        assert_eq!(frame[400 * 640 + col], plane);
        assert_eq!(frame[80 * 640 + col], frame[400 * 640 + col]);

        // nothing above the mirrored ceiling of the last floor row
        assert_eq!(frame[col], Pixel::BLACK);
    }

    #[test]
    fn shading_toggle_samples_level_zero() {
        let (mut engine, camera, map) = head_on_scene();
        engine.set_shading(false);
        let mut frame = vec![Pixel::default(); 640 * 480];
        engine.render(&camera, &map, &mut frame).unwrap();
        // undarkened wall colour straight from the source texture
        assert_eq!(frame[240 * 640 + 320], Pixel::opaque(255, 0, 0));
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let (engine, camera, map) = head_on_scene();
        let mut a = vec![Pixel::default(); 640 * 480];
        let mut b = vec![Pixel::opaque(9, 9, 9); 640 * 480];
        engine.render(&camera, &map, &mut a).unwrap();
        engine.render(&camera, &map, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn frame_size_mismatch_is_reported() {
        let (engine, camera, map) = head_on_scene();
        let mut small = vec![Pixel::default(); 640];
        assert_eq!(
            engine.render(&camera, &map, &mut small).unwrap_err(),
            RenderError::BadFrameSize {
                expected: 640 * 480,
                got: 640
            }
        );
    }

    #[test]
    fn map_code_past_library_end_is_reported() {
        let mut bank = TextureBank::new();
        bank.push(solid(255, 0, 0));
        let engine =
            RayCaster::new(64, 64, bank, PlaneTextures { floor: 0, ceiling: 0 }).unwrap();

        // border built from wall code 2, which the one-texture bank
        // cannot satisfy
        let mut raw = vec![0u8; 100];
        for i in 0..10 {
            raw[i] = 2;
            raw[90 + i] = 2;
            raw[i * 10] = 2;
            raw[i * 10 + 9] = 2;
        }
        let map = GridMap::new(10, 10, raw).unwrap();
        let camera = Camera::new(vec2(5.5, 5.5), vec2(1.0, 0.0));
        let mut frame = vec![Pixel::default(); 64 * 64];
        assert_eq!(
            engine.render(&camera, &map, &mut frame).unwrap_err(),
            RenderError::MissingTexture { code: 2, have: 1 }
        );
    }

    #[test]
    fn unenclosed_map_aborts_the_frame() {
        let (engine, camera, _) = head_on_scene();
        let open = GridMap::new(10, 10, vec![0u8; 100]).unwrap();
        let mut frame = vec![Pixel::default(); 640 * 480];
        let err = engine.render(&camera, &open, &mut frame).unwrap_err();
        assert!(matches!(err, RenderError::RayEscaped { .. }));
    }
}
