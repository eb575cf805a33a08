// Per-column ray casting: DDA traversal, fisheye-corrected distance,
// wall texture coordinates, and the vertical wall fill.

use glam::DVec2;

use super::{RayCaster, RenderError, Span};
use crate::world::{Camera, GridMap, Pixel, TEXTURE_SIZE, TextureId};

/// Which grid-line family the final DDA step crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Side {
    X,
    Y,
}

/// Everything the wall and plane fills need to know about one ray.
#[derive(Debug)]
pub(super) struct Hit {
    /// Perpendicular wall distance, projected on the camera axis.
    pub dist: f64,
    pub side: Side,
    pub map_x: i32,
    pub map_y: i32,
    pub ray_dir: DVec2,
    /// Fractional hit position along the wall face, in `[0, 1)`.
    pub wall_x: f64,
    /// Nonzero cell code of the hit wall.
    pub code: u8,
    /// Horizontal texel column, mirror-corrected.
    pub tex_x: usize,
}

/// Cast the ray for output column `column` and resolve the first wall.
pub(super) fn cast(
    camera: &Camera,
    map: &GridMap,
    column: usize,
    width: usize,
) -> Result<Hit, RenderError> {
    // -1 at the left edge, +1 at the right edge of the screen
    let camera_x = 2.0 * column as f64 / width as f64 - 1.0;
    let pos = camera.pos.as_dvec2();
    let ray_dir = camera.dir.as_dvec2() + camera.plane.as_dvec2() * camera_x;

    let mut map_x = pos.x.floor() as i32;
    let mut map_y = pos.y.floor() as i32;

    // distance along the ray between successive grid lines per axis;
    // an axis-aligned ray gets an infinite delta so the traversal only
    // ever advances on the other axis (and no NaN leaks out)
    let delta_x = if ray_dir.x == 0.0 {
        f64::INFINITY
    } else {
        (1.0 + (ray_dir.y / ray_dir.x).powi(2)).sqrt()
    };
    let delta_y = if ray_dir.y == 0.0 {
        f64::INFINITY
    } else {
        (1.0 + (ray_dir.x / ray_dir.y).powi(2)).sqrt()
    };

    let (step_x, mut side_dist_x) = if ray_dir.x < 0.0 {
        (-1, (pos.x - map_x as f64) * delta_x)
    } else {
        (1, (map_x as f64 + 1.0 - pos.x) * delta_x)
    };
    let (step_y, mut side_dist_y) = if ray_dir.y < 0.0 {
        (-1, (pos.y - map_y as f64) * delta_y)
    } else {
        (1, (map_y as f64 + 1.0 - pos.y) * delta_y)
    };
    // a camera sitting exactly on a grid line seeds 0 * inf on the
    // aligned axis; that must read "never crosses", not NaN
    if side_dist_x.is_nan() {
        side_dist_x = f64::INFINITY;
    }
    if side_dist_y.is_nan() {
        side_dist_y = f64::INFINITY;
    }

    // DDA: step whichever axis crosses its next grid line first until a
    // wall cell turns up; leaving the grid is a caller map-invariant
    // violation and aborts the frame instead of reading out of bounds
    let mut side = Side::X;
    let code = loop {
        if side_dist_x < side_dist_y {
            side_dist_x += delta_x;
            map_x += step_x;
            side = Side::X;
        } else {
            side_dist_y += delta_y;
            map_y += step_y;
            side = Side::Y;
        }
        match map.cell(map_x, map_y) {
            None => {
                return Err(RenderError::RayEscaped {
                    column,
                    x: map_x,
                    y: map_y,
                });
            }
            Some(0) => {}
            Some(code) => break code,
        }
    };

    // distance projected on the camera's forward axis; raw euclidean ray
    // length would bow straight walls outward at the screen edges
    let dist = match side {
        Side::X => ((map_x as f64 - pos.x + (1 - step_x) as f64 / 2.0) / ray_dir.x).abs(),
        Side::Y => ((map_y as f64 - pos.y + (1 - step_y) as f64 / 2.0) / ray_dir.y).abs(),
    };

    // where along the wall face the ray landed, from the other axis
    let mut wall_x = match side {
        Side::X => {
            pos.y + ((map_x as f64 - pos.x + (1 - step_x) as f64 / 2.0) / ray_dir.x) * ray_dir.y
        }
        Side::Y => {
            pos.x + ((map_y as f64 - pos.y + (1 - step_y) as f64 / 2.0) / ray_dir.y) * ray_dir.x
        }
    };
    wall_x -= wall_x.floor();

    let mut tex_x = (wall_x * TEXTURE_SIZE as f64) as usize;
    // mirror so both faces of a wall read the texture the same way round
    if (side == Side::X && ray_dir.x > 0.0) || (side == Side::Y && ray_dir.y < 0.0) {
        tex_x = TEXTURE_SIZE - tex_x - 1;
    }

    Ok(Hit {
        dist,
        side,
        map_x,
        map_y,
        ray_dir,
        wall_x,
        code,
        tex_x,
    })
}

impl RayCaster {
    /// Fill the wall rows of column `x` from the hit texture.
    pub(super) fn draw_wall_column(
        &self,
        frame: &mut [Pixel],
        x: usize,
        hit: &Hit,
        span: &Span,
    ) -> Result<(), RenderError> {
        let tex = self.bank().texture(hit.code as TextureId - 1)?;
        let texels = tex.level(self.shade_level(hit.dist));
        let height = self.height() as i64;

        for y in span.draw_start..span.draw_end {
            // fixed-point (8.8) screen-row → texel-row mapping; the
            // truncating division order is part of the contract
            let d = y as i64 * 256 - height * 128 + span.line_height * 128;
            let tex_y = ((d * TEXTURE_SIZE as i64 / span.line_height) / 256)
                .clamp(0, TEXTURE_SIZE as i64 - 1) as usize;
            frame[y * self.width() + x] = texels[tex_y * TEXTURE_SIZE + hit.tex_x];
        }
        Ok(())
    }
}

/*====================================================================*/
/*                                Tests                               */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

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

    #[test]
    fn head_on_ray_needs_no_fisheye_correction() {
        let map = bordered_map(10);
        let camera = Camera::new(vec2(5.5, 5.5), vec2(1.0, 0.0));
        // centre column of an even width → cameraX is exactly 0
        let hit = cast(&camera, &map, 320, 640).unwrap();
        assert_eq!(hit.dist, 3.5);
        assert_eq!(hit.side, Side::X);
        assert_eq!((hit.map_x, hit.map_y), (9, 5));
        assert_eq!(hit.code, 1);
    }

    #[test]
    fn head_on_hit_mirrors_the_texel_column() {
        let map = bordered_map(10);
        let camera = Camera::new(vec2(5.5, 5.5), vec2(1.0, 0.0));
        let hit = cast(&camera, &map, 320, 640).unwrap();
        // wallX folds to 0.5 → texel 32, mirrored to 31 for a +X ray
        assert_eq!(hit.wall_x, 0.5);
        assert_eq!(hit.tex_x, TEXTURE_SIZE - 32 - 1);
    }

    #[test]
    fn axis_aligned_rays_produce_no_nan() {
        let map = bordered_map(10);
        // facing +Y: the centre ray has rayDir.x == 0
        let camera = Camera::new(vec2(5.5, 5.5), vec2(0.0, 1.0));
        let hit = cast(&camera, &map, 320, 640).unwrap();
        assert_eq!(hit.side, Side::Y);
        assert_eq!(hit.dist, 3.5);
        assert!(hit.wall_x.is_finite());
    }

    #[test]
    fn side_distance_seeds_from_the_fractional_position() {
        let map = bordered_map(10);
        // off-centre start so the first crossing is nearer than one cell
        let camera = Camera::new(vec2(5.25, 5.5), vec2(-1.0, 0.0));
        let hit = cast(&camera, &map, 320, 640).unwrap();
        assert_eq!(hit.side, Side::X);
        assert_eq!((hit.map_x, hit.map_y), (0, 5));
        // wall face at x = 1.0, camera at 5.25
        assert_eq!(hit.dist, 4.25);
    }

    #[test]
    fn escaping_the_grid_is_an_error_not_a_read() {
        let open = GridMap::new(4, 4, vec![0u8; 16]).unwrap();
        let camera = Camera::new(vec2(1.5, 1.5), vec2(1.0, 0.0));
        let err = cast(&camera, &open, 320, 640).unwrap_err();
        assert_eq!(
            err,
            RenderError::RayEscaped {
                column: 320,
                x: 4,
                y: 1
            }
        );
    }
}
