// Floor and ceiling casting: perspective back-projection from the
// wall-base point, no per-row DDA.

use glam::DVec2;

use super::walls::{Hit, Side};
use super::{RayCaster, RenderError, Span};
use crate::world::{Pixel, TEXTURE_SIZE};

impl RayCaster {
    /// Fill the rows below the wall span with floor texels and the
    /// vertically mirrored rows above with ceiling texels.
    pub(super) fn draw_plane_column(
        &self,
        frame: &mut [Pixel],
        x: usize,
        hit: &Hit,
        span: &Span,
        pos: DVec2,
    ) -> Result<(), RenderError> {
        // world point on the floor directly under the wall hit; four
        // cases depending on which face of the cell the ray entered
        let (base_x, base_y) = match hit.side {
            Side::X if hit.ray_dir.x > 0.0 => (hit.map_x as f64, hit.map_y as f64 + hit.wall_x),
            Side::X => (hit.map_x as f64 + 1.0, hit.map_y as f64 + hit.wall_x),
            Side::Y if hit.ray_dir.y > 0.0 => (hit.map_x as f64 + hit.wall_x, hit.map_y as f64),
            Side::Y => (hit.map_x as f64 + hit.wall_x, hit.map_y as f64 + 1.0),
        };

        let floor_tex = self.bank().texture(self.planes.floor)?;
        let ceil_tex = self.bank().texture(self.planes.ceiling)?;
        let (width, height) = (self.width(), self.height());

        for y in (span.draw_end + 1)..height {
            let row_dist = self.row_dist[y];

            // interpolate between the player (weight 0) and the wall
            // base (weight 1) at this row's projected distance
            let weight = row_dist / hit.dist;
            let floor_x = weight * base_x + (1.0 - weight) * pos.x;
            let floor_y = weight * base_y + (1.0 - weight) * pos.y;

            // wrap into texture space
            let tex_x =
                ((floor_x * TEXTURE_SIZE as f64) as i64).rem_euclid(TEXTURE_SIZE as i64) as usize;
            let tex_y =
                ((floor_y * TEXTURE_SIZE as f64) as i64).rem_euclid(TEXTURE_SIZE as i64) as usize;

            let level = self.shade_level(row_dist);
            frame[y * width + x] = floor_tex.sample(level, tex_x, tex_y);
            // ceiling reuses the sample at the row mirrored about mid-screen
            frame[(height - y) * width + x] = ceil_tex.sample(level, tex_x, tex_y);
        }
        Ok(())
    }
}
