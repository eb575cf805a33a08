//! First-person walker for the software grid caster.
//!
//! Controls  W/↑ forward · S/↓ back · A/← turn left · D/→ turn right
//!           1 shading off · 2 shading on · Esc quit
//!
//! ```bash
//! cargo run --release -- [--width 640 --height 480] [--textures DIR]
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use glam::vec2;
use minifb::{Key, Window, WindowOptions};

use yawolf_rs::assets;
use yawolf_rs::renderer::{PlaneTextures, RayCaster};
use yawolf_rs::sim::CameraRig;
use yawolf_rs::world::{Camera, GridMap, Pixel};

#[derive(Parser)]
#[command(about = "Wolfenstein-style software ray caster")]
struct Args {
    /// Render target width in pixels
    #[arg(long, default_value_t = 640)]
    width: usize,

    /// Render target height in pixels
    #[arg(long, default_value_t = 480)]
    height: usize,

    /// Directory holding 0.png..5.png wall textures; built-in procedural
    /// set when omitted
    #[arg(long)]
    textures: Option<PathBuf>,
}

/// 24×24 demo world. `0` walkable; codes 1..=6 pick wall textures.
/// The border is closed — the caster treats an escaping ray as fatal.
#[rustfmt::skip]
const WORLD: [[u8; 24]; 24] = [
    [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,2,2,2,2,2,2,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,2,0,0,0,0,2,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,2,0,0,0,0,2,0,0,0,0,3,0,0,0,3,0,0,0,0,0,1],
    [1,0,0,2,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,2,0,0,0,0,2,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,2,2,2,2,2,2,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,3,0,0,0,3,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,4,4,4,0,4,4,4,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,5,5,5,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,5,5,5,0,0,6,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,5,5,5,0,0,6,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
];

fn demo_map() -> GridMap {
    let cells = WORLD.iter().flatten().copied().collect();
    GridMap::new(24, 24, cells).expect("demo map dimensions are fixed")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let bank = match &args.textures {
        Some(dir) => assets::load_bank(dir)
            .with_context(|| format!("loading textures from {}", dir.display()))?,
        None => assets::builtin_bank(),
    };

    // index 4 is the floor/ceiling tile in both texture sets
    let planes = PlaneTextures { floor: 4, ceiling: 4 };
    let mut caster = RayCaster::new(args.width, args.height, bank, planes)?;

    let map = demo_map();
    let mut rig = CameraRig::new(Camera::new(vec2(21.5, 13.5), vec2(1.0, 0.0)));

    let mut frame = vec![Pixel::BLACK; args.width * args.height];
    let mut fb32 = vec![0u32; args.width * args.height];

    let mut win = Window::new(
        "yawolf – software ray caster",
        args.width,
        args.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(60);

    let mut last = Instant::now();

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let dt_ms = last.elapsed().as_secs_f32() * 1000.0;
        last = Instant::now();

        /* --------------- commands; the rig drops them while busy -------- */
        let cam = rig.camera;
        if win.is_key_down(Key::W) || win.is_key_down(Key::Up) {
            // collision stays with the caller: both axes must be open
            if map.is_open((cam.pos.x + cam.dir.x) as i32, cam.pos.y as i32)
                && map.is_open(cam.pos.x as i32, (cam.pos.y + cam.dir.y) as i32)
            {
                rig.move_forward();
            }
        }
        if win.is_key_down(Key::S) || win.is_key_down(Key::Down) {
            if map.is_open((cam.pos.x - cam.dir.x) as i32, cam.pos.y as i32)
                && map.is_open(cam.pos.x as i32, (cam.pos.y - cam.dir.y) as i32)
            {
                rig.move_backward();
            }
        }
        if win.is_key_down(Key::A) || win.is_key_down(Key::Left) {
            rig.rotate_left();
        }
        if win.is_key_down(Key::D) || win.is_key_down(Key::Right) {
            rig.rotate_right();
        }
        if win.is_key_down(Key::Key1) {
            caster.set_shading(false);
        }
        if win.is_key_down(Key::Key2) {
            caster.set_shading(true);
        }

        rig.advance(dt_ms);

        /* --------------- draw ------------------------------------------- */
        let t0 = Instant::now();
        caster.render(&rig.camera, &map, &mut frame)?;
        for (dst, px) in fb32.iter_mut().zip(&frame) {
            *dst = px.to_0rgb();
        }
        acc_time += t0.elapsed();
        acc_frames += 1;

        win.update_with_buffer(&fb32, args.width, args.height)?;

        // ─────────── report every ~3 s ──────────────────────────────────
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            println!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
