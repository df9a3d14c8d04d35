//! Overhead 2-D view of a grid map with the viewer's ray fan.
//!
//! Controls  W/S = forward/back  A/D = strafe  ←/→ = turn  R = sprint  Esc = quit
//!
//! ```bash
//! cargo run --release --bin map_view -- [--map level.txt] [--x 1.5 --y 1.5]
//! ```

use anyhow::Context;
use clap::Parser;
use glam::DVec2;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::path::PathBuf;

use gridcast_rs::{
    renderer::{EXIT_COLOUR, Palette},
    view::{MoveOutcome, View, ViewConfig},
    world::{EXIT_TRIGGER, Grid, NO_TEXTURE},
};

const WIDTH: usize = 768;
const HEIGHT: usize = 768;
/// rays drawn across the field of view
const FAN: u32 = 48;

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Text map, one row of texture codes per line (built-in 5×5 map if omitted)
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    #[arg(long, default_value_t = 1.5)]
    x: f64,

    #[arg(long, default_value_t = 1.5)]
    y: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let grid = match &opts.map {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?
            .parse::<Grid>()
            .with_context(|| format!("parsing map {}", path.display()))?,
        None => Grid::sample(),
    };
    log::info!("map {}×{}", grid.rows(), grid.cols());

    // only the ray fan is cast here, the viewport just spaces it
    let cfg = ViewConfig::default().with_viewport(FAN, 1);
    let mut view = View::new(grid, opts.x, opts.y, cfg).context("placing the viewer")?;

    // ─────────── map‑space → screen‑space transform ────────────
    // rows run down the screen, columns across
    let rows = view.grid().rows() as f64;
    let cols = view.grid().cols() as f64;
    let scale = (WIDTH as f64 / cols).min(HEIGHT as f64 / rows) * 0.9; // 10 % margin
    let offset_x = (WIDTH as f64 - cols * scale) / 2.0;
    let offset_y = (HEIGHT as f64 - rows * scale) / 2.0;
    let to_screen = |p: DVec2| -> (i32, i32) {
        ((p.y * scale + offset_x) as i32, (p.x * scale + offset_y) as i32)
    };

    let palette = Palette::default().with_colour(EXIT_TRIGGER, EXIT_COLOUR);
    let mut buffer = vec![0u32; WIDTH * HEIGHT];
    let mut win = Window::new("Grid map", WIDTH, HEIGHT, WindowOptions::default())?;
    win.set_target_fps(60);

    while win.is_open() && !win.is_key_down(Key::Escape) {
        if win.is_key_down(Key::Left) {
            view.look_left();
        }
        if win.is_key_down(Key::Right) {
            view.look_right();
        }
        if win.is_key_pressed(Key::R, KeyRepeat::No) {
            view.toggle_sprint();
        }
        let outcomes = [
            (win.is_key_down(Key::W) || win.is_key_down(Key::Up)).then(|| view.move_forward()),
            (win.is_key_down(Key::S) || win.is_key_down(Key::Down)).then(|| view.move_back()),
            win.is_key_down(Key::A).then(|| view.move_left()),
            win.is_key_down(Key::D).then(|| view.move_right()),
        ];
        if outcomes.contains(&Some(MoveOutcome::TriggeredExit)) {
            log::info!("exit reached at {}", view.pos());
        }

        /* ─────────── cells ─────────── */
        buffer.fill(0x00_101010);
        for (x, row) in view.grid().iter_rows().enumerate() {
            for (y, &code) in row.iter().enumerate() {
                if code == NO_TEXTURE {
                    continue;
                }
                let colour = palette[code];
                let (x0, y0) = to_screen(DVec2::new(x as f64, y as f64));
                let (x1, y1) = to_screen(DVec2::new(x as f64 + 1.0, y as f64 + 1.0));
                fill_rect(&mut buffer, WIDTH, HEIGHT, x0, y0, x1 - 1, y1 - 1, colour);
            }
        }

        /* ─────────── ray fan ─────────── */
        let eye = view.pos();
        let (ex, ey) = to_screen(eye);
        for i in 0..FAN {
            let hit = view.cast_ray(2.0 * f64::from(i) / f64::from(FAN) - 1.0);
            let end = hit.point(eye).clamp(DVec2::ZERO, DVec2::new(rows, cols));
            let (hx, hy) = to_screen(end);
            let colour = if hit.contact() { 0x00_A0A0A0 } else { 0x00_604040 };
            draw_line(&mut buffer, WIDTH, HEIGHT, ex, ey, hx, hy, colour);
        }
        let (fx, fy) = to_screen(eye + view.pose().dir * 0.5);
        draw_line(&mut buffer, WIDTH, HEIGHT, ex, ey, fx, fy, 0x00_FFFFFF);
        fill_rect(&mut buffer, WIDTH, HEIGHT, ex - 2, ey - 2, ex + 2, ey + 2, 0x00_FFFFFF);

        win.update_with_buffer(&buffer, WIDTH, HEIGHT)?;
    }
    Ok(())
}

/// Inclusive rectangle, clipped to the buffer.
#[allow(clippy::too_many_arguments)]
fn fill_rect(buf: &mut [u32], w: usize, h: usize, x0: i32, y0: i32, x1: i32, y1: i32, colour: u32) {
    let (x0, x1) = (x0.max(0), x1.min(w as i32 - 1));
    let (y0, y1) = (y0.max(0), y1.min(h as i32 - 1));
    for y in y0..=y1 {
        for x in x0..=x1 {
            buf[y as usize * w + x as usize] = colour;
        }
    }
}

/// Integer Bresenham line‑drawing algorithm.
#[allow(clippy::too_many_arguments)]
fn draw_line(
    buf: &mut [u32],
    w: usize,
    h: usize,
    mut x0: i32,
    mut y0: i32,
    x1: i32,
    y1: i32,
    colour: u32,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (0..w as i32).contains(&x0) && (0..h as i32).contains(&y0) {
            buf[y0 as usize * w + x0 as usize] = colour;
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
