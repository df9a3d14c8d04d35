//! First-person software view of a grid map.
//!
//! Controls  W/S = forward/back  A/D = strafe  ←/→ = turn  R = sprint  Esc = quit
//!
//! ```bash
//! RUST_LOG=info cargo run --release --bin view_sw -- --map level.txt --x 1.5 --y 1.5
//! ```

use anyhow::Context;
use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use gridcast_rs::{
    renderer::{EXIT_COLOUR, Palette, RendererExt, Software},
    view::{ColumnSpan, MoveOutcome, View, ViewConfig},
    world::{EXIT_TRIGGER, Grid},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Text map, one row of texture codes per line (built-in 5×5 map if omitted)
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Start row coordinate
    #[arg(long, default_value_t = 1.5)]
    x: f64,

    /// Start column coordinate
    #[arg(long, default_value_t = 1.5)]
    y: f64,

    #[arg(long, default_value_t = 1024)]
    width: u32,

    #[arg(long, default_value_t = 768)]
    height: u32,
}

fn load_grid(path: Option<&Path>) -> anyhow::Result<Grid> {
    let Some(path) = path else {
        return Ok(Grid::sample());
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    text.parse::<Grid>()
        .with_context(|| format!("parsing map {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let grid = load_grid(opts.map.as_deref())?;
    let cfg = ViewConfig::default().with_viewport(opts.width, opts.height);
    let spawn = || View::new(grid.clone(), opts.x, opts.y, cfg).context("placing the viewer");
    let mut view = spawn()?;

    let (w, h) = (opts.width as usize, opts.height as usize);
    let mut win = Window::new("Grid ray caster", w, h, WindowOptions::default())?;
    win.set_target_fps(60);

    let palette = Palette::default().with_colour(EXIT_TRIGGER, EXIT_COLOUR);
    let mut renderer = Software::default();
    let mut score = 0u32;

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* turning --------------------------------------------------------- */
        if win.is_key_down(Key::Left) {
            view.look_left();
        }
        if win.is_key_down(Key::Right) {
            view.look_right();
        }
        if win.is_key_pressed(Key::R, KeyRepeat::No) {
            let on = view.toggle_sprint();
            log::info!("sprint {}", if on { "on" } else { "off" });
        }

        /* movement -------------------------------------------------------- */
        let outcomes = [
            (win.is_key_down(Key::W) || win.is_key_down(Key::Up)).then(|| view.move_forward()),
            (win.is_key_down(Key::S) || win.is_key_down(Key::Down)).then(|| view.move_back()),
            win.is_key_down(Key::A).then(|| view.move_left()),
            win.is_key_down(Key::D).then(|| view.move_right()),
        ];
        if outcomes.contains(&Some(MoveOutcome::TriggeredExit)) {
            score += 1;
            log::info!("level exit reached, score {score}");
            view = spawn()?;
        }

        /* draw ------------------------------------------------------------ */
        // Map rows grow downward, which mirrors the caster's columns on
        // screen; flip them so left stays left.
        let last = opts.width as i32 - 1;
        let spans = view.cast().map(|s| ColumnSpan { x: last - s.x, ..s });

        renderer.draw_frame(w, h, spans, &palette, |fb, w, h| {
            win.update_with_buffer(fb, w, h)
        })?;

        // ─────────── accumulate & report every ~3 s ────────────────────
        acc_time += t0.elapsed();
        acc_frames += 1;
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            log::info!("avg frame: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
