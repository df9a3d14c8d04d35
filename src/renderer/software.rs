//! ---------------------------------------------------------------------------
//! Software (CPU) column renderer
//!
//! * Fills an internal `Vec<u32>` frame-buffer in **0x00RRGGBB** format.
//! * Top half is cleared to the ceiling colour, bottom half to the floor.
//! * `Side::Y` hits are drawn at half brightness so corners read clearly.
//! ---------------------------------------------------------------------------

use crate::{
    renderer::{ColumnRenderer, Palette, Rgba},
    view::{ColumnSpan, Side},
    world::NO_TEXTURE,
};

const CEILING: Rgba = 0x00_202020;
const FLOOR: Rgba = 0x00_505050;

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl ColumnRenderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }

        let split = (h / 2) * w;
        self.scratch[..split].fill(CEILING);
        self.scratch[split..].fill(FLOOR);
    }

    fn draw_column(&mut self, span: &ColumnSpan, palette: &Palette) {
        // rays that left the map leave ceiling/floor showing
        if span.texture == NO_TEXTURE || self.width == 0 || self.height == 0 {
            return;
        }
        let Some(col) = usize::try_from(span.x).ok().filter(|&c| c < self.width) else {
            return;
        };
        let max_y = self.height as i32 - 1;
        let y0 = span.y_start.clamp(0, max_y);
        let y1 = span.y_end.clamp(0, max_y);

        let colour = match span.side {
            Side::X => palette[span.texture],
            Side::Y => shade(palette[span.texture]),
        };

        for y in y0..=y1 {
            self.scratch[y as usize * self.width + col] = colour;
        }
    }

    fn end_frame<F, R>(&mut self, submit: F) -> R
    where
        F: FnOnce(&[Rgba], usize, usize) -> R,
    {
        submit(&self.scratch, self.width, self.height)
    }
}

/// Halve each channel.
#[inline]
fn shade(c: Rgba) -> Rgba {
    (c >> 1) & 0x00_7F7F7F
}

/*──────────────────────────────── Tests ───────────────────────────────*/
