//! Rendering abstraction layer.
//!
//! *The caster never touches a pixel buffer.* It yields
//! [`ColumnSpan`]s and a host hands them to a type implementing
//! [`ColumnRenderer`], together with the [`Palette`] that turns texture ids
//! into colours.
//!
//! * Back-ends can be swapped without touching `view`.
//! * The blanket [`RendererExt`] adds `draw_frame` so call-sites stay short.

use std::ops::Index;

use crate::view::ColumnSpan;
use crate::world::TextureId;

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Yellow, used by both hosts for the level-exit cell.
pub const EXIT_COLOUR: Rgba = 0x00_FFFF00;

/// Host-owned texture-id → colour table.
///
/// Ids past the end wrap around; an empty palette draws black.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette(pub Vec<Rgba>);

impl Default for Palette {
    /// red, blue, green, purple for ids 0..=3
    fn default() -> Self {
        Palette(vec![0x00_FF0000, 0x00_0000FF, 0x00_00FF00, 0x00_800080])
    }
}

impl Palette {
    /// Pin `id` to `colour`. Ids added on the way keep the colour they
    /// wrapped to before.
    pub fn with_colour(mut self, id: TextureId, colour: Rgba) -> Self {
        let id = id as usize;
        while self.0.len() <= id {
            let wrapped = self[self.0.len() as TextureId];
            self.0.push(wrapped);
        }
        self.0[id] = colour;
        self
    }
}

impl Index<TextureId> for Palette {
    type Output = Rgba;
    fn index(&self, id: TextureId) -> &Rgba {
        let n = self.0.len().max(1);
        self.0.get(id as usize % n).unwrap_or(&0)
    }
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait ColumnRenderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Fill one wall slice.
    fn draw_column(&mut self, span: &ColumnSpan, palette: &Palette);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` runs exactly once per frame.
    /// * With minifb: `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F, R>(&mut self, submit: F) -> R
    where
        F: FnOnce(&[Rgba], usize, usize) -> R;
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: ColumnRenderer {
    fn draw_frame<I, F, R>(
        &mut self,
        width: usize,
        height: usize,
        spans: I,
        palette: &Palette,
        submit: F,
    ) -> R
    where
        I: IntoIterator<Item = ColumnSpan>,
        F: FnOnce(&[Rgba], usize, usize) -> R,
    {
        self.begin_frame(width, height);
        for span in spans {
            self.draw_column(&span, palette);
        }
        self.end_frame(submit)
    }
}
impl<T: ColumnRenderer + ?Sized> RendererExt for T {}

pub mod software;

pub use software::Software;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps_ids() {
        let pal = Palette::default();
        assert_eq!(pal[0], 0x00_FF0000);
        assert_eq!(pal[3], 0x00_800080);
        assert_eq!(pal[5], pal[1]);
        assert_eq!(Palette(Vec::new())[2], 0);
    }

    #[test]
    fn exit_gets_its_own_colour() {
        use crate::world::EXIT_TRIGGER;

        let pal = Palette::default().with_colour(EXIT_TRIGGER, EXIT_COLOUR);
        assert_eq!(pal[EXIT_TRIGGER], EXIT_COLOUR);
        assert_ne!(pal[EXIT_TRIGGER], pal[1]);
        // id 4 still wraps to red as before
        assert_eq!(pal[4], 0x00_FF0000);
        assert_eq!(pal.0.len(), 6);

        let pal = Palette(Vec::new()).with_colour(2, EXIT_COLOUR);
        assert_eq!(pal.0, vec![0, 0, EXIT_COLOUR]);
    }
}
