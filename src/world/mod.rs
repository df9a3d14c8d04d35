mod grid;

pub use grid::{Cell, EXIT_TRIGGER, Grid, GridError, NO_TEXTURE, TextureId};
