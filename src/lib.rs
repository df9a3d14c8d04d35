//! Grid ray caster.
//!
//! * [`world`] – rectangular occupancy map of texture codes.
//! * [`view`] – viewer pose, axis-blocked movement and the DDA column caster.
//! * [`renderer`] – optional CPU back-end turning column spans into pixels.

pub mod renderer;
pub mod view;
pub mod world;
