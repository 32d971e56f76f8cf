//! Chart figures for the curve evaluations and the colour palettes used to
//! tell class curves apart.

pub mod chart;
pub mod palette;

pub use chart::{Chart, Series};
pub use palette::{to_hex, FixedPalette, HuePalette, Palette, RandomHexPalette};
