// src/plot/palette.rs
use plotters::style::{Color, HSLColor, RGBColor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Producer of `n` visually distinct colours, one per class curve.
pub trait Palette: fmt::Debug {
    fn colors(&self, n: usize) -> Vec<RGBColor>;

    /// Colour of a summary curve drawn on top of the class curves.
    ///
    /// The default is an unsaturated dark grey, which no [`HuePalette`]
    /// colour can take.
    fn accent(&self) -> RGBColor {
        RGBColor(80, 80, 80)
    }
}

/// Evenly spaced hues at fixed saturation and lightness. Deterministic.
#[derive(Debug, Clone)]
pub struct HuePalette {
    pub saturation: f64,
    pub lightness: f64,
    /// Hue of the first colour, as a fraction of the colour wheel.
    pub offset: f64,
}

impl Default for HuePalette {
    fn default() -> Self {
        HuePalette {
            saturation: 0.7,
            lightness: 0.45,
            offset: 0.0,
        }
    }
}

impl Palette for HuePalette {
    fn colors(&self, n: usize) -> Vec<RGBColor> {
        (0..n)
            .map(|i| {
                let hue = (self.offset + i as f64 / n as f64).fract();
                let (r, g, b) = HSLColor(hue, self.saturation, self.lightness).rgb();
                RGBColor(r, g, b)
            })
            .collect()
    }
}

/// Random `#RRGGBB` colours drawn from a seeded generator.
///
/// The same seed always yields the same colours.
#[derive(Debug, Clone)]
pub struct RandomHexPalette {
    pub seed: u64,
}

impl RandomHexPalette {
    pub fn new(seed: u64) -> Self {
        RandomHexPalette { seed }
    }
}

impl Palette for RandomHexPalette {
    fn colors(&self, n: usize) -> Vec<RGBColor> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..n).map(|_| RGBColor(rng.gen(), rng.gen(), rng.gen())).collect()
    }
}

/// A fixed list of colours, cycled when more are requested than it holds.
#[derive(Debug, Clone)]
pub struct FixedPalette(pub Vec<RGBColor>);

impl Palette for FixedPalette {
    fn colors(&self, n: usize) -> Vec<RGBColor> {
        if self.0.is_empty() {
            return HuePalette::default().colors(n);
        }
        self.0.iter().copied().cycle().take(n).collect()
    }
}

/// `#RRGGBB` form of a colour, as written to the debug log by the aggregators.
pub fn to_hex(color: &RGBColor) -> String {
    format!("#{:02X}{:02X}{:02X}", color.0, color.1, color.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hue_palette_is_distinct_and_stable() {
        let palette = HuePalette::default();
        let a = palette.colors(6);
        assert_eq!(a.len(), 6);
        assert_eq!(a, palette.colors(6));
        let mut hex: Vec<String> = a.iter().map(to_hex).collect();
        hex.sort();
        hex.dedup();
        assert_eq!(hex.len(), 6);
    }

    #[test]
    fn test_accent_differs_from_every_hue() {
        let palette = HuePalette::default();
        for n in 1..=12 {
            assert!(!palette.colors(n).contains(&palette.accent()), "n = {}", n);
        }
    }

    #[test]
    fn test_random_palette_depends_on_seed() {
        assert_eq!(RandomHexPalette::new(1).colors(4), RandomHexPalette::new(1).colors(4));
        assert_ne!(RandomHexPalette::new(1).colors(4), RandomHexPalette::new(2).colors(4));
    }

    #[test]
    fn test_fixed_palette_cycles() {
        let palette = FixedPalette(vec![RGBColor(255, 0, 0), RGBColor(0, 0, 255)]);
        let colors = palette.colors(3);
        assert_eq!(colors[2], RGBColor(255, 0, 0));
        assert_eq!(FixedPalette(Vec::new()).colors(2).len(), 2);
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(to_hex(&RGBColor(255, 10, 0)), "#FF0A00");
    }
}
