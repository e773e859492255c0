use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Level;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: comuna → Color32
// ---------------------------------------------------------------------------

/// Maps each comuna to a distinct colour, shared by the scatter charts and
/// the sidebar swatches.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Build a colour map from the dataset's sorted comuna list.
    pub fn new(comunas: &[String]) -> Self {
        let palette = generate_palette(comunas.len());
        let mapping = comunas
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a comuna.
    pub fn color_for(&self, comuna: &str) -> Color32 {
        self.mapping.get(comuna).copied().unwrap_or(Color32::GRAY)
    }
}

// ---------------------------------------------------------------------------
// Fixed standards-level colors
// ---------------------------------------------------------------------------

/// Fixed colour per performance band, independent of data order.
pub fn level_color(level: Level) -> Color32 {
    match level {
        Level::Adecuado => Color32::from_rgb(46, 160, 67),
        Level::Elemental => Color32::from_rgb(255, 193, 7),
        Level::Insuficiente => Color32::from_rgb(220, 53, 69),
    }
}
