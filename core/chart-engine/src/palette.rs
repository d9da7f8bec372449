//! FILENAME: core/chart-engine/src/palette.rs
//! PURPOSE: Fixed color palettes for series and slices.
//! CONTEXT: Colors are picked by position, cycling through the palette, so
//! the same input order always yields the same colors. No global state.

use serde::{Deserialize, Serialize};

/// Muted color for synthetic "Others" entries.
pub const OTHERS_COLOR: &str = "#B0B7C3";

const DEFAULT_COLORS: [&str; 9] = [
    "#5470C6", // Blue
    "#91CC75", // Green
    "#FAC858", // Yellow
    "#EE6666", // Red
    "#73C0DE", // Sky
    "#3BA272", // Teal
    "#FC8452", // Orange
    "#9A60B4", // Violet
    "#EA7CCC", // Pink
];

const WARM_COLORS: [&str; 8] = [
    "#D94E3F", "#F08A4B", "#F5B841", "#E56B6F", "#B5523B", "#F2A65A", "#C8553D", "#EEC170",
];

const COOL_COLORS: [&str; 7] = [
    "#2E86AB", "#4FB0C6", "#5C6BC0", "#26A69A", "#7E57C2", "#42A5F5", "#00838F",
];

/// Named palette selectable per widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    Default,
    Warm,
    Cool,
}

impl Default for Palette {
    fn default() -> Self {
        Palette::Default
    }
}

impl Palette {
    pub fn colors(self) -> &'static [&'static str] {
        match self {
            Palette::Default => &DEFAULT_COLORS,
            Palette::Warm => &WARM_COLORS,
            Palette::Cool => &COOL_COLORS,
        }
    }
}

/// Color for the `index`-th series or slice, cycling through the palette.
pub fn palette_color(index: usize, palette: Palette) -> &'static str {
    let colors = palette.colors();
    colors[index % colors.len()]
}
