//! Plot appearance.

use plotters::prelude::*;

/// Configuration shared by the field and spectrum plots.
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: 800)
    pub width: u32,
    /// Image height in pixels (default: 600)
    pub height: u32,
    pub line_color: RGBColor,
    pub point_color: RGBColor,
    pub background: RGBColor,
    pub line_width: u32,
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            line_color: BLUE,
            point_color: RED,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}
