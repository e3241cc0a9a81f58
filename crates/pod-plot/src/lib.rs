//! SVG plots of fields and singular spectra.
//!
//! Uses `plotters` with the SVG backend only, so no system font or image
//! libraries are needed. File names come from `pod_core::field_plot_name`
//! and `pod_core::spectrum_plot_name`.

pub mod config;
pub mod svg;

pub use config::PlotConfig;
pub use svg::SvgRenderer;
