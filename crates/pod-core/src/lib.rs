//! pod-core: shared foundation for the snapshot/POD workspace.
//!
//! Contains:
//! - numeric (Real + finiteness and ordering checks)
//! - render (the Renderer seam used by the driver and the reducer)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod render;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use render::{NullRenderer, Renderer, field_plot_name, spectrum_plot_name};
