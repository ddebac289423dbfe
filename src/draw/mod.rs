//! Stroke model and rendering primitives (Cairo-based).
//!
//! This module defines the drawing types behind the signature pad:
//! - [`Color`]: RGBA color representation with hex parsing
//! - [`Stroke`] / [`Point`]: one press→release gesture and its samples
//! - [`RasterTarget`]: the raster capability strokes are painted into
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod raster;
pub mod render;
pub mod stroke;

pub use color::Color;
pub use raster::{CairoRaster, RasterError, RasterTarget};
pub use render::render_stroke;
pub use stroke::{Point, Stroke};
