//! Raster capability the stroke surface renders into.

use super::color::Color;
use super::render;
use super::stroke::Stroke;
use thiserror::Error;

/// Errors raised by a raster backend.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Low-level drawing primitive behind a stroke surface.
///
/// The surface owns the stroke model; a raster target only knows how to wipe
/// itself, paint one stroke and hand out an encoded image.
pub trait RasterTarget {
    /// Canvas size in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Resets every pixel to the background.
    fn clear(&mut self) -> Result<(), RasterError>;

    /// Paints one stroke on top of the current contents.
    fn draw_stroke(&mut self, stroke: &Stroke) -> Result<(), RasterError>;

    /// Encodes the current contents as PNG.
    fn encode_png(&mut self) -> Result<Vec<u8>, RasterError>;
}

/// [`RasterTarget`] backed by a Cairo ARGB32 image surface.
pub struct CairoRaster {
    surface: cairo::ImageSurface,
    background: Color,
}

impl CairoRaster {
    /// Creates a raster of the given size filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, RasterError> {
        let (w, h) = match (i32::try_from(width), i32::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => return Err(RasterError::InvalidSize { width, height }),
        };
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, w, h)?;
        let mut raster = Self {
            surface,
            background,
        };
        raster.clear()?;
        Ok(raster)
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Reads one pixel as straight (non-premultiplied) `[r, g, b, a]`.
    ///
    /// Returns `None` outside the canvas.
    pub fn pixel(&mut self, x: u32, y: u32) -> Option<[u8; 4]> {
        let (width, height) = self.dimensions();
        if x >= width || y >= height {
            return None;
        }
        let stride = usize::try_from(self.surface.stride()).ok()?;
        let data = self.surface.data().ok()?;
        let offset = y as usize * stride + x as usize * 4;
        // ARGB32 is a native-endian u32 with premultiplied alpha.
        let word = u32::from_ne_bytes(data.get(offset..offset + 4)?.try_into().ok()?);
        let a = (word >> 24) as u8;
        let unpremultiply = |c: u32| -> u8 {
            if a == 0 {
                0
            } else {
                ((c & 0xff) * 255 / u32::from(a)).min(255) as u8
            }
        };
        Some([
            unpremultiply(word >> 16),
            unpremultiply(word >> 8),
            unpremultiply(word),
            a,
        ])
    }

    fn context(&self) -> Result<cairo::Context, RasterError> {
        Ok(cairo::Context::new(&self.surface)?)
    }
}

impl RasterTarget for CairoRaster {
    fn dimensions(&self) -> (u32, u32) {
        (self.surface.width() as u32, self.surface.height() as u32)
    }

    fn clear(&mut self) -> Result<(), RasterError> {
        let ctx = self.context()?;
        render::fill_background(&ctx, self.background)?;
        Ok(())
    }

    fn draw_stroke(&mut self, stroke: &Stroke) -> Result<(), RasterError> {
        let ctx = self.context()?;
        render::render_stroke(&ctx, stroke)?;
        Ok(())
    }

    fn encode_png(&mut self) -> Result<Vec<u8>, RasterError> {
        self.surface.flush();
        let mut buffer = Vec::new();
        self.surface
            .write_to_png(&mut buffer)
            .map_err(|e| RasterError::Encode(e.to_string()))?;
        Ok(buffer)
    }
}
