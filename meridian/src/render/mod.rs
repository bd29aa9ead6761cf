//! Rasterization seam: the [`Renderer`] that turns a map state into a [`Bitmap`], and the
//! [`Canvas`] the host paints it on.

use maybe_sync::{MaybeSend, MaybeSync};
use meridian_types::Rect;

use crate::color::Color;
use crate::error::MeridianError;
use crate::map::{Layer, Style};
use crate::viewport::Viewport;

pub mod worker;

pub use worker::{RenderRequest, RenderWorker, RenderedFrame};

const BYTES_PER_PIXEL: usize = 4;

/// Raster image in RGBA order, 8 bits per channel, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bitmap {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl Bitmap {
    /// Creates a fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    /// Creates a bitmap with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let pixel = color.to_bytes();
        let bytes = pixel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * BYTES_PER_PIXEL)
            .collect();

        Self {
            bytes,
            width,
            height,
        }
    }

    /// Wraps raw RGBA bytes. Fails if the buffer length does not match the dimensions.
    pub fn from_rgba(bytes: Vec<u8>, width: u32, height: u32) -> Result<Self, MeridianError> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if bytes.len() != expected {
            return Err(MeridianError::Render(format!(
                "bitmap of {width}x{height} needs {expected} bytes, got {}",
                bytes.len()
            )));
        }

        Ok(Self {
            bytes,
            width,
            height,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Color of the pixel at `(x, y)`, or `None` if it is outside of the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = self.bytes.get(offset..offset + BYTES_PER_PIXEL)?;
        Some(Color::from_bytes(px.try_into().ok()?))
    }

    /// Converts the bitmap into an [`image::RgbaImage`].
    #[cfg(feature = "image")]
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.bytes.clone())
    }
}

/// Everything a renderer needs to draw one frame. Captured by the render worker when a render
/// starts, so it never changes while the renderer runs.
#[derive(Debug, Clone)]
pub struct MapState {
    viewport: Viewport,
    layers: Vec<Layer>,
    style: Style,
}

impl MapState {
    /// Creates a new state.
    pub fn new(viewport: Viewport, layers: Vec<Layer>, style: Style) -> Self {
        Self {
            viewport,
            layers,
            style,
        }
    }

    /// Viewport to render.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Layers in drawing order, bottom first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Map style.
    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// Rasterizes map states.
///
/// A renderer is called from the render worker thread, one render at a time. It must return a
/// bitmap of exactly `width` x `height` pixels; bitmaps of other sizes are discarded.
pub trait Renderer: MaybeSend + MaybeSync {
    /// Renders `state` into a new bitmap.
    fn render(&self, state: &MapState, width: u32, height: u32) -> Result<Bitmap, MeridianError>;
}

/// Drawing surface of the host UI.
pub trait Canvas {
    /// Draws the `src` part of the bitmap into the `dst` rectangle of the canvas, stretching
    /// it as needed.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, src: Rect, dst: Rect);
}
