//! Avatar raster and sprite blending

use crate::networking::HabiticaResult;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use super::plan::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Decode sprite bytes (PNG, or the first frame of a GIF) into RGBA
pub fn decode_sprite(data: &[u8]) -> image::ImageResult<RgbaImage> {
    Ok(image::load_from_memory(data)?.to_rgba8())
}

/// Transparent RGBA surface the avatar layers are pasted onto
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Fully transparent 141×147 avatar canvas
    pub fn new() -> Self {
        Self::with_size(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Paste `sprite` with its top-left corner at (`x`, `y`), using the
    /// sprite's own alpha channel as the mask.
    ///
    /// Every channel, alpha included, becomes `dst * (1 - a) + src * a` with
    /// `a = src_alpha / 255`. Parts falling outside the canvas are clipped.
    pub fn paste(&mut self, sprite: &RgbaImage, x: i64, y: i64) {
        let (width, height) = (self.image.width() as i64, self.image.height() as i64);

        for (sx, sy, src) in sprite.enumerate_pixels() {
            let dx = x + sx as i64;
            let dy = y + sy as i64;
            if dx < 0 || dy < 0 || dx >= width || dy >= height {
                continue;
            }

            let alpha = src.0[3] as u32;
            if alpha == 0 {
                continue;
            }

            let dst = self.image.get_pixel_mut(dx as u32, dy as u32);
            if alpha == 255 {
                *dst = *src;
                continue;
            }

            for channel in 0..4 {
                let blended = src.0[channel] as u32 * alpha + dst.0[channel] as u32 * (255 - alpha);
                dst.0[channel] = ((blended + 127) / 255) as u8;
            }
        }
    }

    /// Encode and write to `path`, picking the format from its extension
    pub fn save(&self, path: impl AsRef<Path>) -> HabiticaResult<()> {
        self.image.save(path)?;
        Ok(())
    }

    /// Encode into any seekable writer with an explicit format
    pub fn write_to<W: Write + Seek>(&self, writer: &mut W, format: ImageFormat) -> HabiticaResult<()> {
        self.image.write_to(writer, format)?;
        Ok(())
    }

    pub fn encode_png(&self) -> HabiticaResult<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}
