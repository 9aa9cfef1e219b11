//! Square PNG thumbnails: aspect-preserving fit, centered on a white canvas.

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::{self, FilterType};
use image::{
    DynamicImage, ExtendedColorType, ImageEncoder, ImageError, Rgba, Rgba32FImage, RgbaImage,
};
use std::path::Path;

use crate::config::ThumbnailConfig;
use crate::error::{PipelineError, PipelineResult};

/// Opaque white canvas fill.
const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Generates square thumbnails from decoded images.
pub struct ThumbnailGenerator {
    config: ThumbnailConfig,
}

impl ThumbnailGenerator {
    /// Create a new thumbnail generator with the given configuration.
    pub fn new(config: ThumbnailConfig) -> Self {
        Self { config }
    }

    /// Canvas edge length in pixels.
    pub fn size(&self) -> u32 {
        self.config.size
    }

    /// Size of the resized image inside the canvas.
    ///
    /// Images that already fit are left alone unless upscaling is enabled.
    /// Otherwise the constrained axis becomes the canvas size and the other
    /// axis takes whichever of floor/ceil keeps the aspect ratio closest.
    pub fn fit_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let size = self.config.size;
        if width <= size && height <= size && !self.config.upscale {
            return (width, height);
        }

        let target = f64::from(size);
        let aspect = f64::from(width) / f64::from(height);
        if aspect <= 1.0 {
            let w = round_aspect(target * aspect, |n| (aspect - n / target).abs());
            (w.min(size), size)
        } else {
            let h = round_aspect(target / aspect, |n| {
                if n == 0.0 {
                    0.0
                } else {
                    (aspect - target / n).abs()
                }
            });
            (size, h.min(size))
        }
    }

    /// Render the thumbnail canvas for `image`.
    ///
    /// Resampling runs on premultiplied color so fully transparent pixels
    /// contribute nothing to the opaque pixels next to them.
    pub fn generate(&self, image: &DynamicImage) -> RgbaImage {
        let size = self.config.size;
        let (src_width, src_height) = (image.width(), image.height());
        let (width, height) = self.fit_dimensions(src_width, src_height);
        let x = (size - width) / 2;
        let y = (size - height) / 2;

        let mut canvas = RgbaImage::from_pixel(size, size, BACKGROUND);
        if (width, height) == (src_width, src_height) {
            composite(&mut canvas, &image.to_rgba8(), x, y);
        } else {
            let resized =
                imageops::resize(&premultiplied(image), width, height, FilterType::Lanczos3);
            composite_premultiplied(&mut canvas, &resized, x, y);
        }
        canvas
    }

    /// Encode a canvas as PNG bytes.
    pub fn encode(&self, canvas: &RgbaImage) -> Result<Vec<u8>, ImageError> {
        let compression = if self.config.optimize {
            CompressionType::Best
        } else {
            CompressionType::Default
        };

        let mut buffer = Vec::new();
        PngEncoder::new_with_quality(&mut buffer, compression, PngFilter::Adaptive).write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgba8,
        )?;
        Ok(buffer)
    }

    /// Render, encode and write the thumbnail for `image` to `path`.
    pub fn write(&self, image: &DynamicImage, path: &Path) -> PipelineResult<()> {
        let canvas = self.generate(image);
        let bytes = self
            .encode(&canvas)
            .map_err(|e| PipelineError::write(path, e))?;
        std::fs::write(path, bytes).map_err(|e| PipelineError::write(path, e))
    }
}

/// Pick floor or ceil of `number`, whichever scores lower; ties go to floor.
fn round_aspect(number: f64, key: impl Fn(f64) -> f64) -> u32 {
    let (floor, ceil) = (number.floor(), number.ceil());
    let best = if key(ceil) < key(floor) { ceil } else { floor };
    (best as u32).max(1)
}

/// `image` as `[0, 1]` floats with each color channel scaled by alpha.
fn premultiplied(image: &DynamicImage) -> Rgba32FImage {
    let mut buffer = image.to_rgba32f();
    for pixel in buffer.pixels_mut() {
        let alpha = pixel[3];
        for c in 0..3 {
            pixel[c] *= alpha;
        }
    }
    buffer
}

/// Blend premultiplied `top` over the opaque `canvas` at `(x, y)`.
fn composite_premultiplied(canvas: &mut RgbaImage, top: &Rgba32FImage, x: u32, y: u32) {
    for (dx, dy, src) in top.enumerate_pixels() {
        let dst = canvas.get_pixel_mut(x + dx, y + dy);
        let uncovered = 1.0 - src[3].clamp(0.0, 1.0);
        for c in 0..3 {
            let value = src[c].clamp(0.0, 1.0) * 255.0 + f32::from(dst[c]) * uncovered;
            dst[c] = value.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = 255;
    }
}

/// Paste `top` onto the opaque `canvas` at `(x, y)`, using its alpha as the mask.
fn composite(canvas: &mut RgbaImage, top: &RgbaImage, x: u32, y: u32) {
    for (dx, dy, src) in top.enumerate_pixels() {
        let dst = canvas.get_pixel_mut(x + dx, y + dy);
        let alpha = u32::from(src[3]);
        for c in 0..3 {
            let blended =
                (u32::from(src[c]) * alpha + u32::from(dst[c]) * (255 - alpha) + 127) / 255;
            dst[c] = blended as u8;
        }
        dst[3] = 255;
    }
}
