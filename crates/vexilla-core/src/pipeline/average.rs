//! Per-image average color, normalized to `[0, 1]`.

use image::DynamicImage;

use crate::types::ColorRecord;

/// Decimal places kept in every stored channel value.
pub const CHANNEL_DECIMALS: usize = 6;

/// Computes the mean RGB color of decoded images.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorAverager;

impl ColorAverager {
    /// Create a new averager.
    pub fn new() -> Self {
        Self
    }

    /// Mean `[r, g, b]` of `image`, each in `[0, 1]` and rounded to
    /// [`CHANNEL_DECIMALS`] places.
    ///
    /// Alpha is dropped, not blended: a fully transparent red pixel counts as red.
    pub fn average(&self, image: &DynamicImage) -> [f64; 3] {
        let rgb = image.to_rgb8();

        // u64 sums: 1024x1024 of 255 is ~2.7e8, far beyond i32 comfort.
        let mut sums = [0u64; 3];
        for pixel in rgb.pixels() {
            for (sum, channel) in sums.iter_mut().zip(pixel.0) {
                *sum += u64::from(channel);
            }
        }

        let count = u64::from(rgb.width()) * u64::from(rgb.height());
        sums.map(|sum| {
            let mean = sum as f64 / count as f64;
            round_to_decimals(mean / 255.0, CHANNEL_DECIMALS)
        })
    }

    /// Build the record for the file `name`.
    pub fn record(&self, name: &str, image: &DynamicImage) -> ColorRecord {
        let [r, g, b] = self.average(image);
        ColorRecord {
            file: name.to_string(),
            r,
            g,
            b,
        }
    }
}

/// Round `value` to `decimals` places.
///
/// Rounding goes through the exact decimal expansion of the binary value, so
/// e.g. `2.675` (stored as `2.67499999...`) rounds down to `2.67`.
pub fn round_to_decimals(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}
