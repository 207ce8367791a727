//! Image preprocessing ahead of OCR: grayscale plus a linear contrast stretch.
//!
//! Each pixel's RGB channels are averaged, pushed away from mid-gray by
//! [`contrast_factor`], clamped to `[0, 255]` and written back to all three
//! channels. Alpha is left untouched. The output is always PNG with the same
//! dimensions as the input.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

/// Default contrast on the 0-100 scale.
pub const DEFAULT_CONTRAST: f64 = 40.0;

/// Upper bound of the contrast scale.
pub const MAX_CONTRAST: f64 = 100.0;

/// Errors from [`preprocess_image`].
#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    /// The input bytes are not a decodable image.
    #[error("Failed to decode image: {0}")]
    Decode(image::ImageError),

    /// The processed image could not be re-encoded.
    #[error("Failed to encode image: {0}")]
    Encode(image::ImageError),
}

/// Multiplier applied around mid-gray for a given contrast setting.
///
/// `259 * (c + 255) / (255 * (259 - c))`. A contrast of 0 yields ~1.0.
pub fn contrast_factor(contrast: f64) -> f64 {
    (259.0 * (contrast + 255.0)) / (255.0 * (259.0 - contrast))
}

/// Grayscale and contrast-stretch a single RGBA pixel.
pub fn enhance_pixel(pixel: Rgba<u8>, factor: f64) -> Rgba<u8> {
    let [r, g, b, a] = pixel.0;
    let avg = (f64::from(r) + f64::from(g) + f64::from(b)) / 3.0;
    let value = (factor * (avg - 128.0) + 128.0).round().clamp(0.0, 255.0) as u8;
    Rgba([value, value, value, a])
}

/// Grayscale and contrast-stretch a decoded image.
pub fn enhance(image: &DynamicImage, contrast: f64) -> RgbaImage {
    let factor = contrast_factor(contrast);
    let mut rgba = image.to_rgba8();
    for pixel in rgba.pixels_mut() {
        *pixel = enhance_pixel(*pixel, factor);
    }
    rgba
}

/// Decode `bytes`, enhance them and re-encode as PNG.
pub fn preprocess_image(bytes: &[u8], contrast: f64) -> Result<Vec<u8>, PreprocessError> {
    let decoded = image::load_from_memory(bytes).map_err(PreprocessError::Decode)?;
    let enhanced = DynamicImage::ImageRgba8(enhance(&decoded, contrast));

    let mut out = Vec::new();
    enhanced
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(PreprocessError::Encode)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn encode_png(image: RgbaImage) -> Vec<u8> {
        let mut out = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn default_factor_matches_formula() {
        let factor = contrast_factor(DEFAULT_CONTRAST);
        assert!((factor - 1.3682).abs() < 1e-3, "got {factor}");
    }

    #[test]
    fn zero_contrast_is_near_identity() {
        assert!((contrast_factor(0.0) - 1.0).abs() < 0.01);
        let out = enhance_pixel(Rgba([90, 90, 90, 255]), contrast_factor(0.0));
        assert_eq!(out, Rgba([90, 90, 90, 255]));
    }

    #[test]
    fn pixel_is_gray_and_alpha_preserved() {
        let out = enhance_pixel(Rgba([200, 100, 30, 77]), contrast_factor(DEFAULT_CONTRAST));
        let [r, g, b, a] = out.0;
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 77);
        // avg = 110, 1.3682 * (110 - 128) + 128 = 103.37
        assert_eq!(r, 103);
    }

    #[test]
    fn channels_clamped_for_any_factor() {
        let extremes = [
            Rgba([0, 0, 0, 255]),
            Rgba([255, 255, 255, 255]),
            Rgba([255, 0, 0, 0]),
            Rgba([10, 250, 128, 128]),
        ];
        for contrast in [0.0, 25.0, 40.0, 75.0, 100.0, 250.0] {
            let factor = contrast_factor(contrast);
            for pixel in extremes {
                let out = enhance_pixel(pixel, factor);
                assert_eq!(out[0], out[1]);
                assert_eq!(out[1], out[2]);
                assert_eq!(out[3], pixel[3]);
            }
        }
        let factor = contrast_factor(100.0);
        assert_eq!(enhance_pixel(Rgba([0, 0, 0, 255]), factor)[0], 0);
        assert_eq!(enhance_pixel(Rgba([255, 255, 255, 255]), factor)[0], 255);
    }

    #[test]
    fn preprocess_round_trips_dimensions() {
        let source = RgbaImage::from_fn(7, 3, |x, y| Rgba([(x * 30) as u8, (y * 80) as u8, 50, 200]));
        let png = preprocess_image(&encode_png(source), DEFAULT_CONTRAST).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (7, 3));
        for pixel in decoded.pixels() {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
            assert_eq!(pixel[3], 200);
        }
    }

    #[test]
    fn undecodable_input_fails() {
        assert_matches!(
            preprocess_image(b"definitely not an image", DEFAULT_CONTRAST),
            Err(PreprocessError::Decode(_))
        );
    }
}
