use image::{imageops, DynamicImage, RgbaImage};
use thiserror::Error;

use super::frame::Frame;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("frame has zero width or height ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },

    #[error("frame buffer size mismatch: expected {expected} bytes, got {actual}")]
    EncodingMismatch { expected: usize, actual: usize },

    #[error("unsupported rotation: {0} degrees")]
    UnsupportedRotation(i32),
}

/// Convert a camera frame into the flat `[0, 1]`-normalized RGB tensor the
/// model consumes: `target_height * target_width * 3` f32 values, row-major,
/// channel-interleaved.
///
/// The orientation correction runs before the resize: rotate by the frame's
/// reported degrees, then mirror horizontally when the frame came from the
/// front sensor, matching the sensor's natural readout order. The resize is
/// a direct stretch (aspect ratio is not preserved) with a triangle filter.
pub fn preprocess(
    frame: &Frame,
    target_width: u32,
    target_height: u32,
) -> Result<Vec<f32>, PreprocessError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(PreprocessError::EmptyFrame {
            width: frame.width,
            height: frame.height,
        });
    }

    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(PreprocessError::EncodingMismatch {
            expected,
            actual: frame.data.len(),
        });
    }

    let rgba = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
        .ok_or(PreprocessError::EncodingMismatch {
            expected,
            actual: frame.data.len(),
        })?;

    let mut image = match frame.rotation_degrees.rem_euclid(360) {
        0 => DynamicImage::ImageRgba8(rgba),
        90 => DynamicImage::ImageRgba8(imageops::rotate90(&rgba)),
        180 => DynamicImage::ImageRgba8(imageops::rotate180(&rgba)),
        270 => DynamicImage::ImageRgba8(imageops::rotate270(&rgba)),
        _ => return Err(PreprocessError::UnsupportedRotation(frame.rotation_degrees)),
    };

    if frame.from_front_camera {
        image = DynamicImage::ImageRgba8(imageops::flip_horizontal(&image));
    }

    let resized = image.resize_exact(target_width, target_height, imageops::FilterType::Triangle);
    let rgb = resized.to_rgb8();

    let mut tensor = Vec::with_capacity(target_width as usize * target_height as usize * 3);
    for pixel in rgb.pixels() {
        tensor.push(pixel[0] as f32 / 255.0);
        tensor.push(pixel[1] as f32 / 255.0);
        tensor.push(pixel[2] as f32 / 255.0);
    }

    Ok(tensor)
}
