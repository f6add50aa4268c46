//! Adapters between raster images and unit-interval planes.
//!
//! - `to_array`: any image → luminance plane with values `intensity / 255`.
//! - `to_image`: one plane → gray, three planes → RGB, optional alpha appended.
//! - `split_channels`: first three channels of an image → three planes.
//!
//! Quantization on the way out is `round(v * 255)` clamped to `0..=255`.
use super::{ImageF64, ImageU8, ImageView};
use crate::error::{NormalMapError, Result};
use image::{DynamicImage, GrayAlphaImage, GrayImage, LumaA, Rgb, RgbImage, Rgba, RgbaImage};

/// Convert an image to a plane of shape (height, width) in [0, 1].
///
/// Color sources are reduced to luminance first.
pub fn to_array(image: &DynamicImage) -> ImageF64 {
    let gray = image.to_luma8();
    let (w, h) = gray.dimensions();
    let view = ImageU8 {
        w: w as usize,
        h: h as usize,
        stride: w as usize,
        data: gray.as_raw(),
    };
    view.to_unit_f64()
}

/// Build a grayscale (one plane) or RGB (three planes) image.
///
/// With `alpha`, three planes become a 4-channel RGBA image. A single plane
/// with alpha stays grayscale and becomes a 2-channel gray+alpha image
/// rather than being widened to RGBA. All planes, including alpha, must
/// share one shape, and each side must fit in `u32`.
pub fn to_image(planes: &[ImageF64], alpha: Option<&ImageF64>) -> Result<DynamicImage> {
    let first = match planes {
        [single] => single,
        [r, _, _] => r,
        _ => {
            return Err(NormalMapError::InvalidShape {
                channels: planes.len(),
            })
        }
    };
    for plane in planes.iter().chain(alpha) {
        if !plane.same_shape(first) {
            return Err(NormalMapError::ShapeMismatch {
                expected: first.shape(),
                found: plane.shape(),
            });
        }
    }

    let too_large = || NormalMapError::TooLarge {
        shape: first.shape(),
    };
    let w = u32::try_from(first.w).map_err(|_| too_large())?;
    let h = u32::try_from(first.h).map_err(|_| too_large())?;
    let image = match (planes, alpha) {
        ([gray], None) => DynamicImage::ImageLuma8(GrayImage::from_fn(w, h, |x, y| {
            image::Luma([quantize(gray.get(x as usize, y as usize))])
        })),
        ([gray], Some(a)) => DynamicImage::ImageLumaA8(GrayAlphaImage::from_fn(w, h, |x, y| {
            let (x, y) = (x as usize, y as usize);
            LumaA([quantize(gray.get(x, y)), quantize(a.get(x, y))])
        })),
        ([r, g, b], None) => DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
            let (x, y) = (x as usize, y as usize);
            Rgb([
                quantize(r.get(x, y)),
                quantize(g.get(x, y)),
                quantize(b.get(x, y)),
            ])
        })),
        ([r, g, b], Some(a)) => DynamicImage::ImageRgba8(RgbaImage::from_fn(w, h, |x, y| {
            let (x, y) = (x as usize, y as usize);
            Rgba([
                quantize(r.get(x, y)),
                quantize(g.get(x, y)),
                quantize(b.get(x, y)),
                quantize(a.get(x, y)),
            ])
        })),
        _ => unreachable!("plane count checked above"),
    };
    Ok(image)
}

/// Split the first three channels into unit-interval planes, dropping alpha.
///
/// Grayscale sources are expanded so that all three planes are equal.
pub fn split_channels(image: &DynamicImage) -> [ImageF64; 3] {
    let rgb = image.to_rgb8();
    let (w, h) = (rgb.width() as usize, rgb.height() as usize);
    let mut planes = [
        ImageF64::new(w, h),
        ImageF64::new(w, h),
        ImageF64::new(w, h),
    ];
    for (x, y, px) in rgb.enumerate_pixels() {
        for (plane, &value) in planes.iter_mut().zip(px.0.iter()) {
            plane.set(x as usize, y as usize, f64::from(value) / 255.0);
        }
    }
    planes
}

#[inline]
fn quantize(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
