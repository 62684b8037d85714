//! Decoding target photographs via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Color images are
//! converted to 8-bit luma; no resizing happens here.

use crate::image::{ImageView, OwnedImage};
use crate::util::{ZeroSightError, ZeroSightResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> ZeroSightResult<ImageView<'_, u8>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Creates an owned image from a grayscale image buffer.
pub fn owned_from_gray_image(img: &image::GrayImage) -> ZeroSightResult<OwnedImage> {
    OwnedImage::new(
        img.as_raw().clone(),
        img.width() as usize,
        img.height() as usize,
    )
}

/// Converts any decoded image to an owned grayscale image.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> ZeroSightResult<OwnedImage> {
    let gray = img.to_luma8();
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    OwnedImage::new(gray.into_raw(), width, height)
}

/// Loads a photograph from disk as grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> ZeroSightResult<OwnedImage> {
    let img = image::open(path).map_err(|err| ZeroSightError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Decodes an in-memory encoded image (PNG or JPEG) as grayscale.
pub fn decode_gray_image(bytes: &[u8]) -> ZeroSightResult<OwnedImage> {
    let img = image::load_from_memory(bytes).map_err(|err| ZeroSightError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
