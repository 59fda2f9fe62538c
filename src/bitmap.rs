use std::path::Path;

use image::{DynamicImage, GrayImage, ImageReader, RgbaImage};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};

use crate::config::{ThresholdMethod, TracingConfig};
use crate::error::TraceError;
use crate::pixel::PixelGrid;

/// Decode an image file into a [`PixelGrid`].
pub fn load_grid(path: &Path, config: &TracingConfig) -> Result<PixelGrid, TraceError> {
    let img = ImageReader::open(path)
        .map_err(|e| TraceError::ImageLoad(e.to_string()))?
        .decode()
        .map_err(|e| TraceError::ImageLoad(e.to_string()))?;

    Ok(grid_from_image(img, config))
}

/// Build a grid from an already decoded image.
///
/// With a threshold method (or `invert`, which implies Otsu) the image is
/// binarized first: ink becomes black on a white background. Otherwise the
/// decoded colors are compared against `config.background` as they are.
pub fn grid_from_image(img: DynamicImage, config: &TracingConfig) -> PixelGrid {
    let method = config
        .threshold
        .or(config.invert.then_some(ThresholdMethod::Otsu));

    match method {
        Some(method) => {
            let binary = binarize(&img.into_luma8(), method, config.invert);
            PixelGrid::from_image(binary)
        }
        None => PixelGrid::from_image(img.into_rgba8()).with_background(config.background),
    }
}

/// Threshold a grayscale image into black ink (0) on white (255).
///
/// Pixels at or below the threshold are ink. `invert` swaps the two.
pub fn binarize(gray: &GrayImage, method: ThresholdMethod, invert: bool) -> RgbaImage {
    let level = match method {
        ThresholdMethod::Fixed(t) => t,
        ThresholdMethod::Otsu => {
            let t = otsu_level(gray);
            log::info!("bitmap: Otsu threshold = {}", t);
            t
        }
    };

    let mut binary = threshold(gray, level, ThresholdType::Binary);

    if invert {
        for pixel in binary.pixels_mut() {
            pixel.0[0] = 255 - pixel.0[0];
        }
    }

    DynamicImage::ImageLuma8(binary).into_rgba8()
}
