//! Converts raster images into SVG documents made of solid-color rectangles.
//!
//! Every opaque pixel ends up in exactly one `<rect>` of its own color;
//! fully transparent pixels produce nothing. Rectangles are grown greedily
//! from the first uncovered pixel in raster order, then the rendered
//! document is grouped by fill color and minified.

pub mod color;
pub mod error;
pub mod grid;
pub mod group;
pub mod grow;
pub mod minify;
pub mod options;
mod scan;
pub mod svg;
pub mod vectorize;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::error::{Result, VectorizeError};
pub use crate::grid::{Pixel, PixelGrid};
pub use crate::grow::{Direction, GrowthStrategy, Rect};
pub use crate::options::VectorizeOptions;
pub use crate::vectorize::Vectorizer;

use image::RgbaImage;

/// Converts an already decoded image.
pub fn image_to_svg(image: &RgbaImage, options: &VectorizeOptions) -> Result<String> {
    let mut vectorizer = Vectorizer::new(PixelGrid::from(image), options.clone());
    vectorizer.run()?;
    vectorizer.finish()
}

/// Decodes `png_bytes` (any format `image` recognizes) and converts it.
pub fn png_to_svg(png_bytes: &[u8], options: &VectorizeOptions) -> Result<String> {
    let image = image::load_from_memory(png_bytes)?;
    image_to_svg(&image.to_rgba8(), options)
}
