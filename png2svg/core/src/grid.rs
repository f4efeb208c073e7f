use image::RgbaImage;
use log::{debug, info};

use crate::grow::Rect;

/// A decoded pixel plus whether an emitted shape already represents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    pub covered: bool,
}

impl Pixel {
    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Row-major pixel buffer with per-pixel coverage flags.
///
/// Fully transparent pixels start out covered, so they never produce a
/// shape. Coverage only ever goes from `false` to `true`.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    pixels: Vec<Pixel>,
    width: u32,
    height: u32,
}

impl PixelGrid {
    /// Builds a grid by sampling `sample(x, y)` in row-major order.
    pub fn from_fn<F>(width: u32, height: u32, mut sample: F) -> Self
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        info!("interpreting {width}x{height} image");
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        let mut last_percentage = 0;
        for y in 0..height {
            let percentage = (y as u64 * 100 / height as u64) as u32;
            if percentage != last_percentage {
                debug!("interpreting image... {percentage}%");
                last_percentage = percentage;
            }
            for x in 0..width {
                let [r, g, b, a] = sample(x, y);
                pixels.push(Pixel {
                    x,
                    y,
                    r,
                    g,
                    b,
                    a,
                    covered: a == 0,
                });
            }
        }
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "({x}, {y}) is outside the {}x{} grid",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    pub fn pixel(&self, x: u32, y: u32) -> &Pixel {
        &self.pixels[self.index(x, y)]
    }

    pub fn color_at(&self, x: u32, y: u32) -> [u8; 3] {
        let p = self.pixel(x, y);
        [p.r, p.g, p.b]
    }

    pub fn color_with_alpha_at(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixel(x, y).rgba()
    }

    pub fn is_covered(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y).covered
    }

    /// True when the pixel is still uncovered and has exactly this RGBA value.
    pub(crate) fn is_open_with(&self, x: u32, y: u32, rgba: [u8; 4]) -> bool {
        let p = self.pixel(x, y);
        !p.covered && p.rgba() == rgba
    }

    /// Marks every pixel inside `rect` as covered. Idempotent.
    ///
    /// # Panics
    /// Panics if `rect` reaches past the right or bottom edge of the grid.
    pub fn mark_covered(&mut self, rect: &Rect) {
        assert!(
            rect.x as u64 + rect.w as u64 <= self.width as u64
                && rect.y as u64 + rect.h as u64 <= self.height as u64,
            "{}x{} box at ({}, {}) does not fit the {}x{} grid",
            rect.w,
            rect.h,
            rect.x,
            rect.y,
            self.width,
            self.height
        );
        for y in rect.y..rect.y + rect.h {
            let start = self.index(rect.x, y);
            let end = start + rect.w as usize;
            for pixel in &mut self.pixels[start..end] {
                pixel.covered = true;
            }
        }
    }

    /// Marks a single pixel as covered and returns it.
    pub(crate) fn cover_pixel(&mut self, index: usize) -> Pixel {
        let pixel = &mut self.pixels[index];
        pixel.covered = true;
        *pixel
    }

    pub fn uncovered_count(&self) -> usize {
        self.pixels.iter().filter(|p| !p.covered).count()
    }
}

impl From<&RgbaImage> for PixelGrid {
    fn from(image: &RgbaImage) -> Self {
        Self::from_fn(image.width(), image.height(), |x, y| image.get_pixel(x, y).0)
    }
}
