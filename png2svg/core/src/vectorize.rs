use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::color::{shorten_lossy, to_hex, HIGHLIGHT};
use crate::error::{Result, VectorizeError};
use crate::grid::PixelGrid;
use crate::group::group_by_fill_color;
use crate::grow::Rect;
use crate::minify::minify;
use crate::options::VectorizeOptions;
use crate::svg::{opacity_from_alpha, SvgDocument};

/// One conversion: owns the grid and the document being built from it.
#[derive(Debug)]
pub struct Vectorizer {
    grid: PixelGrid,
    document: SvgDocument,
    options: VectorizeOptions,
    rng: StdRng,
}

impl Vectorizer {
    pub fn new(grid: PixelGrid, options: VectorizeOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            document: SvgDocument::new(grid.width(), grid.height()),
            grid,
            options,
            rng,
        }
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn document(&self) -> &SvgDocument {
        &self.document
    }

    pub fn options(&self) -> &VectorizeOptions {
        &self.options
    }

    /// True once every opaque pixel is represented by an emitted shape.
    pub fn is_done(&self) -> bool {
        self.grid.is_fully_covered(0, 0)
    }

    fn fill(&self, rgb: [u8; 3], expanded: bool) -> String {
        let hex = if expanded && self.options.highlight_expanded {
            HIGHLIGHT.to_owned()
        } else {
            to_hex(rgb)
        };
        if self.options.limit_colors {
            shorten_lossy(&hex).into_owned()
        } else {
            hex
        }
    }

    /// Emits `rect` and marks its pixels as covered.
    ///
    /// # Panics
    /// Panics if any pixel inside `rect` is already covered, since the new
    /// shape would overlap an earlier one.
    pub fn commit(&mut self, rect: Rect, expanded: bool) {
        let overlaps = (rect.y..rect.y + rect.h)
            .any(|y| (rect.x..rect.x + rect.w).any(|x| self.grid.is_covered(x, y)));
        assert!(
            !overlaps,
            "cannot commit {}x{} box at ({}, {}): it overlaps covered pixels",
            rect.w, rect.h, rect.x, rect.y
        );
        let [r, g, b, a] = rect.rgba;
        let fill = self.fill([r, g, b], expanded);
        let opacity = opacity_from_alpha(a);
        if rect.is_single_pixel() {
            self.document.add_pixel(rect.x, rect.y, fill, opacity);
        } else {
            self.document
                .add_rect(rect.x, rect.y, rect.w, rect.h, fill, opacity);
        }
        self.grid.mark_covered(&rect);
    }

    /// Seeds a box at the first uncovered pixel, grows it and commits it,
    /// until the grid is covered. Returns the number of boxes placed.
    pub fn cover_with_boxes(&mut self) -> Result<usize> {
        info!("placing rectangles");
        let height = self.grid.height().max(1) as u64;
        let (mut x, mut y) = (0, 0);
        let mut last_percentage = 0;
        let mut boxes = 0;

        while !self.grid.is_fully_covered(x, y) {
            (x, y) = self.grid.first_uncovered(x, y)?;

            let percentage = y as u64 * 100 / height;
            if percentage != last_percentage {
                debug!("placing rectangles... {percentage}%");
                last_percentage = percentage;
            }

            let mut rect = Rect::seed(&self.grid, x, y);
            let expanded = rect.grow(&self.grid, self.options.strategy, &mut self.rng);
            self.commit(rect, expanded);
            boxes += 1;
        }

        debug!("placed {boxes} rectangles");
        Ok(boxes)
    }

    /// Covers every remaining uncovered pixel with a 1x1 element, in raster
    /// order. Returns how many were added.
    pub fn cover_all_pixels(&mut self) -> usize {
        let mut count = 0;
        for i in 0..self.grid.pixels().len() {
            if self.grid.pixels()[i].covered {
                continue;
            }
            let p = self.grid.cover_pixel(i);
            let fill = self.fill([p.r, p.g, p.b], false);
            self.document.add_pixel(p.x, p.y, fill, opacity_from_alpha(p.a));
            count += 1;
        }
        info!("covered {count} pixels with 1x1 rectangles");
        count
    }

    /// Covers the whole grid the way the options ask for.
    pub fn run(&mut self) -> Result<()> {
        if self.options.uses_single_pixels() {
            self.cover_all_pixels();
        } else {
            self.cover_with_boxes()?;
        }
        Ok(())
    }

    /// Renders the final SVG text.
    ///
    /// Fails with [`VectorizeError::IncompleteCoverage`] while pixels are
    /// still uncovered; covering them and calling this again is fine.
    pub fn finish(&self) -> Result<String> {
        if !self.is_done() {
            return Err(VectorizeError::IncompleteCoverage {
                uncovered: self.grid.uncovered_count(),
            });
        }

        info!("rendering SVG");
        let mut svg = self.document.render();
        if self.options.group_by_color {
            info!("grouping elements by color");
            svg = group_by_fill_color(&svg, self.options.limit_colors);
        }
        if self.options.minify {
            info!("applying additional optimizations");
            svg = minify(&svg);
        }
        Ok(svg)
    }
}
