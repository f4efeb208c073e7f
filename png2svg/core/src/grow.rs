use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::PixelGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];
}

/// How a seeded box is grown before it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrowthStrategy {
    /// Extend right while possible, then down, repeatedly.
    ///
    /// Seeds come from a raster-order scan, so everything above and to the
    /// left of the seed is covered already and never worth trying.
    #[default]
    RightDownOnly,
    /// Try right, down, left and up in that order on every round.
    Omnidirectional,
    /// Try all four directions in a freshly shuffled order on every round.
    RandomizedOmnidirectional,
}

/// A solid-color box being grown over uncovered pixels.
///
/// Every pixel in `[x, x + w) x [y, y + h)` has exactly the RGBA value
/// `rgba` and was uncovered when the box reached it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub rgba: [u8; 4],
}

impl Rect {
    /// Creates a 1x1 box at `(x, y)` sampling that pixel's color.
    ///
    /// # Panics
    /// Panics if the pixel is already covered. The driver loop only seeds
    /// boxes at pixels returned by `first_uncovered`, so this is a logic bug.
    pub fn seed(grid: &PixelGrid, x: u32, y: u32) -> Self {
        assert!(
            !grid.is_covered(x, y),
            "cannot seed a box at ({x}, {y}): the pixel is already covered"
        );
        Self {
            x,
            y,
            w: 1,
            h: 1,
            rgba: grid.color_with_alpha_at(x, y),
        }
    }

    pub fn is_single_pixel(&self) -> bool {
        self.w == 1 && self.h == 1
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    fn column_is_open(&self, grid: &PixelGrid, x: u32) -> bool {
        (self.y..self.y + self.h).all(|y| grid.is_open_with(x, y, self.rgba))
    }

    fn row_is_open(&self, grid: &PixelGrid, y: u32) -> bool {
        (self.x..self.x + self.w).all(|x| grid.is_open_with(x, y, self.rgba))
    }

    /// Extends one edge by one pixel if every newly included pixel is
    /// uncovered and has the box's color. Returns whether it grew.
    pub fn try_extend(&mut self, grid: &PixelGrid, direction: Direction) -> bool {
        let grown = match direction {
            Direction::Right => {
                let x = self.x + self.w;
                let ok = x < grid.width() && self.column_is_open(grid, x);
                if ok {
                    self.w += 1;
                }
                ok
            }
            Direction::Down => {
                let y = self.y + self.h;
                let ok = y < grid.height() && self.row_is_open(grid, y);
                if ok {
                    self.h += 1;
                }
                ok
            }
            Direction::Left => {
                let ok = self.x > 0 && self.column_is_open(grid, self.x - 1);
                if ok {
                    self.x -= 1;
                    self.w += 1;
                }
                ok
            }
            Direction::Up => {
                let ok = self.y > 0 && self.row_is_open(grid, self.y - 1);
                if ok {
                    self.y -= 1;
                    self.h += 1;
                }
                ok
            }
        };
        trace!("extend {direction:?} at ({}, {}): {grown}", self.x, self.y);
        grown
    }

    pub fn try_extend_right(&mut self, grid: &PixelGrid) -> bool {
        self.try_extend(grid, Direction::Right)
    }

    pub fn try_extend_down(&mut self, grid: &PixelGrid) -> bool {
        self.try_extend(grid, Direction::Down)
    }

    pub fn try_extend_left(&mut self, grid: &PixelGrid) -> bool {
        self.try_extend(grid, Direction::Left)
    }

    pub fn try_extend_up(&mut self, grid: &PixelGrid) -> bool {
        self.try_extend(grid, Direction::Up)
    }

    /// Grows the box until no direction allowed by `strategy` succeeds.
    /// Returns true if the box grew at least once.
    ///
    /// `rng` is only consulted by [`GrowthStrategy::RandomizedOmnidirectional`].
    pub fn grow<R>(&mut self, grid: &PixelGrid, strategy: GrowthStrategy, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        let mut expanded = false;
        match strategy {
            GrowthStrategy::RightDownOnly => {
                while self.try_extend_right(grid) || self.try_extend_down(grid) {
                    expanded = true;
                }
            }
            GrowthStrategy::Omnidirectional => {
                while Direction::ALL.iter().any(|&d| self.try_extend(grid, d)) {
                    expanded = true;
                }
            }
            GrowthStrategy::RandomizedOmnidirectional => loop {
                let mut directions = Direction::ALL;
                directions.shuffle(rng);
                if !directions.iter().any(|&d| self.try_extend(grid, d)) {
                    break;
                }
                expanded = true;
            },
        }
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn grid_from_rows(rows: &[&str]) -> PixelGrid {
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        PixelGrid::from_fn(width, rows.len() as u32, |x, y| {
            match rows[y as usize].as_bytes()[x as usize] {
                b'r' => RED,
                b'b' => BLUE,
                _ => [0, 0, 0, 0],
            }
        })
    }

    #[test]
    fn solid_grid_becomes_one_box() {
        let grid = PixelGrid::from_fn(5, 4, |_, _| RED);
        let mut rect = Rect::seed(&grid, 0, 0);

        assert!(rect.grow(&grid, GrowthStrategy::RightDownOnly, &mut rng()));
        assert_eq!((rect.x, rect.y, rect.w, rect.h), (0, 0, 5, 4));
        assert_eq!(rect.rgba, RED);
    }

    #[test]
    fn stops_at_color_discontinuity() {
        let grid = grid_from_rows(&["rrrbb"]);
        let mut rect = Rect::seed(&grid, 0, 0);
        rect.grow(&grid, GrowthStrategy::RightDownOnly, &mut rng());

        assert_eq!(rect.w, 3);
        assert_eq!(rect.h, 1);
    }

    #[test]
    fn right_edge_stops_extension_without_mutation() {
        let grid = grid_from_rows(&["rr"]);
        let mut rect = Rect::seed(&grid, 1, 0);
        let before = rect;

        assert!(!rect.try_extend_right(&grid));
        assert!(!rect.try_extend_down(&grid));
        assert_eq!(rect, before);
    }

    #[test]
    fn prefers_width_before_height() {
        let grid = grid_from_rows(&["rrr", "rrb", "rrb"]);
        let mut rect = Rect::seed(&grid, 0, 0);
        rect.grow(&grid, GrowthStrategy::RightDownOnly, &mut rng());

        // Full first row wins, which blocks any downward growth.
        assert_eq!((rect.w, rect.h), (3, 1));
    }

    #[test]
    fn alpha_difference_blocks_growth() {
        let grid = PixelGrid::from_fn(2, 1, |x, _| [10, 10, 10, if x == 0 { 255 } else { 128 }]);
        let mut rect = Rect::seed(&grid, 0, 0);

        assert!(!rect.try_extend_right(&grid));
    }

    #[test]
    fn never_grows_into_covered_pixels() {
        let mut grid = grid_from_rows(&["brr", "rrr"]);
        grid.mark_covered(&Rect {
            x: 1,
            y: 0,
            w: 2,
            h: 2,
            rgba: RED,
        });
        grid.mark_covered(&Rect {
            x: 0,
            y: 0,
            w: 1,
            h: 1,
            rgba: BLUE,
        });
        let mut rect = Rect::seed(&grid, 0, 1);

        assert!(!rect.grow(&grid, GrowthStrategy::RightDownOnly, &mut rng()));
        assert!(rect.is_single_pixel());
    }

    #[test]
    #[should_panic(expected = "already covered")]
    fn seeding_a_covered_pixel_panics() {
        let grid = grid_from_rows(&["r."]);
        Rect::seed(&grid, 1, 0);
    }

    #[test]
    fn left_and_up_extend_the_origin() {
        let grid = PixelGrid::from_fn(3, 3, |_, _| BLUE);
        let mut rect = Rect::seed(&grid, 1, 1);

        assert!(rect.try_extend_left(&grid));
        assert!(rect.try_extend_up(&grid));
        assert_eq!((rect.x, rect.y, rect.w, rect.h), (0, 0, 2, 2));
        assert!(!rect.try_extend_left(&grid));
        assert!(!rect.try_extend_up(&grid));
    }

    #[test]
    fn omnidirectional_strategies_fill_a_solid_grid_from_the_middle() {
        let grid = PixelGrid::from_fn(4, 3, |_, _| BLUE);
        for strategy in [
            GrowthStrategy::Omnidirectional,
            GrowthStrategy::RandomizedOmnidirectional,
        ] {
            let mut rect = Rect::seed(&grid, 2, 1);
            assert!(rect.grow(&grid, strategy, &mut rng()));
            assert_eq!((rect.x, rect.y, rect.w, rect.h), (0, 0, 4, 3), "{strategy:?}");
        }
    }

    #[test]
    fn right_down_only_ignores_pixels_before_the_seed() {
        let grid = PixelGrid::from_fn(3, 3, |_, _| BLUE);
        let mut rect = Rect::seed(&grid, 1, 1);
        rect.grow(&grid, GrowthStrategy::RightDownOnly, &mut rng());

        assert_eq!((rect.x, rect.y, rect.w, rect.h), (1, 1, 2, 2));
        assert_eq!(rect.area(), 4);
    }
}
