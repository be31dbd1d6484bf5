use std::time::Duration;

use rand::Rng;

use crate::animation::{EasingFunction, Slide};
use crate::geometry::{Point, Size};
use crate::widgets::Notice;

use super::tile::{Cell, Tile};

/// The puzzle board: an R×C arrangement of tiles around one empty slot.
///
/// Occupancy transfers when a move starts; pixel positions catch up through
/// the slide animation, and validation runs when the slide settles. One
/// slide at a time; clicks while one is in flight are absorbed.
#[derive(Debug)]
pub struct PuzzleGrid {
    rows: i32,
    cols: i32,
    tile_size: Size,
    tiles: Vec<Tile>,
    missing: Option<usize>,
    empty: Cell,
    slide: Option<(usize, Slide)>,
    corrective: bool,
    solved: bool,
    slide_duration: Duration,
    easing: EasingFunction,
}

impl PuzzleGrid {
    /// Build a board for a source image of the given pixel size. Tile size
    /// rounds up so the tiles cover the image. Degenerate shapes (no rows or
    /// columns, or fewer than two cells) produce an inert board.
    pub fn new(
        rows: i32,
        cols: i32,
        image: Size,
        slide_duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        let degenerate =
            rows <= 0 || cols <= 0 || rows * cols < 2 || image.width <= 0 || image.height <= 0;

        let tile_size = if degenerate {
            Size::new(0, 0)
        } else {
            Size::new(
                (image.width + cols - 1) / cols,
                (image.height + rows - 1) / rows,
            )
        };

        let tiles = if degenerate {
            Vec::new()
        } else {
            (0..rows * cols)
                .map(|i| Tile::new(i as usize, Cell::new(i / cols, i % cols), tile_size))
                .collect()
        };

        Self {
            rows,
            cols,
            tile_size,
            tiles,
            missing: None,
            empty: Cell::new(rows - 1, cols - 1),
            slide: None,
            corrective: false,
            solved: false,
            slide_duration,
            easing,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn empty_cell(&self) -> Cell {
        self.empty
    }

    fn cell_origin(&self, cell: Cell) -> Point {
        Point::new(
            (cell.col * self.tile_size.width) as f64,
            (cell.row * self.tile_size.height) as f64,
        )
    }

    /// Parking spot for the missing tile, just off the board's right edge.
    fn park_position(&self) -> Point {
        Point::new(
            (self.cols * self.tile_size.width) as f64,
            ((self.rows - 1) * self.tile_size.height) as f64,
        )
    }

    /// Randomly assign tiles to cells, drawing without replacement from the
    /// unplaced pool. The last tile drawn becomes the missing piece, parked
    /// off-board; the bottom-right cell is left empty.
    pub fn scramble(&mut self, rng: &mut impl Rng) {
        if self.is_degenerate() {
            return;
        }

        self.solved = false;
        self.slide = None;
        self.corrective = false;

        let mut pool: Vec<usize> = (0..self.tiles.len()).collect();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let drawn = pool.swap_remove(rng.gen_range(0..pool.len()));
                let park = self.park_position();
                let origin = self.cell_origin(Cell::new(row, col));

                let tile = &mut self.tiles[drawn];
                tile.set_border(true);
                if pool.is_empty() {
                    tile.set_active(false);
                    tile.set_position(park);
                    self.missing = Some(drawn);
                } else {
                    tile.set_active(true);
                    tile.set_cell(Cell::new(row, col));
                    tile.set_position(origin);
                }
            }
        }

        self.empty = Cell::new(self.rows - 1, self.cols - 1);
    }

    /// The single-cell shift that would take this tile into the empty slot,
    /// as (column delta, row delta). `None` when the tile is not adjacent to
    /// the empty slot, the tile is inactive, the board is locked, or a slide
    /// is already in flight.
    pub fn legal_move(&self, tile_id: usize) -> Option<(i32, i32)> {
        if self.solved || self.slide.is_some() {
            return None;
        }
        let tile = self.tiles.get(tile_id)?;
        if !tile.is_active() {
            return None;
        }
        // Axis-aligned single step only; the destination must be the one
        // unoccupied cell, which also keeps it inside the board.
        (tile.cell().steps_to(self.empty) == 1)
            .then(|| (self.empty.col - tile.cell().col, self.empty.row - tile.cell().row))
    }

    /// Resolve a click to a tile and start its slide if the move is legal.
    pub fn click(&mut self, point: Point) -> Vec<Notice> {
        let Some(tile_id) = self
            .tiles
            .iter()
            .find(|t| t.is_active() && t.contains(point))
            .map(|t| t.id)
        else {
            return Vec::new();
        };

        match self.legal_move(tile_id) {
            Some(_) => self.start_move(tile_id),
            None => Vec::new(),
        }
    }

    fn start_move(&mut self, tile_id: usize) -> Vec<Notice> {
        let target = self.empty;
        let from = self.tiles[tile_id].position();
        let to = self.cell_origin(target);

        // Occupancy transfers now; the pixel position animates behind it.
        let vacated = self.tiles[tile_id].cell();
        self.tiles[tile_id].set_cell(target);
        self.empty = vacated;

        self.slide = Some((
            tile_id,
            Slide::new(from, to, self.slide_duration, self.easing.clone()),
        ));
        vec![Notice::MoveStarted { tile: tile_id }]
    }

    /// Advance the in-flight slide, if any. A settled move validates the
    /// board; when every enabled tile is home the missing tile takes a final
    /// corrective slide to its own home cell, after which the board locks
    /// and `Solved` fires exactly once.
    pub fn tick(&mut self, delta: Duration) -> Vec<Notice> {
        let Some((tile_id, slide)) = self.slide.as_mut() else {
            return Vec::new();
        };
        let tile_id = *tile_id;

        let (position, done) = slide.advance(delta);
        self.tiles[tile_id].set_position(position);
        if !done {
            return Vec::new();
        }
        self.slide = None;

        if self.corrective {
            self.corrective = false;
            self.solved = true;
            for tile in &mut self.tiles {
                tile.set_active(false);
                tile.set_border(false);
            }
            return vec![Notice::MoveSettled { tile: tile_id }, Notice::Solved];
        }

        let mut notices = vec![Notice::MoveSettled { tile: tile_id }];
        if self.all_tiles_valid() {
            if let Some(missing) = self.missing {
                // The only free cell left is the missing tile's home.
                let home = self.tiles[missing].home();
                let from = self.tiles[missing].position();
                let to = self.cell_origin(home);
                self.tiles[missing].set_cell(home);
                self.slide = Some((
                    missing,
                    Slide::new(from, to, self.slide_duration, self.easing.clone()),
                ));
                self.corrective = true;
            }
        }
        notices
    }

    /// True when every active tile sits on its home cell.
    pub fn all_tiles_valid(&self) -> bool {
        !self.tiles.is_empty() && self.tiles.iter().all(|t| t.is_valid())
    }

    pub fn describe(&self) -> String {
        let mut out = format!(
            "{}x{} board, empty [{}/{}], solved: {}\n",
            self.rows, self.cols, self.empty.row, self.empty.col, self.solved
        );
        for tile in &self.tiles {
            out += &tile.describe();
            out.push('\n');
        }
        out
    }

    /// Test hook: force a layout without going through `scramble`.
    #[cfg(test)]
    pub(crate) fn place_for_test(&mut self, placements: &[(usize, Cell)], missing: usize) {
        for (tile_id, cell) in placements {
            let origin = self.cell_origin(*cell);
            let tile = &mut self.tiles[*tile_id];
            tile.set_active(true);
            tile.set_border(true);
            tile.set_cell(*cell);
            tile.set_position(origin);
        }
        let park = self.park_position();
        self.tiles[missing].set_active(false);
        self.tiles[missing].set_position(park);
        self.missing = Some(missing);

        let occupied: Vec<Cell> = placements.iter().map(|(_, c)| *c).collect();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = Cell::new(row, col);
                if !occupied.contains(&cell) {
                    self.empty = cell;
                }
            }
        }
    }
}
