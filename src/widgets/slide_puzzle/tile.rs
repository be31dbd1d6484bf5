use crate::geometry::{Point, Size};

/// A grid cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance; legal moves are exactly distance one.
    pub fn steps_to(&self, other: Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

/// Crop sub-rectangle into the host-provided source image. The core never
/// touches pixels; a renderer uses this to blit the tile face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// One movable puzzle piece. Exactly one tile per board is inactive (the
/// missing piece); it sits off-board until the final corrective slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: usize,
    home: Cell,
    cell: Cell,
    position: Point,
    size: Size,
    image: ImageRegion,
    active: bool,
    border: bool,
}

impl Tile {
    pub fn new(id: usize, home: Cell, size: Size) -> Self {
        let position = Point::new(
            (home.col * size.width) as f64,
            (home.row * size.height) as f64,
        );
        Self {
            id,
            home,
            cell: home,
            position,
            size,
            image: ImageRegion {
                x: home.col * size.width,
                y: home.row * size.height,
                width: size.width,
                height: size.height,
            },
            active: true,
            border: true,
        }
    }

    pub fn home(&self) -> Cell {
        self.home
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn set_cell(&mut self, cell: Cell) {
        self.cell = cell;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn image(&self) -> ImageRegion {
        self.image
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn has_border(&self) -> bool {
        self.border
    }

    pub fn set_border(&mut self, border: bool) {
        self.border = border;
    }

    /// A tile is valid when inactive, or when it sits on its home cell.
    pub fn is_valid(&self) -> bool {
        !self.active || self.cell == self.home
    }

    /// Whether a widget-local point falls inside this tile's current rect.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.position.x
            && point.x < self.position.x + self.size.width as f64
            && point.y >= self.position.y
            && point.y < self.position.y + self.size.height as f64
    }

    pub fn describe(&self) -> String {
        format!(
            "tile {} home [{}/{}] at [{}/{}] pos ({:.0},{:.0}){}",
            self.id,
            self.home.row,
            self.home.col,
            self.cell.row,
            self.cell.col,
            self.position.x,
            self.position.y,
            if self.active { "" } else { " (missing)" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_starts_home_and_valid() {
        let tile = Tile::new(4, Cell::new(1, 1), Size::new(100, 80));
        assert_eq!(tile.cell(), tile.home());
        assert!(tile.is_valid());
        assert_eq!(tile.position(), Point::new(100.0, 80.0));
        assert_eq!(tile.image().x, 100);
        assert_eq!(tile.image().y, 80);
    }

    #[test]
    fn test_inactive_tile_is_always_valid() {
        let mut tile = Tile::new(0, Cell::new(0, 0), Size::new(100, 100));
        tile.set_cell(Cell::new(2, 2));
        assert!(!tile.is_valid());
        tile.set_active(false);
        assert!(tile.is_valid());
    }

    #[test]
    fn test_contains() {
        let tile = Tile::new(0, Cell::new(0, 0), Size::new(100, 100));
        assert!(tile.contains(Point::new(0.0, 0.0)));
        assert!(tile.contains(Point::new(99.9, 50.0)));
        assert!(!tile.contains(Point::new(100.0, 50.0)));
        assert!(!tile.contains(Point::new(-1.0, 50.0)));
    }

    #[test]
    fn test_steps() {
        assert_eq!(Cell::new(1, 1).steps_to(Cell::new(1, 2)), 1);
        assert_eq!(Cell::new(1, 1).steps_to(Cell::new(2, 2)), 2);
        assert_eq!(Cell::new(0, 0).steps_to(Cell::new(0, 0)), 0);
    }
}
