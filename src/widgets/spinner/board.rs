use std::collections::HashMap;

use crate::color::Color;
use crate::geometry::RegionMap;

use super::physics::FULL_CIRCLE;

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Slices start at 12 o'clock on the painted face.
const DEFAULT_START_DEG: i32 = 90;

/// One labeled, colored wedge of the wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub color: Color,
}

/// The wheel face: equal slices wrapped around a circle, plus the
/// angle-to-slice region table used to resolve a settled needle.
#[derive(Debug, Clone)]
pub struct Board {
    slices: Vec<Slice>,
    regions: RegionMap<usize>,
}

impl Board {
    /// Build from parallel label and color lists. When the color list runs
    /// short, a repeated label reuses the color it was first given; labels
    /// with no color at all fall back to the default. Malformed color specs
    /// also fall back rather than failing.
    pub fn new(labels: &[String], colors: &[String]) -> Self {
        let mut cache: HashMap<&str, Color> = HashMap::new();
        let slices = labels
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let color = match colors.get(index) {
                    Some(spec) => {
                        let color = Color::parse_or_default(spec);
                        cache.insert(label, color);
                        color
                    }
                    None => cache.get(label.as_str()).copied().unwrap_or(Color::BLACK),
                };
                Slice {
                    label: label.clone(),
                    color,
                }
            })
            .collect();

        let mut board = Self {
            slices,
            regions: RegionMap::new(),
        };
        board.rebuild(DEFAULT_START_DEG);
        board
    }

    /// Rebuild the region table with slices laid out from `start_deg`.
    /// Each slice's recorded boundary is its end angle, wrapped to the
    /// circle, so lookups find the enclosing slice via the smallest
    /// boundary at or above the query angle.
    pub fn rebuild(&mut self, start_deg: i32) {
        self.regions.clear();
        let count = self.slices.len() as i32;
        if count == 0 {
            return;
        }

        let sweep = FULL_CIRCLE as i32 / count;
        let mut angle = start_deg;
        for index in 0..count {
            angle += sweep;
            self.regions
                .insert(angle.rem_euclid(FULL_CIRCLE as i32), index as usize);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Angular width of one slice in degrees.
    pub fn slice_sweep(&self) -> i32 {
        if self.slices.is_empty() {
            0
        } else {
            FULL_CIRCLE as i32 / self.slices.len() as i32
        }
    }

    /// The slice enclosing a board-frame angle, wrapping past the last
    /// boundary to the first slice.
    pub fn resolve(&self, board_angle: f64) -> Option<&Slice> {
        let angle = (board_angle as i32).rem_euclid(FULL_CIRCLE as i32);
        self.regions.wrapping(angle).map(|index| &self.slices[index])
    }
}

/// Convert a settled needle rotation into the board's frame of reference.
/// The needle points up at rotation zero while slices are laid out from the
/// painted face's origin, so the mapping is a reflection about 90 degrees.
pub fn needle_to_board_angle(needle_deg: f64) -> f64 {
    (90.0 - needle_deg).rem_euclid(FULL_CIRCLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_equal_slices_round_trip() {
        let mut board = Board::new(&strings(&["a", "b", "c", "d"]), &[]);
        board.rebuild(0);

        // Off-boundary angles land in floor(angle / sweep).
        let sweep = board.slice_sweep();
        assert_eq!(sweep, 90);
        for angle in [1, 45, 89, 91, 179, 200, 269, 271, 359] {
            let expected = (angle / sweep) as usize;
            let slice = board.resolve(angle as f64).unwrap();
            assert_eq!(slice.label, board.slices()[expected].label, "angle {angle}");
        }
    }

    #[test]
    fn test_wrap_past_last_boundary() {
        let mut board = Board::new(&strings(&["a", "b", "c"]), &[]);
        board.rebuild(90);
        // Boundaries at 210, 330, 90; angles above 330 wrap to slice 2.
        let slice = board.resolve(350.0).unwrap();
        assert_eq!(slice.label, "c");
    }

    #[test]
    fn test_label_color_cache() {
        let labels = strings(&["A", "B", "C", "D", "A", "B", "C", "D"]);
        let colors = strings(&["#FF0000", "#00FF00", "#0000FF", "#FF00FF"]);
        let board = Board::new(&labels, &colors);

        // Repeated labels past the color list reuse their cached color.
        assert_eq!(board.slices()[4].color, Color::rgb(255, 0, 0));
        assert_eq!(board.slices()[5].color, Color::rgb(0, 255, 0));
        assert_eq!(board.slices()[7].color, Color::rgb(255, 0, 255));
    }

    #[test]
    fn test_uncached_label_defaults() {
        let board = Board::new(&strings(&["A", "B"]), &strings(&["#112233"]));
        assert_eq!(board.slices()[0].color, Color::rgb(0x11, 0x22, 0x33));
        assert_eq!(board.slices()[1].color, Color::BLACK);
    }

    #[test]
    fn test_malformed_color_defaults() {
        let board = Board::new(&strings(&["A"]), &strings(&["chartreuse"]));
        assert_eq!(board.slices()[0].color, Color::BLACK);
    }

    #[test]
    fn test_empty_board_resolves_nothing() {
        let board = Board::new(&[], &[]);
        assert!(board.is_empty());
        assert!(board.resolve(100.0).is_none());
    }

    #[test]
    fn test_needle_frame_normalization() {
        assert_eq!(needle_to_board_angle(0.0), 90.0);
        assert_eq!(needle_to_board_angle(90.0), 0.0);
        assert_eq!(needle_to_board_angle(180.0), 270.0);
        assert_eq!(needle_to_board_angle(350.0), 100.0);
    }
}
