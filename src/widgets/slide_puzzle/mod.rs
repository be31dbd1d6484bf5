use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::animation::EasingFunction;
use crate::core::HostEvent;
use crate::geometry::Size;
use crate::widgets::{Notice, Widget};

pub mod grid;
pub mod tile;

pub use grid::PuzzleGrid;
pub use tile::{Cell, ImageRegion, Tile};

#[derive(Debug, Deserialize, Serialize)]
pub struct SlidePuzzleConfig {
    /// Board rows (default: 3)
    #[serde(default = "default_rows")]
    pub rows: i32,

    /// Board columns (default: 3)
    #[serde(default = "default_columns")]
    pub columns: i32,

    /// Source image width in pixels, as reported by the image provider
    #[serde(default = "default_image_side")]
    pub image_width: i32,

    /// Source image height in pixels
    #[serde(default = "default_image_side")]
    pub image_height: i32,

    /// Tile slide duration in milliseconds (default: 500)
    #[serde(default = "default_slide_ms")]
    pub slide_ms: u64,

    /// Easing curve for tile slides (default: "ease-in-out")
    #[serde(default = "default_easing")]
    pub easing: String,
}

fn default_rows() -> i32 {
    3
}
fn default_columns() -> i32 {
    3
}
fn default_image_side() -> i32 {
    300
}
fn default_slide_ms() -> u64 {
    500
}
fn default_easing() -> String {
    "ease-in-out".to_string()
}

impl Default for SlidePuzzleConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            columns: default_columns(),
            image_width: default_image_side(),
            image_height: default_image_side(),
            slide_ms: default_slide_ms(),
            easing: default_easing(),
        }
    }
}

/// The sliding tile puzzle widget.
pub struct SlidePuzzleWidget {
    grid: PuzzleGrid,
    rng: SmallRng,
}

impl SlidePuzzleWidget {
    pub fn new() -> Self {
        let config = SlidePuzzleConfig::default();
        Self {
            grid: Self::build_grid(&config),
            rng: SmallRng::from_entropy(),
        }
    }

    fn build_grid(config: &SlidePuzzleConfig) -> PuzzleGrid {
        PuzzleGrid::new(
            config.rows,
            config.columns,
            Size::new(config.image_width, config.image_height),
            Duration::from_millis(config.slide_ms),
            EasingFunction::from_name(&config.easing),
        )
    }

    pub fn grid(&self) -> &PuzzleGrid {
        &self.grid
    }
}

impl Default for SlidePuzzleWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Widget for SlidePuzzleWidget {
    fn name(&self) -> &str {
        "slide_puzzle"
    }

    async fn init(&mut self, config: &toml::Value) -> Result<()> {
        let config: SlidePuzzleConfig = config.clone().try_into()?;
        self.grid = Self::build_grid(&config);
        if self.grid.is_degenerate() {
            warn!(
                "⚠️  Slide puzzle {}x{} on {}x{} image is degenerate; board disabled",
                config.rows, config.columns, config.image_width, config.image_height
            );
            return Ok(());
        }

        self.grid.scramble(&mut self.rng);
        debug!(
            "🧩 Slide puzzle ready: {}x{} tiles",
            config.rows, config.columns
        );
        Ok(())
    }

    async fn handle_event(&mut self, event: &HostEvent) -> Result<Vec<Notice>> {
        match event {
            HostEvent::Tick { delta } => Ok(self.grid.tick(*delta)),
            HostEvent::Click { point } => Ok(self.grid.click(*point)),
            // Board geometry follows the source image, not the surface;
            // scaling to the surface is the renderer's concern.
            HostEvent::Resize { .. } => Ok(Vec::new()),
        }
    }

    async fn handle_command(&mut self, command: &str, _args: &[&str]) -> Result<String> {
        match command {
            "scramble" => {
                self.grid.scramble(&mut self.rng);
                Ok("scrambled".to_string())
            }
            "status" => Ok(self.grid.describe()),
            _ => Err(anyhow::anyhow!("Unknown command: {}", command)),
        }
    }
}
