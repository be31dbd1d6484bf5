use anyhow::Result;
use async_trait::async_trait;

use crate::core::HostEvent;

pub mod radial_clock;
pub mod slide_puzzle;
pub mod spinner;

pub use radial_clock::RadialClockWidget;
pub use slide_puzzle::SlidePuzzleWidget;
pub use spinner::SpinnerWidget;

/// Something a widget wants the host (or a renderer) to know about. Animation
/// completions surface here as plain values instead of fired callbacks, so
/// widget logic is testable without an event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A click resolved to a describable region.
    Tooltip { text: String },

    /// A tile began sliding toward the empty slot.
    MoveStarted { tile: usize },

    /// A tile slide reached its destination cell.
    MoveSettled { tile: usize },

    /// Every tile is home; the board is locked.
    Solved,

    /// A needle spin started.
    SpinStarted,

    /// A needle spin settled on a slice.
    SpinSettled { label: String },
}

#[async_trait]
pub trait Widget: Send + Sync {
    /// Widget name
    fn name(&self) -> &str;

    /// Initialize widget with configuration
    async fn init(&mut self, config: &toml::Value) -> Result<()>;

    /// Handle a host event, returning any notices it produced
    async fn handle_event(&mut self, event: &HostEvent) -> Result<Vec<Notice>>;

    /// Handle commands from the host
    async fn handle_command(&mut self, command: &str, args: &[&str]) -> Result<String>;
}

pub type WidgetBox = Box<dyn Widget>;
