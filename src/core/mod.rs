use std::time::Duration;

use crate::geometry::{Point, Size};

pub mod host;

pub use host::WidgetHost;

/// Events the host delivers to every loaded widget. Ticks and clicks arrive
/// serialized on one logical thread; there is no other mutation path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Periodic redraw/advance tick with the elapsed-time delta.
    Tick { delta: Duration },

    /// Pointer click, in widget-local coordinates.
    Click { point: Point },

    /// The render surface changed size.
    Resize { size: Size },
}
