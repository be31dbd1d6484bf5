//! Curio - interactive widget cores behind a plugin host
//!
//! This crate provides the geometry, timing, and physics for three
//! pointer-driven widgets (a radial clock, a sliding tile puzzle, and a
//! spinning-wheel selector), plus the host that loads them from
//! configuration and drives them with ticks and clicks. Rendering is left
//! to the embedding application.

pub mod animation;
pub mod color;
pub mod config;
pub mod core;
pub mod geometry;
pub mod widgets;

// Re-export commonly used types
pub use config::Config;
pub use core::{HostEvent, WidgetHost};

pub use animation::{EasingFunction, Slide, Timeline};
pub use color::Color;
pub use geometry::{Point, RegionMap, Size};
pub use widgets::{Notice, Widget, WidgetBox};
