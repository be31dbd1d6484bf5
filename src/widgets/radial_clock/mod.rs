use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::Color;
use crate::core::HostEvent;
use crate::geometry::Size;
use crate::widgets::{Notice, Widget};

pub mod rings;

pub use rings::{
    compute_angles, ClockSnapshot, RingBand, RingLayout, RingSweep, TimeUnit, UnitSample,
};

#[derive(Debug, Deserialize, Serialize)]
pub struct RadialClockConfig {
    /// Which rings to show, innermost first (default: all seven)
    #[serde(default = "default_units")]
    pub units: Vec<String>,

    /// Ring colors by unit name, hex strings
    #[serde(default)]
    pub colors: HashMap<String, String>,

    /// Surface width in pixels until the host reports a real size
    #[serde(default = "default_side")]
    pub width: i32,

    /// Surface height in pixels until the host reports a real size
    #[serde(default = "default_side")]
    pub height: i32,
}

fn default_units() -> Vec<String> {
    TimeUnit::DISPLAY_ORDER
        .iter()
        .map(|u| u.config_name().to_string())
        .collect()
}

fn default_side() -> i32 {
    400
}

impl Default for RadialClockConfig {
    fn default() -> Self {
        Self {
            units: default_units(),
            colors: HashMap::new(),
            width: default_side(),
            height: default_side(),
        }
    }
}

fn default_palette() -> HashMap<TimeUnit, Color> {
    HashMap::from([
        (TimeUnit::SecondOfMinute, Color::rgb(255, 0, 0)),
        (TimeUnit::MinuteOfHour, Color::rgb(0, 0, 255)),
        (TimeUnit::HourOfDay, Color::rgb(0, 255, 0)),
        (TimeUnit::DayOfWeek, Color::rgb(255, 255, 0)),
        (TimeUnit::DayOfMonth, Color::rgb(0, 255, 255)),
        (TimeUnit::DayOfYear, Color::rgb(255, 0, 255)),
        (TimeUnit::MonthOfYear, Color::BLACK),
    ])
}

/// Everything a renderer needs to paint one ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingFact {
    pub band: RingBand,
    pub sweep_deg: i32,
    pub color: Color,
}

/// The radial countdown clock: one shrinking arc per active time unit.
pub struct RadialClockWidget {
    active: Vec<TimeUnit>,
    palette: HashMap<TimeUnit, Color>,
    surface: Size,
    layout: RingLayout,
    sweeps: Vec<RingSweep>,
}

impl RadialClockWidget {
    pub fn new() -> Self {
        Self {
            active: TimeUnit::DISPLAY_ORDER.to_vec(),
            palette: default_palette(),
            surface: Size::new(default_side(), default_side()),
            layout: RingLayout::compute(&TimeUnit::DISPLAY_ORDER, Size::new(400, 400)),
            sweeps: Vec::new(),
        }
    }

    /// Recompute sweeps and ring placement for an instant. Called from the
    /// host tick; split out so tests can drive a fixed clock.
    pub fn update(&mut self, now: NaiveDateTime) {
        let snapshot = ClockSnapshot::sample(now);
        self.sweeps = compute_angles(&snapshot, &self.active);
        self.layout = RingLayout::compute(&self.active, self.surface);
    }

    pub fn set_surface(&mut self, size: Size) {
        self.surface = size;
        self.layout = RingLayout::compute(&self.active, self.surface);
    }

    /// Render facts for the current instant, paint order (outermost first).
    pub fn frame(&self) -> Vec<RingFact> {
        self.layout
            .bands()
            .iter()
            .map(|band| RingFact {
                band: *band,
                sweep_deg: self
                    .sweeps
                    .iter()
                    .find(|s| s.unit == band.unit)
                    .map(|s| s.sweep_deg)
                    .unwrap_or(0),
                color: self.palette.get(&band.unit).copied().unwrap_or(Color::BLACK),
            })
            .collect()
    }

    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    fn status(&self) -> String {
        let mut out = format!("units: {}\n", self.active.len());
        for sweep in &self.sweeps {
            out += &format!("{}: {} deg\n", sweep.unit.config_name(), sweep.sweep_deg);
        }
        out
    }
}

impl Default for RadialClockWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Widget for RadialClockWidget {
    fn name(&self) -> &str {
        "radial_clock"
    }

    async fn init(&mut self, config: &toml::Value) -> Result<()> {
        let config: RadialClockConfig = config.clone().try_into()?;

        let mut active = Vec::new();
        for name in &config.units {
            match TimeUnit::from_config_name(name) {
                Some(unit) if !active.contains(&unit) => active.push(unit),
                Some(_) => {}
                None => warn!("⚠️  Unknown clock unit '{}', skipping", name),
            }
        }
        // Keep display order regardless of config order.
        self.active = TimeUnit::DISPLAY_ORDER
            .iter()
            .copied()
            .filter(|u| active.contains(u))
            .collect();
        if self.active.is_empty() {
            warn!("⚠️  Radial clock configured with no units; nothing to draw");
        }

        // Palette entries are read once here and kept until the next init;
        // each init starts from the defaults so dropped overrides reset.
        self.palette = default_palette();
        for (name, spec) in &config.colors {
            match TimeUnit::from_config_name(name) {
                Some(unit) => {
                    self.palette.insert(unit, Color::parse_or_default(spec));
                }
                None => warn!("⚠️  Color for unknown clock unit '{}', skipping", name),
            }
        }

        self.surface = Size::new(config.width, config.height);
        self.update(Local::now().naive_local());

        debug!("🕰️  Radial clock ready with {} rings", self.active.len());
        Ok(())
    }

    async fn handle_event(&mut self, event: &HostEvent) -> Result<Vec<Notice>> {
        match event {
            HostEvent::Tick { .. } => {
                self.update(Local::now().naive_local());
                Ok(Vec::new())
            }
            HostEvent::Resize { size } => {
                self.set_surface(*size);
                Ok(Vec::new())
            }
            HostEvent::Click { point } => Ok(self
                .layout
                .hit_test(*point)
                .map(|unit| Notice::Tooltip {
                    text: unit.description().to_string(),
                })
                .into_iter()
                .collect()),
        }
    }

    async fn handle_command(&mut self, command: &str, _args: &[&str]) -> Result<String> {
        match command {
            "status" => Ok(self.status()),
            _ => Err(anyhow::anyhow!("Unknown command: {}", command)),
        }
    }
}
