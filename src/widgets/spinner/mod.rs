use std::f64::consts::TAU;

use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::core::HostEvent;
use crate::geometry::Point;
use crate::widgets::{Notice, Widget};

pub mod board;
pub mod physics;

pub use board::{needle_to_board_angle, Board, Slice, UNKNOWN_LABEL};
pub use physics::SpinState;

#[derive(Debug, Deserialize, Serialize)]
pub struct SpinnerConfig {
    /// Wheel radius in pixels (default: 150)
    #[serde(default = "default_radius")]
    pub radius: i32,

    /// Slice labels, clockwise from the top
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,

    /// Slice colors, hex strings parallel to `labels`; short lists reuse
    /// colors by label
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,
}

fn default_radius() -> i32 {
    150
}

fn default_labels() -> Vec<String> {
    ["A", "B", "C", "D", "A", "B", "C", "D"]
        .map(String::from)
        .to_vec()
}

fn default_colors() -> Vec<String> {
    ["#FF0000", "#00FF00", "#0000FF", "#FF00FF"]
        .map(String::from)
        .to_vec()
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            labels: default_labels(),
            colors: default_colors(),
        }
    }
}

/// The spinning-wheel selector: a decelerating needle over labeled slices.
pub struct SpinnerWidget {
    board: Board,
    radius: i32,
    needle_angle: f64,
    spin: Option<SpinState>,
    rng: SmallRng,
    settled_tx: watch::Sender<Option<String>>,
    settled_rx: watch::Receiver<Option<String>>,
}

impl SpinnerWidget {
    pub fn new() -> Self {
        let config = SpinnerConfig::default();
        let (settled_tx, settled_rx) = watch::channel(None);
        Self {
            board: Board::new(&config.labels, &config.colors),
            radius: config.radius,
            needle_angle: 0.0,
            spin: None,
            rng: SmallRng::from_entropy(),
            settled_tx,
            settled_rx,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current needle rotation in degrees.
    pub fn needle_angle(&self) -> f64 {
        self.needle_angle
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    /// Start a spin unless one is already in flight or the board is empty;
    /// both cases are absorbed quietly.
    pub fn spin(&mut self) -> Vec<Notice> {
        if self.spin.is_some() {
            debug!("🎡 Spin requested while one is in flight; ignoring");
            return Vec::new();
        }
        if self.board.is_empty() {
            return Vec::new();
        }

        // One full turn of travel is the needle-tip circumference.
        let revolution = TAU * self.radius as f64;
        self.spin = Some(SpinState::start(self.needle_angle, revolution, &mut self.rng));
        self.settled_tx.send_replace(None);
        vec![Notice::SpinStarted]
    }

    fn advance(&mut self, delta: std::time::Duration) -> Vec<Notice> {
        let Some(spin) = self.spin.as_mut() else {
            return Vec::new();
        };

        let (angle, done) = spin.advance(delta);
        self.needle_angle = angle;
        if !done {
            return Vec::new();
        }

        self.spin = None;
        let label = self.resolve_current();
        self.settled_tx.send_replace(Some(label.clone()));
        vec![Notice::SpinSettled { label }]
    }

    fn resolve_current(&self) -> String {
        self.board
            .resolve(needle_to_board_angle(self.needle_angle))
            .map(|slice| slice.label.clone())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
    }

    /// The settled outcome. Resolves immediately when no spin is in flight;
    /// otherwise waits for the in-flight spin's single settle event.
    pub async fn value(&self) -> String {
        if self.spin.is_none() {
            if let Some(label) = self.settled_rx.borrow().clone() {
                return label;
            }
            return self.resolve_current();
        }

        let mut rx = self.settled_rx.clone();
        let settled = rx
            .wait_for(|label| label.is_some())
            .await
            .map(|label| (*label).clone());
        match settled {
            Ok(Some(label)) => label,
            _ => UNKNOWN_LABEL.to_string(),
        }
    }

    fn status(&self) -> String {
        format!(
            "slices: {}, needle: {:.1} deg, spinning: {}\n",
            self.board.slices().len(),
            self.needle_angle,
            self.is_spinning(),
        )
    }
}

impl Default for SpinnerWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Widget for SpinnerWidget {
    fn name(&self) -> &str {
        "spinner"
    }

    async fn init(&mut self, config: &toml::Value) -> Result<()> {
        let config: SpinnerConfig = config.clone().try_into()?;

        self.board = Board::new(&config.labels, &config.colors);
        self.radius = config.radius;
        self.spin = None;
        self.settled_tx.send_replace(None);

        if self.board.is_empty() {
            warn!("⚠️  Spinner configured with no slices; spins disabled");
        } else {
            debug!("🎡 Spinner ready with {} slices", self.board.slices().len());
        }
        Ok(())
    }

    async fn handle_event(&mut self, event: &HostEvent) -> Result<Vec<Notice>> {
        match event {
            HostEvent::Tick { delta } => Ok(self.advance(*delta)),
            HostEvent::Click { point } => {
                // Any click on the wheel face launches a spin.
                let center = Point::new(self.radius as f64, self.radius as f64);
                if point.distance_to(center) <= self.radius as f64 {
                    Ok(self.spin())
                } else {
                    Ok(Vec::new())
                }
            }
            HostEvent::Resize { .. } => Ok(Vec::new()),
        }
    }

    async fn handle_command(&mut self, command: &str, _args: &[&str]) -> Result<String> {
        match command {
            "spin" => {
                if self.spin().is_empty() {
                    Ok("busy".to_string())
                } else {
                    Ok("spinning".to_string())
                }
            }
            "value" => {
                if self.is_spinning() {
                    Ok("pending".to_string())
                } else {
                    Ok(self.value().await)
                }
            }
            "status" => Ok(self.status()),
            _ => Err(anyhow::anyhow!("Unknown command: {}", command)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn ready_widget() -> SpinnerWidget {
        let mut widget = SpinnerWidget::new();
        widget
            .init(&toml::Value::Table(Default::default()))
            .await
            .unwrap();
        widget
    }

    async fn tick_until_settled(widget: &mut SpinnerWidget) -> Vec<Notice> {
        let mut notices = Vec::new();
        for _ in 0..10_000 {
            notices.extend(
                widget
                    .handle_event(&HostEvent::Tick {
                        delta: Duration::from_millis(20),
                    })
                    .await
                    .unwrap(),
            );
            if !widget.is_spinning() {
                break;
            }
        }
        notices
    }

    #[tokio::test]
    async fn test_spin_settles_once_with_a_label() {
        let mut widget = ready_widget().await;

        let notices = widget.handle_command("spin", &[]).await.unwrap();
        assert_eq!(notices, "spinning");
        assert!(widget.is_spinning());

        let notices = tick_until_settled(&mut widget).await;
        let settles: Vec<_> = notices
            .iter()
            .filter(|n| matches!(n, Notice::SpinSettled { .. }))
            .collect();
        assert_eq!(settles.len(), 1);

        // The settled value resolves immediately afterwards.
        let value = widget.value().await;
        assert!(["A", "B", "C", "D"].contains(&value.as_str()));
    }

    #[tokio::test]
    async fn test_spin_while_in_flight_is_absorbed() {
        let mut widget = ready_widget().await;

        widget.handle_command("spin", &[]).await.unwrap();
        let reply = widget.handle_command("spin", &[]).await.unwrap();
        assert_eq!(reply, "busy");

        // Still exactly one settle.
        let notices = tick_until_settled(&mut widget).await;
        let settles = notices
            .iter()
            .filter(|n| matches!(n, Notice::SpinSettled { .. }))
            .count();
        assert_eq!(settles, 1);
    }

    #[tokio::test]
    async fn test_value_pending_while_spinning() {
        let mut widget = ready_widget().await;
        widget.handle_command("spin", &[]).await.unwrap();
        let reply = widget.handle_command("value", &[]).await.unwrap();
        assert_eq!(reply, "pending");
    }

    #[tokio::test]
    async fn test_value_at_rest_resolves_current_angle() {
        let widget = ready_widget().await;
        // Needle at 0 degrees: board angle 90, inside a real slice.
        let value = widget.value().await;
        assert!(["A", "B", "C", "D"].contains(&value.as_str()));
    }

    #[tokio::test]
    async fn test_empty_board_ignores_spin() {
        let mut widget = SpinnerWidget::new();
        let config: toml::Value = toml::from_str("labels = []").unwrap();
        widget.init(&config).await.unwrap();

        let reply = widget.handle_command("spin", &[]).await.unwrap();
        assert_eq!(reply, "busy");
        assert!(!widget.is_spinning());

        let value = widget.handle_command("value", &[]).await.unwrap();
        assert_eq!(value, UNKNOWN_LABEL);
    }

    #[tokio::test]
    async fn test_click_on_wheel_spins() {
        let mut widget = ready_widget().await;
        let notices = widget
            .handle_event(&HostEvent::Click {
                point: Point::new(150.0, 150.0),
            })
            .await
            .unwrap();
        assert_eq!(notices, vec![Notice::SpinStarted]);

        // Clicks outside the face do nothing.
        let mut other = ready_widget().await;
        let notices = other
            .handle_event(&HostEvent::Click {
                point: Point::new(400.0, 400.0),
            })
            .await
            .unwrap();
        assert!(notices.is_empty());
    }
}
