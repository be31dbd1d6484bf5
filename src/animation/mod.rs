use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Fixed-duration animation timeline.
#[derive(Debug, Clone)]
pub struct Timeline {
    duration: Duration,
}

impl Timeline {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Get progress (0.0 to 1.0) at given elapsed time.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.as_millis() == 0 {
            return 1.0;
        }
        (elapsed.as_millis() as f32 / self.duration.as_millis() as f32).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Easing functions for smooth animations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EasingFunction {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseOutCubic,
    EaseOutBounce,
}

impl EasingFunction {
    /// Create easing function from string name, falling back to ease-in-out
    /// for anything unrecognized.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "linear" => EasingFunction::Linear,
            "easein" | "ease-in" => EasingFunction::EaseIn,
            "easeout" | "ease-out" => EasingFunction::EaseOut,
            "easeinout" | "ease-in-out" => EasingFunction::EaseInOut,
            "easeoutcubic" | "ease-out-cubic" => EasingFunction::EaseOutCubic,
            "easeoutbounce" | "ease-out-bounce" | "bounce" => EasingFunction::EaseOutBounce,
            _ => EasingFunction::EaseInOut,
        }
    }

    /// Apply easing to a progress value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseIn => t * t,
            EasingFunction::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseOutBounce => bounce_out(t),
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        n1 * (t - 1.5 / d1) * (t - 1.5 / d1) + 0.75
    } else if t < 2.5 / d1 {
        n1 * (t - 2.25 / d1) * (t - 2.25 / d1) + 0.9375
    } else {
        n1 * (t - 2.625 / d1) * (t - 2.625 / d1) + 0.984375
    }
}

/// A bounded point-to-point animation with a single terminal transition.
/// Once started it runs to completion; `advance` latches `done` and freezes
/// the position on the destination.
#[derive(Debug, Clone)]
pub struct Slide {
    from: Point,
    to: Point,
    timeline: Timeline,
    easing: EasingFunction,
    elapsed: Duration,
    position: Point,
    done: bool,
}

impl Slide {
    pub fn new(from: Point, to: Point, duration: Duration, easing: EasingFunction) -> Self {
        Self {
            from,
            to,
            timeline: Timeline::new(duration),
            easing,
            elapsed: Duration::ZERO,
            position: from,
            done: false,
        }
    }

    /// Advance by an elapsed-time delta. Returns the current position and
    /// whether the slide just reached (or had already reached) its end.
    pub fn advance(&mut self, delta: Duration) -> (Point, bool) {
        if self.done {
            return (self.position, true);
        }

        self.elapsed += delta;
        let progress = self.easing.apply(self.timeline.progress(self.elapsed));
        self.position = Point::new(
            self.from.x + (self.to.x - self.from.x) * progress as f64,
            self.from.y + (self.to.y - self.from.y) * progress as f64,
        );

        if self.timeline.is_complete(self.elapsed) {
            self.position = self.to;
            self.done = true;
        }

        (self.position, self.done)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn destination(&self) -> Point {
        self.to
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}
