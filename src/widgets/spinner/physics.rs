use std::time::Duration;

use rand::Rng;

pub const FULL_CIRCLE: f64 = 360.0;

/// Minimum randomized launch speed, in revolution units per time unit.
const BASE_SPEED: f64 = 15.0;

/// Width of the uniform speed band above the base.
const VARIANT_SPEED: u32 = 10;

/// Guaranteed extra revolutions before the fractional approach to target.
const EXTRA_REVOLUTIONS: f64 = 2.0;

/// One kinematic time unit is 10ms of wall time.
const MILLIS_PER_TIME_UNIT: f64 = 10.0;

/// A decelerating angular-motion profile. Created with a randomized target,
/// advanced every tick until the needle settles exactly on target, then
/// frozen; `done` latches on the first terminal transition.
#[derive(Debug, Clone)]
pub struct SpinState {
    start_angle: f64,
    stop_angle: f64,
    speed: f64,
    acceleration: f64,
    distance: f64,
    revolution: f64,
    stop_time: f64,
    elapsed: Duration,
    current_angle: f64,
    done: bool,
}

impl SpinState {
    /// Launch a spin from the needle's current angle with a fresh random
    /// target. `revolution` is the travel length of one full turn.
    pub fn start(current_angle: f64, revolution: f64, rng: &mut impl Rng) -> Self {
        let speed = BASE_SPEED + rng.gen_range(0..VARIANT_SPEED) as f64;
        let stop_angle = rng.gen_range(0..FULL_CIRCLE as u32) as f64;
        Self::with_profile(current_angle, stop_angle, speed, revolution)
    }

    /// Deterministic profile, for callers (and tests) that fix the target.
    pub fn with_profile(start_angle: f64, stop_angle: f64, speed: f64, revolution: f64) -> Self {
        // Always at least two full revolutions plus the approach, so the
        // spin is perceptible no matter how close the target is.
        let distance = revolution * (EXTRA_REVOLUTIONS + stop_angle / FULL_CIRCLE);
        let acceleration = -(speed * speed) / (2.0 * distance);
        let stop_time = -speed / acceleration;

        Self {
            start_angle,
            stop_angle,
            speed,
            acceleration,
            distance,
            revolution,
            stop_time,
            elapsed: Duration::ZERO,
            current_angle: start_angle,
            done: false,
        }
    }

    /// Advance by an elapsed-time delta. Motion ends when the profile's
    /// stop time is reached or the remaining distance falls under one unit;
    /// the angle then snaps to the exact target and freezes.
    pub fn advance(&mut self, delta: Duration) -> (f64, bool) {
        if self.done {
            return (self.current_angle, true);
        }

        self.elapsed += delta;
        let t = self.elapsed.as_millis() as f64 / MILLIS_PER_TIME_UNIT;
        let travelled = self.speed * t + 0.5 * self.acceleration * t * t;

        if t >= self.stop_time || (self.distance - travelled).abs() < 1.0 {
            self.current_angle = self.target_angle();
            self.done = true;
            return (self.current_angle, true);
        }

        self.current_angle =
            (self.start_angle + FULL_CIRCLE * travelled / self.revolution).rem_euclid(FULL_CIRCLE);
        (self.current_angle, false)
    }

    /// Where the needle will rest.
    pub fn target_angle(&self) -> f64 {
        (self.start_angle + self.stop_angle).rem_euclid(FULL_CIRCLE)
    }

    pub fn current_angle(&self) -> f64 {
        self.current_angle
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Total duration of the profile in wall time.
    pub fn duration(&self) -> Duration {
        Duration::from_millis((self.stop_time * MILLIS_PER_TIME_UNIT) as u64)
    }
}
