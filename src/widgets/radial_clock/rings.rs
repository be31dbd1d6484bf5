use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::geometry::{Point, RegionMap, Size};

pub const FULL_CIRCLE: i32 = 360;

/// Milliseconds-of-second threshold past which the seconds ring blips.
const BLIP_MILLIS: u32 = 800;

/// Degrees pulled back from a ring just before its unit rolls over.
const BLIP_DEGREES: i32 = 2;

const SECONDS_IN_MINUTE: u32 = 60;
const MINUTES_IN_HOUR: u32 = 60;
const HOURS_IN_DAY: u32 = 24;
const DAYS_IN_WEEK: u32 = 7;
const MONTHS_IN_YEAR: u32 = 12;

/// One concentric ring of the clock face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    SecondOfMinute,
    MinuteOfHour,
    HourOfDay,
    DayOfWeek,
    DayOfMonth,
    DayOfYear,
    MonthOfYear,
}

impl TimeUnit {
    /// Display order, innermost ring first.
    pub const DISPLAY_ORDER: [TimeUnit; 7] = [
        TimeUnit::SecondOfMinute,
        TimeUnit::MinuteOfHour,
        TimeUnit::HourOfDay,
        TimeUnit::DayOfWeek,
        TimeUnit::DayOfMonth,
        TimeUnit::MonthOfYear,
        TimeUnit::DayOfYear,
    ];

    /// Tooltip text shown when a click lands on this unit's ring.
    pub fn description(&self) -> &'static str {
        match self {
            TimeUnit::SecondOfMinute => "Seconds Left In Minute",
            TimeUnit::MinuteOfHour => "Minutes Left In Hour",
            TimeUnit::HourOfDay => "Hours Left In Day",
            TimeUnit::DayOfWeek => "Days Left In Week",
            TimeUnit::DayOfMonth => "Days Left In Month",
            TimeUnit::DayOfYear => "Days Left In Year",
            TimeUnit::MonthOfYear => "Months Left In Year",
        }
    }

    /// Configuration key for this unit.
    pub fn config_name(&self) -> &'static str {
        match self {
            TimeUnit::SecondOfMinute => "seconds",
            TimeUnit::MinuteOfHour => "minutes",
            TimeUnit::HourOfDay => "hours",
            TimeUnit::DayOfWeek => "weekday",
            TimeUnit::DayOfMonth => "month_day",
            TimeUnit::DayOfYear => "year_day",
            TimeUnit::MonthOfYear => "month",
        }
    }

    pub fn from_config_name(name: &str) -> Option<TimeUnit> {
        TimeUnit::DISPLAY_ORDER
            .iter()
            .copied()
            .find(|u| u.config_name() == name)
    }
}

/// One unit's value within its cycle, plus its blip flag for this instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSample {
    pub unit: TimeUnit,
    pub value: u32,
    pub limit: u32,
    pub blip: bool,
}

/// All seven unit samples for one instant. Blip eligibility cascades from
/// the seconds ring upward: a coarser unit blips only while its parent blips
/// and the parent sits one step short of rollover, so rings notch together
/// exactly at a boundary.
#[derive(Debug, Clone)]
pub struct ClockSnapshot {
    samples: [UnitSample; 7],
}

impl ClockSnapshot {
    pub fn sample(now: NaiveDateTime) -> Self {
        let time = now.time();
        let date = now.date();

        let second = time.second();
        let minute = time.minute();
        let hour = time.hour();
        let weekday = date.weekday().number_from_monday();
        let day = date.day();
        let month = date.month();
        let n_days = days_in_month(date);

        let second_blip = time.nanosecond() / 1_000_000 > BLIP_MILLIS;
        let minute_blip = second_blip && second == SECONDS_IN_MINUTE - 1;
        let hour_blip = minute_blip && minute == MINUTES_IN_HOUR - 1;
        // Weekday, month-day, and year-day are siblings: all keyed off the
        // hour ring rolling over at midnight.
        let day_blip = hour_blip && hour == HOURS_IN_DAY - 1;
        let month_blip = day_blip && day == n_days;

        let make = |unit, value, limit, blip| UnitSample {
            unit,
            value,
            limit,
            blip,
        };

        Self {
            samples: [
                make(
                    TimeUnit::SecondOfMinute,
                    second,
                    SECONDS_IN_MINUTE,
                    second_blip,
                ),
                make(TimeUnit::MinuteOfHour, minute, MINUTES_IN_HOUR, minute_blip),
                make(TimeUnit::HourOfDay, hour, HOURS_IN_DAY, hour_blip),
                make(TimeUnit::DayOfWeek, weekday, DAYS_IN_WEEK, day_blip),
                make(TimeUnit::DayOfMonth, day, n_days, day_blip),
                make(TimeUnit::MonthOfYear, month, MONTHS_IN_YEAR, month_blip),
                make(
                    TimeUnit::DayOfYear,
                    date.ordinal(),
                    days_in_year(date),
                    day_blip,
                ),
            ],
        }
    }

    pub fn get(&self, unit: TimeUnit) -> UnitSample {
        // DISPLAY_ORDER and the samples array share their layout.
        self.samples[TimeUnit::DISPLAY_ORDER
            .iter()
            .position(|u| *u == unit)
            .unwrap_or(0)]
    }
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1);
    let next = NaiveDate::from_ymd_opt(next_year, next_month, 1);
    match (first, next) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 31,
    }
}

fn days_in_year(date: NaiveDate) -> u32 {
    if date.leap_year() {
        366
    } else {
        365
    }
}

/// An angular sweep for one ring: how far through its cycle the unit is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingSweep {
    pub unit: TimeUnit,
    pub sweep_deg: i32,
}

/// Sweep angles for the active units, in display order (innermost first).
/// A due blip pulls the sweep back, but only when there is room for it.
pub fn compute_angles(snapshot: &ClockSnapshot, active: &[TimeUnit]) -> Vec<RingSweep> {
    TimeUnit::DISPLAY_ORDER
        .iter()
        .filter(|u| active.contains(u))
        .map(|unit| {
            let sample = snapshot.get(*unit);
            let mut sweep =
                (sample.value as f64 / sample.limit as f64 * FULL_CIRCLE as f64) as i32;
            if sample.blip && sweep > BLIP_DEGREES {
                sweep -= BLIP_DEGREES;
            }
            RingSweep {
                unit: *unit,
                sweep_deg: sweep,
            }
        })
        .collect()
}

/// One ring's radial band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingBand {
    pub unit: TimeUnit,
    pub inner_radius: i32,
    pub thickness: i32,
}

/// Concentric ring placement for a surface, with the radius region table
/// used for click hit-testing.
#[derive(Debug, Clone)]
pub struct RingLayout {
    bands: Vec<RingBand>,
    regions: RegionMap<TimeUnit>,
    center: Point,
}

impl RingLayout {
    /// Lay out one equally thick ring per unit, outside-in. `units` is in
    /// display order (innermost first). The innermost ring starts at 20% of
    /// the smaller surface dimension and spacing is 1% of it (at least one
    /// pixel), so the rings fit the surface without overlapping.
    pub fn compute(units: &[TimeUnit], surface: Size) -> Self {
        let mut layout = Self {
            bands: Vec::new(),
            regions: RegionMap::new(),
            center: surface.center(),
        };

        let count = units.len() as i32;
        let side = surface.min_dimension();
        if count == 0 || side <= 0 {
            return layout;
        }

        let base = side / 100 * 20;
        let spacing = (side / 100).max(1);
        let thickness = (side / 2 - base - (count - 1) * spacing) / count;
        if thickness <= 0 {
            return layout;
        }

        let mut radius = (count - 1) * (thickness + spacing) + base;
        for unit in units.iter().rev() {
            layout.regions.insert(radius, *unit);
            layout.regions.insert(radius + thickness, *unit);
            layout.bands.push(RingBand {
                unit: *unit,
                inner_radius: radius,
                thickness,
            });
            radius -= thickness + spacing;
        }

        layout
    }

    /// Bands in paint order (outermost first).
    pub fn bands(&self) -> &[RingBand] {
        &self.bands
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Resolve a click to the ring it landed on. Clicks in the spacing
    /// between rings, inside the innermost ring, or beyond the outermost
    /// edge are misses.
    pub fn hit_test(&self, click: Point) -> Option<TimeUnit> {
        if self.regions.is_empty() {
            return None;
        }
        let dist = click.distance_to(self.center) as i32;
        self.regions.band_owner(dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 14)
            .unwrap()
            .and_hms_milli_opt(h, m, s, ms)
            .unwrap()
    }

    #[test]
    fn test_sweep_range_and_monotonic() {
        let mut last = -1;
        for s in 0..60 {
            let snapshot = ClockSnapshot::sample(at(10, 0, s, 0));
            let sweeps = compute_angles(&snapshot, &[TimeUnit::SecondOfMinute]);
            let sweep = sweeps[0].sweep_deg;
            assert!((0..=360).contains(&sweep));
            assert!(sweep >= last, "sweep must not decrease as value grows");
            last = sweep;
        }
    }

    #[test]
    fn test_blip_needs_parent_blip() {
        // Millis below threshold: nothing blips, regardless of the values.
        let snapshot = ClockSnapshot::sample(at(23, 59, 59, 500));
        for unit in TimeUnit::DISPLAY_ORDER {
            assert!(!snapshot.get(unit).blip);
        }

        // Seconds blip alone: second != 59 keeps every coarser unit quiet.
        let snapshot = ClockSnapshot::sample(at(12, 34, 56, 900));
        assert!(snapshot.get(TimeUnit::SecondOfMinute).blip);
        assert!(!snapshot.get(TimeUnit::MinuteOfHour).blip);
        assert!(!snapshot.get(TimeUnit::HourOfDay).blip);
        assert!(!snapshot.get(TimeUnit::DayOfWeek).blip);
    }

    #[test]
    fn test_blip_cascades_at_rollover() {
        // One tick before midnight: seconds through the day rings blip.
        let snapshot = ClockSnapshot::sample(at(23, 59, 59, 900));
        assert!(snapshot.get(TimeUnit::SecondOfMinute).blip);
        assert!(snapshot.get(TimeUnit::MinuteOfHour).blip);
        assert!(snapshot.get(TimeUnit::HourOfDay).blip);
        assert!(snapshot.get(TimeUnit::DayOfWeek).blip);
        assert!(snapshot.get(TimeUnit::DayOfMonth).blip);
        assert!(snapshot.get(TimeUnit::DayOfYear).blip);
        // May 14th is not the end of the month.
        assert!(!snapshot.get(TimeUnit::MonthOfYear).blip);
    }

    #[test]
    fn test_month_blips_on_last_day() {
        let now = NaiveDate::from_ymd_opt(2024, 5, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 900)
            .unwrap();
        let snapshot = ClockSnapshot::sample(now);
        assert!(snapshot.get(TimeUnit::MonthOfYear).blip);
    }

    #[test]
    fn test_reference_sweeps() {
        // 12:34:56.900 with seconds and minutes active: the seconds ring is
        // floor(56/60*360) = 336 minus the 2-degree blip; the minutes ring
        // is floor(34/60*360) = 204 with no blip.
        let snapshot = ClockSnapshot::sample(at(12, 34, 56, 900));
        let sweeps = compute_angles(
            &snapshot,
            &[TimeUnit::SecondOfMinute, TimeUnit::MinuteOfHour],
        );

        assert_eq!(sweeps.len(), 2);
        assert_eq!(sweeps[0].unit, TimeUnit::SecondOfMinute);
        assert_eq!(sweeps[0].sweep_deg, 334);
        assert_eq!(sweeps[1].unit, TimeUnit::MinuteOfHour);
        assert_eq!(sweeps[1].sweep_deg, 204);
    }

    #[test]
    fn test_layout_fits_surface() {
        let layout = RingLayout::compute(&TimeUnit::DISPLAY_ORDER, Size::new(400, 400));
        let bands = layout.bands();
        assert_eq!(bands.len(), 7);

        for band in bands {
            assert!(band.thickness > 0);
            assert!(band.inner_radius + band.thickness <= 200);
        }

        // Outermost first, strictly decreasing, non-overlapping.
        for pair in bands.windows(2) {
            assert!(pair[1].inner_radius + pair[1].thickness < pair[0].inner_radius);
        }
    }

    #[test]
    fn test_hit_test_inverts_layout_at_band_midpoints() {
        let layout = RingLayout::compute(&TimeUnit::DISPLAY_ORDER, Size::new(400, 400));
        let center = layout.center();

        for band in layout.bands() {
            let mid = band.inner_radius + band.thickness / 2;
            let click = Point::new(center.x + mid as f64, center.y);
            assert_eq!(layout.hit_test(click), Some(band.unit));
        }
    }

    #[test]
    fn test_hit_test_misses() {
        let layout = RingLayout::compute(&TimeUnit::DISPLAY_ORDER, Size::new(400, 400));
        let center = layout.center();

        // Dead center and far outside the face.
        assert_eq!(layout.hit_test(center), None);
        assert_eq!(layout.hit_test(Point::new(center.x + 199.0, center.y)), None);
    }

    #[test]
    fn test_degenerate_layout_is_empty() {
        let layout = RingLayout::compute(&[], Size::new(400, 400));
        assert!(layout.bands().is_empty());
        assert_eq!(layout.hit_test(Point::new(100.0, 100.0)), None);

        let layout = RingLayout::compute(&TimeUnit::DISPLAY_ORDER, Size::new(0, 0));
        assert!(layout.bands().is_empty());
    }
}
