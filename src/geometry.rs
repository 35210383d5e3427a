use std::f64::consts::{FRAC_PI_2, TAU};

use crate::config::Hand;

/// Surface coordinates, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

// ============================================================================
// TIME OF DAY
// ============================================================================

/// Wall-clock time as shown by the hands. `hour` runs 0-23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockTime {
    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    pub fn from_timelike(time: &impl chrono::Timelike) -> Self {
        Self::new(time.hour(), time.minute(), time.second())
    }

    /// Hand angle in radians, 0 at 12 o'clock, growing clockwise.
    ///
    /// Hands jump a whole unit at a time; the minute hand does not creep
    /// with the seconds.
    pub fn angle(&self, hand: Hand) -> f64 {
        match hand {
            Hand::Hours => (self.hour % 12) as f64 * (TAU / 12.0),
            Hand::Minutes => self.minute as f64 * (TAU / 60.0),
            Hand::Seconds => self.second as f64 * (TAU / 60.0),
        }
    }
}

// ============================================================================
// RENDER STATE
// ============================================================================

/// Viewport size and the clock radius derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    width: u32,
    height: u32,
    clock_radius: f64,
}

impl RenderState {
    pub fn new(width: u32, height: u32, radius_percent: f64) -> Self {
        let mut state = Self {
            width: 0,
            height: 0,
            clock_radius: 0.0,
        };
        state.resize(width, height, radius_percent);
        state
    }

    /// Applies a new viewport size; the radius is always
    /// `min(width, height) * radius_percent / 100`.
    pub fn resize(&mut self, width: u32, height: u32, radius_percent: f64) {
        self.width = width;
        self.height = height;
        self.clock_radius = width.min(height) as f64 * (radius_percent / 100.0);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// False while the viewport is collapsed, e.g. a minimized window.
    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn clock_radius(&self) -> f64 {
        self.clock_radius
    }

    pub fn center(&self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Pixel length of a hand sized `size_percent` of the clock radius.
    pub fn hand_length(&self, size_percent: f64) -> f64 {
        (size_percent / 100.0) * self.clock_radius
    }

    /// End point of a hand at `angle` (0 = 12 o'clock, clockwise).
    pub fn hand_end(&self, angle: f64, size_percent: f64) -> Point {
        let length = self.hand_length(size_percent);
        let rotated = FRAC_PI_2 - angle;
        let center = self.center();
        Point::new(
            center.x + rotated.cos() * length,
            // surface y axis points down
            center.y - rotated.sin() * length,
        )
    }

    /// Stroke width for a configured thickness. Keeps hands proportional to
    /// the clock whatever the radius percentage.
    pub fn stroke_width(&self, thickness: f64, radius_percent: f64) -> f64 {
        thickness / (1000.0 * (radius_percent / 100.0)) * self.clock_radius
    }
}
