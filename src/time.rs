use chrono::Local;

use crate::geometry::ClockTime;

/// Where the clock reads the time from on every frame.
pub trait TimeSource {
    fn now(&self) -> ClockTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTime;

impl TimeSource for LocalTime {
    fn now(&self) -> ClockTime {
        ClockTime::from_timelike(&Local::now())
    }
}

/// Always reports the same time. Useful for screenshots and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTime(pub ClockTime);

impl TimeSource for FixedTime {
    fn now(&self) -> ClockTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_time_is_in_range() {
        let now = LocalTime.now();
        assert!(now.hour < 24);
        assert!(now.minute < 60);
        // leap seconds are folded into the nanosecond field by chrono
        assert!(now.second < 60);
    }

    #[test]
    fn fixed_time_does_not_move() {
        let source = FixedTime(ClockTime::new(3, 0, 0));
        assert_eq!(source.now(), source.now());
        assert_eq!(source.now(), ClockTime::new(3, 0, 0));
    }
}
