//! Timing
//!
//! The simulation clock and the fixed-period timer that drives neighbor
//! cache refreshes independently of the motion tick rate.

use flock_events::SimTimestamp;

use crate::config::RefreshConfig;

/// Tick counter and elapsed simulation time
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    tick: u64,
    elapsed: f64,
    last_delta: f32,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one motion tick of `delta_time` seconds
    pub fn advance(&mut self, delta_time: f32) {
        self.tick += 1;
        self.elapsed += f64::from(delta_time);
        self.last_delta = delta_time;
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Seconds covered by the most recent tick
    pub fn delta_time(&self) -> f32 {
        self.last_delta
    }

    pub fn timestamp(&self) -> SimTimestamp {
        SimTimestamp::new(self.tick, self.elapsed)
    }
}

/// Fixed-period timer for neighbor cache refreshes
#[derive(Debug, Clone)]
pub struct RefreshSchedule {
    /// Simulation time of the next refresh
    next_due: f64,
    /// Interval between refreshes (in seconds), always positive
    period: f64,
}

impl RefreshSchedule {
    /// Non-positive or NaN periods are raised to the smallest positive value.
    pub fn new(initial_delay: f64, period: f64) -> Self {
        Self {
            next_due: initial_delay,
            period: period.max(f64::MIN_POSITIVE),
        }
    }

    pub fn from_config(config: &RefreshConfig) -> Self {
        Self::new(config.initial_delay, config.period)
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn next_due(&self) -> f64 {
        self.next_due
    }

    pub fn is_due(&self, now: f64) -> bool {
        now >= self.next_due
    }

    /// Move the timer past `now`.
    ///
    /// A long frame can cross several periods; they collapse into the one
    /// refresh just performed. Returns how many periods were skipped.
    pub fn advance(&mut self, now: f64) -> u64 {
        if self.next_due > now {
            return 0;
        }
        let crossed = ((now - self.next_due) / self.period).floor() + 1.0;
        self.next_due += crossed * self.period;
        if self.next_due <= now {
            // Period below the float resolution at `now`
            self.next_due = now + self.period.max(now.abs() * f64::EPSILON);
        }
        (crossed as u64).saturating_sub(1)
    }
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        Self::from_config(&RefreshConfig::default())
    }
}
