use serde::{Deserialize, Serialize};

/// The simulated day/night clock.
///
/// One real second advances the clock by `time_speed` simulated minutes.
/// After every update the state is normalized so `minute` stays below 60,
/// `hour` below 24, and `day` only ever grows. The lighting projection in
/// [`crate::lighting`] is a pure function of this state and is recomputed
/// every tick so light changes stay continuous.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldClock {
    day: u32,
    hour: u32,
    minute: f64,
    time_speed: f64,
}

impl WorldClock {
    /// Create a clock at the given day and fractional hour.
    ///
    /// `start_hour` outside `0.0..24.0` is wrapped; `start_day` below 1 is
    /// raised to 1.
    pub fn new(start_day: u32, start_hour: f64, time_speed: f64) -> Self {
        let wrapped = if start_hour.is_finite() {
            start_hour.rem_euclid(24.0)
        } else {
            0.0
        };
        let hour = wrapped.floor();
        Self {
            day: start_day.max(1),
            hour: hour as u32,
            minute: (wrapped - hour) * 60.0,
            time_speed: if time_speed.is_finite() && time_speed > 0.0 {
                time_speed
            } else {
                1.0
            },
        }
    }

    /// Advance by `delta_real_secs` real seconds, adding
    /// `delta × time_speed` simulated minutes and normalizing rollovers.
    /// Negative or non-finite deltas are ignored so the day stays monotonic.
    pub fn advance(&mut self, delta_real_secs: f64) {
        if !delta_real_secs.is_finite() || delta_real_secs <= 0.0 {
            return;
        }
        self.minute += delta_real_secs * self.time_speed;
        if self.minute >= 60.0 {
            // The carry can dwarf u32 for an enormous single advance, so it
            // is folded through u64 and the day saturates instead of
            // overflowing.
            let carry_hours = (self.minute / 60.0).floor();
            self.minute = self.minute.rem_euclid(60.0);
            let hours = (carry_hours as u64).saturating_add(u64::from(self.hour));
            self.day = self
                .day
                .saturating_add(u32::try_from(hours / 24).unwrap_or(u32::MAX));
            self.hour = (hours % 24) as u32;
        }
    }

    /// Current in-world day, 1-based.
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Current whole hour of day, `0..24`.
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Current minute within the hour, `0.0..60.0`.
    pub fn minute(&self) -> f64 {
        self.minute
    }

    /// Simulated minutes per real second.
    pub fn time_speed(&self) -> f64 {
        self.time_speed
    }

    /// Fractional hour of day, `0.0..24.0`. Drives lighting and activity
    /// selection.
    pub fn fractional_hour(&self) -> f64 {
        f64::from(self.hour) + self.minute / 60.0
    }

    /// Simulated seconds that pass per real second.
    pub fn sim_seconds_per_real_second(&self) -> f64 {
        self.time_speed * 60.0
    }

    /// Snapshot of the displayed time.
    pub fn readout(&self) -> ClockReadout {
        ClockReadout {
            day: self.day,
            hour: self.hour as u8,
            minute: self.minute.floor() as u8,
        }
    }
}

/// Human-readable clock state for UI display.
///
/// The orchestrator refreshes the exposed readout only when the displayed
/// minute changes, so hosts re-render their clock widget at minute cadence
/// rather than every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockReadout {
    /// In-world day, 1-based.
    pub day: u32,
    /// Whole hour of day, `0..24`.
    pub hour: u8,
    /// Whole minute within the hour, `0..60`.
    pub minute: u8,
}

impl std::fmt::Display for ClockReadout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "day {} {:02}:{:02}", self.day, self.hour, self.minute)
    }
}
