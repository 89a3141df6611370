use crate::timer::TIMER_HZ;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// How much work has come due since the last call to `Clock::advance`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Due {
    pub cycles: u32,
    pub ticks: u32,
}

/// Two independent schedules measured from the same start instant: one at
/// the instruction rate and one at the 60 Hz timer rate. Event k of a
/// schedule falls due at k / rate seconds, so neither drifts and neither
/// depends on the other.
#[derive(Debug, Clone)]
pub struct Clock {
    cycles: Schedule,
    ticks: Schedule,
}

#[derive(Debug, Clone)]
struct Schedule {
    rate: u32,
    done: u64,
}

impl Schedule {
    fn new(rate: u32) -> Self {
        Schedule {
            rate: rate.max(1),
            done: 0,
        }
    }

    fn events_by(&self, now: Duration) -> u64 {
        (now.as_nanos() * self.rate as u128 / NANOS_PER_SEC) as u64
    }

    /// Everything due by `now`. After a stall longer than a second the
    /// backlog is dropped down to one second's worth.
    fn take_due(&mut self, now: Duration) -> u32 {
        let target = self.events_by(now);
        let mut due = target.saturating_sub(self.done);
        if due > self.rate as u64 {
            due = self.rate as u64;
        }
        self.done = target;
        due as u32
    }

    fn next_at(&self) -> Duration {
        let nanos = (self.done as u128 + 1) * NANOS_PER_SEC / self.rate as u128;
        Duration::from_nanos(nanos as u64)
    }
}

impl Clock {
    pub fn new(cycles_per_second: u32) -> Self {
        Clock {
            cycles: Schedule::new(cycles_per_second),
            ticks: Schedule::new(TIMER_HZ),
        }
    }

    pub fn cycles_per_second(&self) -> u32 {
        self.cycles.rate
    }

    /// `now` is the time elapsed since the clock started
    pub fn advance(&mut self, now: Duration) -> Due {
        Due {
            cycles: self.cycles.take_due(now),
            ticks: self.ticks.take_due(now),
        }
    }

    /// how long to sleep before anything else is due
    pub fn until_next(&self, now: Duration) -> Duration {
        self.cycles
            .next_at()
            .min(self.ticks.next_at())
            .saturating_sub(now)
    }
}
