//! Fixed-rate tick gate.

use std::thread;
use std::time::{Duration, Instant};

pub struct FixedClock {
    period: Duration,
    started: Instant,
    next_tick: Instant,
    ticks: u64,
    overruns: u64,
}

impl FixedClock {
    /// `rate` is in ticks per second and must be non-zero.
    pub fn new(rate: u32) -> Self {
        let period = Duration::from_secs(1) / rate.max(1);
        let now = Instant::now();
        Self {
            period,
            started: now,
            next_tick: now + period,
            ticks: 0,
            overruns: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ticks that finished after their deadline.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Block until the next tick boundary.  A tick that overran its slot
    /// does not get caught up; the schedule restarts from now.
    pub fn wait_for_next_tick(&mut self) {
        let now = Instant::now();
        if now < self.next_tick {
            thread::sleep(self.next_tick - now);
            self.next_tick += self.period;
        } else {
            self.overruns += 1;
            log::warn!(
                "Tick {} overran by {:.1}ms",
                self.ticks,
                (now - self.next_tick).as_secs_f64() * 1000.0
            );
            self.next_tick = now + self.period;
        }
        self.ticks += 1;
    }
}
