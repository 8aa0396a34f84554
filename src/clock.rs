use std::cell::Cell;

use chrono::Utc;

/// Source of the current time as whole seconds since the Unix epoch.
///
/// The orchestrator captures its start timestamp from a `Clock` and hands the
/// same clock to the progress bar, so a run can be replayed against a fixed
/// time in tests.
pub trait Clock {
  fn now(&self) -> i64;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> i64 {
    Utc::now().timestamp()
  }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
  now: Cell<i64>,
}

impl FixedClock {
  pub fn new(now: i64) -> Self {
    Self { now: Cell::new(now) }
  }

  pub fn set(&self, now: i64) {
    self.now.set(now);
  }

  pub fn advance(&self, seconds: i64) {
    self.now.set(self.now.get() + seconds);
  }
}

impl Clock for FixedClock {
  fn now(&self) -> i64 {
    self.now.get()
  }
}

impl<C: Clock + ?Sized> Clock for &C {
  fn now(&self) -> i64 {
    (**self).now()
  }
}
