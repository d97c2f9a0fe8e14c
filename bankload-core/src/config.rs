use crate::{DEFAULT_SPAWN_RATE, DEFAULT_USERS, DEFAULT_WAIT_TIME_MAX, DEFAULT_WAIT_TIME_MIN};
use rand::Rng;
use std::num::{NonZeroU32, NonZeroUsize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Wait time lower bound {min:?} exceeds upper bound {max:?}")]
pub struct InvalidWaitTime {
    pub min: Duration,
    pub max: Duration,
}

/// Pause taken by a virtual user after every task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitTime {
    min: Duration,
    max: Duration,
}

impl WaitTime {
    /// Uniformly distributed wait in `[min, max]`.
    pub fn between(min: Duration, max: Duration) -> Result<Self, InvalidWaitTime> {
        if min > max {
            return Err(InvalidWaitTime { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn constant(wait: Duration) -> Self {
        Self {
            min: wait,
            max: wait,
        }
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

impl Default for WaitTime {
    fn default() -> Self {
        Self {
            min: DEFAULT_WAIT_TIME_MIN,
            max: DEFAULT_WAIT_TIME_MAX,
        }
    }
}

/// How a virtual user picks its next task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TaskOrder {
    /// Random pick proportional to each task's weight.
    #[default]
    Weighted,
    /// Tasks run in declaration order, wrapping around. Weights are ignored.
    Sequential,
}

#[doc(hidden)]
#[derive(Clone, Debug)]
pub struct ScenarioConfig {
    pub name: String,
    pub users: NonZeroUsize,
    pub spawn_rate: f64,
    pub duration: Option<Duration>,
    /// Tasks each virtual user runs before stopping.
    pub iterations: Option<u64>,
    pub wait_time: WaitTime,
    pub max_tps: Option<NonZeroU32>,
}

impl ScenarioConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            users: DEFAULT_USERS,
            spawn_rate: DEFAULT_SPAWN_RATE,
            duration: None,
            iterations: None,
            wait_time: WaitTime::default(),
            max_tps: None,
        }
    }

    /// Delay before the user with the given index is started, `None` when
    /// the spawn rate is too low for the delay to fit in a [`Duration`].
    pub fn spawn_delay(&self, user_index: usize) -> Option<Duration> {
        if user_index == 0 || self.spawn_rate == f64::INFINITY {
            return Some(Duration::ZERO);
        }
        Duration::try_from_secs_f64(user_index as f64 / self.spawn_rate).ok()
    }

    pub fn has_stop_condition(&self) -> bool {
        self.duration.is_some() || self.iterations.is_some()
    }
}
