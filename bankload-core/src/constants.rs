use std::num::NonZeroUsize;
use std::time::Duration;

pub const DEFAULT_USERS: NonZeroUsize = unsafe { NonZeroUsize::new_unchecked(1) };

/// Users started per second while ramping up.
pub const DEFAULT_SPAWN_RATE: f64 = 1.0;

/// Lower bound of the default wait between two tasks of one virtual user.
pub const DEFAULT_WAIT_TIME_MIN: Duration = Duration::from_secs(1);

/// Upper bound of the default wait between two tasks of one virtual user.
pub const DEFAULT_WAIT_TIME_MAX: Duration = Duration::from_secs(3);
