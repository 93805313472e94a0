//! Wall clock

use std::time::Duration;

use crate::domain::ports::Clock;

/// Clock that really sleeps the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
