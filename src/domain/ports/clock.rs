//! Clock port
//!
//! All waiting in a run (role settle delay, readiness polling) goes through
//! this trait so tests never sleep.

use std::time::Duration;

pub trait Clock {
    fn sleep(&self, duration: Duration);
}

impl<T: Clock + ?Sized> Clock for &T {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}
