use std::any::Any;

use chrono::{DateTime, Utc};

use crate::State;

/// The frame clock, stored as a state so tests can pin it.
///
/// The app calls [`Time::tick`] once per frame; everything that needs "now"
/// (notice expiry, timestamps) reads this state instead of calling
/// `Utc::now()` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time(DateTime<Utc>);

impl Default for Time {
    fn default() -> Self {
        Self(Utc::now())
    }
}

impl Time {
    pub fn tick(&mut self) {
        self.0 = Utc::now();
    }

    pub fn set(&mut self, now: DateTime<Utc>) {
        self.0 = now;
    }
}

impl AsRef<DateTime<Utc>> for Time {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl State for Time {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(*self))
    }
}
