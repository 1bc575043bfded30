//! Time source for the store.
//!
//! Everything that depends on "now" or on the local calendar day (task
//! creation timestamps, overdue and due-today checks, relative seed dates)
//! reads it from a [`Clock`], so tests can pin the date and timezone.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::models::Task;
use crate::timezone::{detect_system_timezone, local_date};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Timezone used to turn instants into calendar dates.
    fn timezone(&self) -> Tz;

    fn today(&self) -> NaiveDate {
        local_date(self.now(), &self.timezone())
    }

    fn calendar(&self) -> Today {
        Today::new(self.today(), self.timezone())
    }
}

/// The current local calendar day, used by date-relative queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Today {
    pub date: NaiveDate,
    pub tz: Tz,
}

impl Today {
    pub fn new(date: NaiveDate, tz: Tz) -> Self {
        Self { date, tz }
    }

    pub fn is_overdue(&self, task: &Task) -> bool {
        task.is_overdue(self.date, &self.tz)
    }

    pub fn is_due_today(&self, task: &Task) -> bool {
        task.is_due_on(self.date, &self.tz)
    }
}

/// Wall clock in a fixed timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Wall clock in the detected system timezone.
    pub fn local() -> Self {
        Self::new(detect_system_timezone())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::local()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn timezone(&self) -> Tz {
        self.tz
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    tz: Tz,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, tz: Tz) -> Self {
        Self { now, tz }
    }

    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Tz::UTC)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn timezone(&self) -> Tz {
        self.tz
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn timezone(&self) -> Tz {
        (**self).timezone()
    }
}
