//! Model of a single stopwatch.
//!
//! A timer accumulates the time of all finished runs in `total`. While it is
//! running, `start` holds the instant the current run began and `end` is
//! unset. Stopping sets `end` and folds the run into `total`; the last
//! `(start, end)` pair is kept around for display until the next start.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use serde::{Deserialize, Deserializer, Serialize};

use std::fmt;

use crate::clock::Clock;
use crate::errors::*;

/// Unix timestamp of `0001-01-01T00:00:00Z`.
///
/// Older timer files mark an unset instant with this value instead of `null`.
/// No real run ever starts at that moment, so it is read as "unset".
const ZERO_INSTANT_SECS: i64 = -62_135_596_800;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    total: Duration,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            total: Duration::zero(),
            start: None,
            end: None,
        }
    }
}

impl Timer {
    /// A timer that has never been started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a timer from its raw parts.
    ///
    /// Rejects a negative total, an `end` without `start` and the zero
    /// instant, which is reserved for "unset" in stored files.
    pub fn from_parts(
        total: Duration,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        if total < Duration::zero() {
            return Err(TimerError::Invalid(format!(
                "accumulated time {} is negative",
                total
            )));
        }
        if start.is_none() && end.is_some() {
            return Err(TimerError::Invalid(
                "end instant is set but start instant is not".to_string(),
            ));
        }
        if start.into_iter().chain(end).any(is_zero_instant) {
            return Err(TimerError::Invalid(
                "0001-01-01T00:00:00Z marks an unset instant".to_string(),
            ));
        }
        Ok(Self { total, start, end })
    }

    /// Time of all completed runs.
    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub fn is_running(&self) -> bool {
        self.start.is_some() && self.end.is_none()
    }

    /// Start a new run. Fails if the timer is already running.
    pub fn start<C: Clock + ?Sized>(&mut self, clock: &C) -> Result<()> {
        if self.is_running() {
            return Err(TimerError::AlreadyRunning);
        }
        self.open(clock.now());
        Ok(())
    }

    /// Stop the current run and add its length to the total.
    ///
    /// Returns the length of the run that just ended.
    pub fn stop<C: Clock + ?Sized>(&mut self, clock: &C) -> Result<Duration> {
        match (self.start, self.end) {
            (Some(start), None) => Ok(self.close(start, clock.now())),
            _ => Err(TimerError::NotRunning),
        }
    }

    /// Stop a running timer or start a stopped one.
    ///
    /// Returns `true` if the timer was stopped by this call.
    pub fn toggle<C: Clock + ?Sized>(&mut self, clock: &C) -> bool {
        match (self.start, self.end) {
            (Some(start), None) => {
                self.close(start, clock.now());
                true
            }
            _ => {
                self.open(clock.now());
                false
            }
        }
    }

    /// Back to the state of a timer that was never started.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Length of the current run while running, the accumulated total otherwise.
    pub fn elapsed<C: Clock + ?Sized>(&self, clock: &C) -> Duration {
        match (self.start, self.end) {
            (Some(start), None) => clock.now().signed_duration_since(start),
            _ => self.total,
        }
    }

    pub fn elapsed_string<C: Clock + ?Sized>(&self, clock: &C) -> String {
        format_elapsed(self.elapsed(clock))
    }

    /// Display the last run together with the elapsed time.
    pub fn full<'a, C: Clock + ?Sized>(&'a self, clock: &'a C) -> Full<'a, C> {
        Full { timer: self, clock }
    }

    fn open(&mut self, now: DateTime<Utc>) {
        self.start = Some(now);
        self.end = None;
    }

    fn close(&mut self, start: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
        let run = now.signed_duration_since(start);
        let run = if run < Duration::zero() {
            log::warn!("Clock went backwards since {}, counting this run as 0s", start);
            Duration::zero()
        } else {
            run
        };
        self.end = Some(now);
        self.total = self.total + run;
        run
    }
}

/// Round to milliseconds and print like `1h 2m 3s 500ms`.
///
/// Negative durations are printed as `0s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let elapsed = elapsed.to_std().unwrap_or_default();
    let millis = (elapsed.as_nanos() + 500_000) / 1_000_000;
    let rounded = std::time::Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX));
    humantime::format_duration(rounded).to_string()
}

pub struct Full<'a, C: ?Sized> {
    timer: &'a Timer,
    clock: &'a C,
}

impl<C: Clock + ?Sized> fmt::Display for Full<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} -- {}) -> {}",
            Instant(self.timer.start),
            Instant(self.timer.end),
            self.timer.elapsed_string(self.clock)
        )
    }
}

struct Instant(Option<DateTime<Utc>>);

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(i) => write!(f, "{}", i.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => write!(f, "-"),
        }
    }
}

/// On-disk shape of a timer, `total` in nanoseconds.
#[derive(Serialize, Deserialize)]
struct TimerRecord {
    #[serde(default)]
    total: i64,
    #[serde(default, deserialize_with = "instant_or_zero")]
    start: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "instant_or_zero")]
    end: Option<DateTime<Utc>>,
}

fn instant_or_zero<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let instant = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(instant.filter(|i| !is_zero_instant(*i)))
}

fn is_zero_instant(instant: DateTime<Utc>) -> bool {
    instant.timestamp() == ZERO_INSTANT_SECS && instant.timestamp_subsec_nanos() == 0
}

impl TryFrom<&Timer> for TimerRecord {
    type Error = TimerError;

    fn try_from(timer: &Timer) -> Result<Self> {
        let total = timer.total.num_nanoseconds().ok_or_else(|| {
            TimerError::Invalid(format!("{} does not fit into nanoseconds", timer.total))
        })?;
        Ok(Self {
            total,
            start: timer.start,
            end: timer.end,
        })
    }
}

impl TryFrom<TimerRecord> for Timer {
    type Error = TimerError;

    fn try_from(record: TimerRecord) -> Result<Self> {
        Timer::from_parts(
            Duration::nanoseconds(record.total),
            record.start,
            record.end,
        )
    }
}

impl Serialize for Timer {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        TimerRecord::try_from(self)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Timer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = TimerRecord::deserialize(deserializer)?;
        Timer::try_from(record).map_err(serde::de::Error::custom)
    }
}
