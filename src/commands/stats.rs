//! Handler for the show and list subcommands.

use colored::*;
use log::debug;

use crate::clock::Clock;
use crate::errors::*;
use crate::storage::{NamedTimer, Store};
use crate::timer::Timer;

/// Renders timer `name`, which has to exist.
pub fn show<C: Clock + ?Sized>(store: &Store, name: &str, full: bool, clock: &C) -> Result<String> {
    let timer = store.load(name, true)?;
    debug!("Showing timer '{}', full: {}", name, full);
    Ok(render(&timer, full, clock))
}

/// Renders all timers, one per line. `None` if there are no timers.
pub fn list<C: Clock + ?Sized>(store: &Store, full: bool, clock: &C) -> Result<Option<String>> {
    debug!("Loading all timers from {:?}", store.dir());
    let timers = store.load_all()?;
    if timers.is_empty() {
        return Ok(None);
    }
    debug!("Listing {} timers", timers.len());
    Ok(Some(render_list(&timers, full, clock)))
}

fn render<C: Clock + ?Sized>(timer: &Timer, full: bool, clock: &C) -> String {
    if full {
        timer.full(clock).to_string()
    } else {
        timer.elapsed_string(clock)
    }
}

/// Names are right aligned, running timers are highlighted.
pub fn render_list<C: Clock + ?Sized>(timers: &[NamedTimer], full: bool, clock: &C) -> String {
    let width = timers
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(0);
    timers
        .iter()
        .map(|t| {
            let name = format!("{:>width$}", t.name, width = width);
            let name = if t.timer.is_running() {
                name.green().bold().to_string()
            } else {
                name
            };
            format!("{}: {}\n", name, render(&t.timer, full, clock))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{DateTime, Duration, Utc};

    fn moment(m: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(m)
            .expect("valid rfc3339")
            .with_timezone(&Utc)
    }

    fn named(name: &str, minutes: i64) -> NamedTimer {
        NamedTimer {
            name: name.to_string(),
            timer: Timer::from_parts(
                Duration::minutes(minutes),
                Some(moment("2025-03-11T11:00:00Z")),
                Some(moment("2025-03-11T11:05:00Z")),
            )
            .unwrap(),
        }
    }

    #[test]
    fn list_aligns_names() {
        colored::control::set_override(false);
        let clock = FixedClock(moment("2025-03-12T00:00:00Z"));
        let timers = vec![named("a", 1), named("longer", 5)];
        assert_eq!(render_list(&timers, false, &clock), "     a: 1m\nlonger: 5m\n");
        assert_eq!(
            render_list(&timers[..1], true, &clock),
            "a: (2025-03-11T11:00:00Z -- 2025-03-11T11:05:00Z) -> 1m\n"
        );
    }

    #[test]
    fn list_shows_running_elapsed() {
        colored::control::set_override(false);
        let mut timer = Timer::new();
        timer
            .start(&FixedClock(moment("2025-03-11T11:00:00Z")))
            .unwrap();
        let timers = vec![NamedTimer {
            name: "run".to_string(),
            timer,
        }];
        let clock = FixedClock(moment("2025-03-11T11:00:30Z"));
        assert_eq!(render_list(&timers, false, &clock), "run: 30s\n");
    }

    #[test]
    fn show_and_list_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        let clock = FixedClock(moment("2025-03-12T00:00:00Z"));

        assert!(matches!(
            show(&store, "missing", false, &clock),
            Err(TimerError::NotFound { .. })
        ));
        assert_eq!(list(&store, false, &clock).unwrap(), None);

        store.dump(&named("x", 3).timer, "x").unwrap();
        assert_eq!(show(&store, "x", false, &clock).unwrap(), "3m");
        assert_eq!(
            show(&store, "x", true, &clock).unwrap(),
            "(2025-03-11T11:00:00Z -- 2025-03-11T11:05:00Z) -> 3m"
        );
        assert!(list(&store, false, &clock)
            .unwrap()
            .expect("one timer")
            .contains("x: 3m"));
    }
}
