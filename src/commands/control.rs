//! Handler for the start, stop, toggle, reset and clear subcommands.

use log::{debug, info};

use crate::clock::Clock;
use crate::errors::*;
use crate::storage::Store;

/// Starts timer `name`, creating it if necessary.
///
/// Returns an error if the timer is already running.
pub fn start<C: Clock + ?Sized>(store: &Store, name: &str, clock: &C) -> Result<()> {
    let mut timer = store.load(name, false)?;
    debug!("Starting timer '{}'", name);
    timer.start(clock)?;
    store.dump(&timer, name)?;
    info!("Started timer '{}'", name);
    Ok(())
}

/// Stops timer `name` and returns its elapsed time for printing.
pub fn stop<C: Clock + ?Sized>(store: &Store, name: &str, clock: &C) -> Result<String> {
    let mut timer = store.load(name, false)?;
    debug!("Stopping timer '{}'", name);
    timer.stop(clock)?;
    store.dump(&timer, name)?;
    debug!("Timer '{}' stopped: {}", name, timer.full(clock));
    Ok(timer.elapsed_string(clock))
}

/// Stops a running timer, starts a stopped one.
///
/// Returns the elapsed time if the timer got stopped.
pub fn toggle<C: Clock + ?Sized>(store: &Store, name: &str, clock: &C) -> Result<Option<String>> {
    let mut timer = store.load(name, false)?;
    debug!("Toggling timer '{}'", name);
    let stopped = timer.toggle(clock);
    store.dump(&timer, name)?;
    debug!("Timer '{}' toggled: {}", name, timer.full(clock));
    if stopped {
        Ok(Some(timer.elapsed_string(clock)))
    } else {
        info!("Started timer '{}'", name);
        Ok(None)
    }
}

/// Sets timer `name` back to zero.
pub fn reset(store: &Store, name: &str) -> Result<()> {
    let mut timer = store.load(name, false)?;
    debug!("Resetting timer '{}'", name);
    timer.reset();
    store.dump(&timer, name)?;
    info!("Reset timer '{}'", name);
    Ok(())
}

/// Removes timer `name`, or every timer if `name` is `None`.
pub fn clear(store: &Store, name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => {
            store.clear(name)?;
            info!("Cleared timer '{}'", name);
        }
        None => {
            debug!("Clearing all timers in {:?}", store.dir());
            store.clear_all()?;
            info!("Cleared all timers");
        }
    }
    Ok(())
}
