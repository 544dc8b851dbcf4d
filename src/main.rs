use clap::CommandFactory;
use color_eyre::eyre::WrapErr;
use env_logger::Env;
use log::debug;
use std::path::PathBuf;

use stoppuhr::commands::{control, stats};
use stoppuhr::location::{Location, APP_NAME};
use stoppuhr::storage::Store;
use stoppuhr::{SystemClock, TimerError, DEFAULT_TIMER_NAME};

mod clap_cli;
use clap_cli::{Cli, Commands, Parser};

/// Resolve and create the directories, `storage` replaces the cache directory.
fn open_store(storage: Option<PathBuf>) -> color_eyre::Result<Store> {
    let mut location = Location::resolve()?;
    if let Some(storage) = storage {
        location = location.with_cache_dir(storage);
    }
    location
        .ensure()
        .wrap_err("Couldn't prepare the timer directories")?;
    debug!("Timers are stored in {:?}", location.cache_dir);
    Ok(location.store())
}

fn run() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
    color_eyre::install()?;

    let clock = SystemClock;
    match cli.command {
        Commands::Start(timer) => {
            let store = open_store(cli.storage)?;
            control::start(&store, &timer.name, &clock)
                .wrap_err_with(|| format!("Couldn't start timer '{}'", timer.name))?;
        }
        Commands::Stop(timer) => {
            let store = open_store(cli.storage)?;
            let elapsed = control::stop(&store, &timer.name, &clock)
                .wrap_err_with(|| format!("Couldn't stop timer '{}'", timer.name))?;
            println!("{}", elapsed);
        }
        Commands::Toggle(timer) => {
            let store = open_store(cli.storage)?;
            let elapsed = control::toggle(&store, &timer.name, &clock)
                .wrap_err_with(|| format!("Couldn't toggle timer '{}'", timer.name))?;
            if let Some(elapsed) = elapsed {
                println!("{}", elapsed);
            }
        }
        Commands::Reset(timer) => {
            let store = open_store(cli.storage)?;
            control::reset(&store, &timer.name)
                .wrap_err_with(|| format!("Couldn't reset timer '{}'", timer.name))?;
        }
        Commands::Show { name, full } => {
            let store = open_store(cli.storage)?;
            let shown = stats::show(&store, &name.name, full, &clock)
                .wrap_err_with(|| format!("Couldn't show timer '{}'", name.name))?;
            println!("{}", shown);
        }
        Commands::List { full } => {
            let store = open_store(cli.storage)?;
            match stats::list(&store, full, &clock).wrap_err("Couldn't list timers")? {
                Some(list) => print!("{}", list),
                None => eprintln!("No timers found"),
            }
        }
        Commands::Clear { name, all } => {
            let store = open_store(cli.storage)?;
            if all {
                control::clear(&store, None).wrap_err("Couldn't clear all timers")?;
            } else {
                let name = name.as_deref().unwrap_or(DEFAULT_TIMER_NAME);
                control::clear(&store, Some(name))
                    .wrap_err_with(|| format!("Couldn't clear timer '{}'", name))?;
            }
        }
        Commands::Version { full } => match full {
            true => println!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION")),
            false => println!("{}", env!("CARGO_PKG_VERSION")),
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), APP_NAME, &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() -> color_eyre::Result<()> {
    if let Err(e) = run() {
        if let Some(inner) = e.downcast_ref::<TimerError>() {
            match e.to_string() == inner.to_string() {
                true => log::error!("{}", inner),
                false => log::error!("{}: {}", e, inner),
            }
            std::process::exit(1);
        } else {
            Err(e)
        }
    } else {
        Ok(())
    }
}
