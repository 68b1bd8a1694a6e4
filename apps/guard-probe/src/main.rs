use std::panic;

use anyhow::Result;
use clap::{Parser, Subcommand};
use neoguard_core::{ensure_init, nothrow_scope, or_exit, GuardConfig};
use neoguard_logging::ConsoleLoggerConfig;

#[derive(Debug, Parser)]
#[command(name = "guard-probe", version, about = "Runs NewEngine debug guards on demand")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Guard a null raw pointer. Aborts when pointer checks are active.
    NullPointer,
    /// Guard a live boxed value.
    ValidPointer,
    /// Run a fallible step that succeeds.
    Succeed,
    /// Run a fallible step that fails with MESSAGE.
    Fail { message: String },
    /// Panic inside a nothrow scope.
    Escape,
    /// Print the guard settings this binary was built with.
    Config,
}

struct Device {
    id: u32,
}

/// Every evaluation leaves a mark on stderr so callers can count them.
fn step(outcome: Result<(), String>) -> Result<(), String> {
    eprintln!("evaluated");
    outcome
}

fn escape() {
    let outcome = panic::catch_unwind(|| {
        nothrow_scope!("guard-probe::escape");
        panic!("escape requested");
    });

    if outcome.is_err() {
        println!("intercepted");
    }
}

fn main() -> Result<()> {
    neoguard_logging::init(&ConsoleLoggerConfig::from_env())?;
    let cli = Cli::parse();
    log::debug!("running {:?}", cli.command);

    match cli.command {
        Command::NullPointer => {
            let device: *const Device = std::ptr::null();
            ensure_init!(device);
            println!("unchecked");
        }
        Command::ValidPointer => {
            let device = Box::new(Device { id: 7 });
            ensure_init!(device);
            log::info!("device {} initialised", device.id);
            println!("initialised");
        }
        Command::Succeed => or_exit!(step(Ok(()))),
        Command::Fail { message } => or_exit!(step(Err(message))),
        Command::Escape => escape(),
        Command::Config => print!("{}", GuardConfig::current().to_toml()?),
    }

    Ok(())
}
