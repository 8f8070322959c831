//! grabshot CLI entry point.

mod alias;
mod args;
mod capture;
mod clipboard;
mod deps;
mod dialog;
mod dispatch;
mod display;
mod notify;
mod system;

use grabshot_core::tools::PathLocator;
use grabshot_core::{Environment, Error};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::args::{Action, Parsed};
use crate::dispatch::{dispatch, Terminal};
use crate::system::{Context, ProcessRunner};

fn main() {
    // Logs go to stderr; stdout is reserved for usage and command output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let code = match args::parse(std::env::args_os()) {
        Parsed::Help => {
            println!("{}", args::usage());
            0
        }
        Parsed::Run(action) => run(action),
        Parsed::Info(text) => {
            print!("{}", text);
            0
        }
        Parsed::Invalid(err) => {
            eprintln!("Error: {}", err);
            eprintln!();
            eprintln!("{}", args::usage());
            err.exit_code()
        }
    };

    std::process::exit(code);
}

/// Run an action against the real environment and return the exit status.
fn run(action: Action) -> i32 {
    let env = Environment::from_process();
    let locator = PathLocator::new(env.search_path.as_deref());
    let runner = ProcessRunner;
    let ctx = Context::new(&env, &locator, &runner);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    let mut term = Terminal {
        input: &mut input,
        out: &mut out,
    };

    match dispatch(&ctx, action, &mut term) {
        Ok(()) => 0,
        Err(e) => match e.downcast_ref::<Error>() {
            Some(err) => {
                debug!("{:?}", err);
                eprintln!("Error: {}", err);
                eprintln!("hint: {}", err.suggestion());
                err.exit_code()
            }
            None => {
                eprintln!("Error: {:#}", e);
                1
            }
        },
    }
}
