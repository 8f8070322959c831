//! CLI argument parsing with clap derive macros.
//!
//! Exactly one action flag is accepted. Anything clap rejects (unknown
//! flags, positional values, two actions at once) is reported as an invalid
//! option with exit status 1 rather than clap's default of 2.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, Parser};
use grabshot_core::Error;

/// Region screenshots for Wayland and X11 desktops.
///
/// Select a region with the mouse; the capture is saved under
/// ~/Pictures/Screenshots (or $GRABSHOT_DIR) and opened in an image viewer.
#[derive(Debug, Parser)]
#[command(name = "grabshot", version)]
#[command(group(
    ArgGroup::new("action")
        .args(["clipboard", "save", "where_to", "install", "deps"])
        .multiple(false)
))]
#[command(after_help = "\
Examples:
  grabshot -c          # Select a region and copy it to the clipboard
  grabshot --save      # Select a region and keep the file
  grabshot -w          # Select a region, then choose where to save it
  grabshot --deps      # Check which external tools are missing")]
pub struct Cli {
    /// Capture a region, copy it to the clipboard and open it
    #[arg(short, long)]
    pub clipboard: bool,

    /// Capture a region, save it and open it
    #[arg(short, long)]
    pub save: bool,

    /// Capture a region and pick where to save it
    #[arg(short = 'w', long = "where")]
    pub where_to: bool,

    /// Add a 'shot' alias to your shell configuration
    #[arg(short, long)]
    pub install: bool,

    /// Check that the required external tools are installed
    #[arg(short, long)]
    pub deps: bool,
}

/// What the invocation asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Clipboard,
    Save,
    Where,
    Install,
    Deps,
}

impl Cli {
    /// The selected action, or `None` when no flag was given.
    pub fn action(&self) -> Option<Action> {
        if self.clipboard {
            Some(Action::Clipboard)
        } else if self.save {
            Some(Action::Save)
        } else if self.where_to {
            Some(Action::Where)
        } else if self.install {
            Some(Action::Install)
        } else if self.deps {
            Some(Action::Deps)
        } else {
            None
        }
    }
}

/// Outcome of parsing the command line.
#[derive(Debug)]
pub enum Parsed {
    Run(Action),
    /// No action given; print usage.
    Help,
    /// Text clap rendered for `--help` or `--version`.
    Info(String),
    Invalid(Error),
}

/// Parse the full argv (program name first).
pub fn parse<I, T>(args: I) -> Parsed
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    match Cli::try_parse_from(&args) {
        Ok(cli) => cli.action().map_or(Parsed::Help, Parsed::Run),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Parsed::Info(e.to_string()),
            _ => Parsed::Invalid(Error::invalid_argument(offending_arg(&args))),
        },
    }
}

/// Usage text printed for help and after invalid options.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// The argument to blame: the first unrecognized one, or all of them when
/// each is valid on its own (e.g. two actions at once).
fn offending_arg(args: &[OsString]) -> String {
    let user_args: Vec<String> = args
        .iter()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    user_args
        .iter()
        .find(|a| !is_known_flag(a))
        .cloned()
        .unwrap_or_else(|| user_args.join(" "))
}

fn is_known_flag(arg: &str) -> bool {
    Cli::command().get_arguments().any(|a| {
        a.get_long().is_some_and(|l| arg.strip_prefix("--") == Some(l))
            || a.get_short().is_some_and(|s| arg == format!("-{}", s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(args: &[&str]) -> Action {
        let argv = std::iter::once("grabshot").chain(args.iter().copied());
        match parse(argv) {
            Parsed::Run(action) => action,
            other => panic!("Expected an action for {:?}, got {:?}", args, other),
        }
    }

    #[test]
    fn test_both_spellings_of_every_action() {
        let cases = [
            ("-c", "--clipboard", Action::Clipboard),
            ("-s", "--save", Action::Save),
            ("-w", "--where", Action::Where),
            ("-i", "--install", Action::Install),
            ("-d", "--deps", Action::Deps),
        ];
        for (short, long, expected) in cases {
            assert_eq!(action(&[short]), expected, "{}", short);
            assert_eq!(action(&[long]), expected, "{}", long);
        }
    }

    #[test]
    fn test_no_arguments_is_help() {
        assert!(matches!(parse(["grabshot"]), Parsed::Help));
    }

    #[test]
    fn test_help_flags_render_usage() {
        for flag in ["-h", "--help"] {
            match parse(["grabshot", flag]) {
                Parsed::Info(text) => assert!(text.contains("--clipboard"), "{}", text),
                other => panic!("Expected help for {}, got {:?}", flag, other),
            }
        }
    }

    #[test]
    fn test_unknown_flag_is_invalid() {
        match parse(["grabshot", "--bogus"]) {
            Parsed::Invalid(Error::InvalidArgument { arg }) => assert_eq!(arg, "--bogus"),
            other => panic!("Expected invalid argument, got {:?}", other),
        }
    }

    #[test]
    fn test_positional_value_is_invalid() {
        match parse(["grabshot", "-s", "extra"]) {
            Parsed::Invalid(Error::InvalidArgument { arg }) => assert_eq!(arg, "extra"),
            other => panic!("Expected invalid argument, got {:?}", other),
        }
    }

    #[test]
    fn test_two_actions_are_rejected() {
        match parse(["grabshot", "-c", "-s"]) {
            Parsed::Invalid(Error::InvalidArgument { arg }) => assert_eq!(arg, "-c -s"),
            other => panic!("Expected invalid argument, got {:?}", other),
        }
    }

    #[test]
    fn test_usage_lists_all_actions() {
        let text = usage();
        for flag in ["--clipboard", "--save", "--where", "--install", "--deps", "--help"] {
            assert!(text.contains(flag), "usage is missing {}", flag);
        }
    }
}
