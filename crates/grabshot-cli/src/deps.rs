//! Interactive dependency check (`--deps`).

use std::io::{BufRead, Write};

use grabshot_core::deps::{check_dependencies, DependencyReport};
use grabshot_core::tools::ToolLocator;
use grabshot_core::{Error, Result, SessionType};

/// Report missing tools and ask whether to continue anyway.
///
/// Declining (or closing stdin) yields [`Error::UserCancelled`].
pub fn run_dependency_check(
    session: SessionType,
    locator: &dyn ToolLocator,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<DependencyReport> {
    let report = check_dependencies(session, locator);
    let io_err = |e: std::io::Error| Error::io("Failed to write to terminal", "<stdout>", e);

    writeln!(out, "Detected session: {}", session).map_err(io_err)?;

    if report.is_complete() {
        writeln!(out, "All dependencies are installed.").map_err(io_err)?;
        return Ok(report);
    }

    print_missing(&report, out).map_err(io_err)?;

    write!(out, "Continue anyway? [y/N] ").map_err(io_err)?;
    out.flush().map_err(io_err)?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|e| Error::io("Failed to read answer", "<stdin>", e))?;

    if is_affirmative(&answer) {
        Ok(report)
    } else {
        Err(Error::UserCancelled)
    }
}

fn print_missing(report: &DependencyReport, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "Missing dependencies:")?;
    for name in report.missing_names() {
        writeln!(out, "  - {}", name)?;
    }
    writeln!(out)?;
    writeln!(out, "Install them with:")?;
    for (pm, command) in report.install_commands() {
        writeln!(out, "  {:<14} {}", pm.family(), command)?;
    }
    writeln!(out)
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use grabshot_core::tools::FixedLocator;
    use std::io::Cursor;

    fn check(
        session: SessionType,
        installed: &[&str],
        answer: &str,
    ) -> (Result<DependencyReport>, String) {
        let locator = FixedLocator::new(installed.iter().copied());
        let mut input = Cursor::new(answer.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = run_dependency_check(session, &locator, &mut input, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_complete_set_does_not_prompt() {
        let (result, text) = check(
            SessionType::X11,
            &["zenity", "notify-send", "maim", "xsel", "feh"],
            "",
        );
        assert!(result.unwrap().is_complete());
        assert!(text.contains("All dependencies are installed"));
        assert!(!text.contains("Continue anyway"));
    }

    #[test]
    fn test_missing_prints_install_hints_and_accepts_yes() {
        let (result, text) = check(SessionType::Wayland, &["zenity", "notify-send"], "Y\n");

        let report = result.unwrap();
        assert_eq!(
            report.missing_names(),
            vec!["slurp", "grim", "wl-copy", "imv or feh or eog or gwenview"]
        );
        assert!(text.contains("sudo apt install slurp grim wl-clipboard imv"));
        assert!(text.contains("sudo dnf install"));
        assert!(text.contains("sudo pacman -S"));
        assert!(text.contains("Continue anyway? [y/N]"));
    }

    #[test]
    fn test_declining_cancels() {
        for answer in ["n\n", "\n", "", "maybe\n"] {
            let (result, _) = check(SessionType::X11, &[], answer);
            assert!(
                matches!(result, Err(Error::UserCancelled)),
                "answer {:?} should cancel",
                answer
            );
        }
    }

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" YES \n"));
        assert!(!is_affirmative("yep"));
        assert!(!is_affirmative(""));
    }
}
