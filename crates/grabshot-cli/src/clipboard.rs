//! Copying the captured image to the clipboard.
//!
//! Failure here is never fatal: the caller gets `false` and decides what to
//! skip.

use std::path::Path;

use grabshot_core::tools::{WL_COPY, XCLIP, XSEL};
use grabshot_core::{Error, Result, SessionType};
use tracing::{info, warn};

use crate::notify;
use crate::system::{Context, Invocation};

/// Put the PNG at `file` on the clipboard. Returns whether it worked.
pub fn copy_to_clipboard(ctx: &Context, session: SessionType, file: &Path) -> bool {
    match write(ctx, session, file) {
        Ok(tool) => {
            info!("Copied {} to clipboard with {}", file.display(), tool);
            true
        }
        Err(e) => {
            warn!("Clipboard copy failed: {}", e);
            notify::error(ctx, "Clipboard copy failed", &e.to_string());
            false
        }
    }
}

fn write(ctx: &Context, session: SessionType, file: &Path) -> Result<&'static str> {
    let (tool, invocation) = match session {
        SessionType::Wayland => {
            if !ctx.locator.is_available(WL_COPY) {
                return Err(Error::missing_tool(WL_COPY));
            }
            (
                WL_COPY,
                Invocation::new(WL_COPY)
                    .args(["--type", "image/png"])
                    .stdin_file(file),
            )
        }
        SessionType::X11 => {
            if ctx.locator.is_available(XCLIP) {
                (
                    XCLIP,
                    Invocation::new(XCLIP)
                        .args(["-selection", "clipboard", "-t", "image/png", "-i"])
                        .arg(file),
                )
            } else if ctx.locator.is_available(XSEL) {
                (
                    XSEL,
                    Invocation::new(XSEL)
                        .args(["--clipboard", "--input"])
                        .stdin_file(file),
                )
            } else {
                return Err(Error::missing_tool(format!("{} or {}", XCLIP, XSEL)));
            }
        }
        SessionType::Unknown => return Err(Error::UnsupportedSession),
    };

    let out = ctx
        .runner
        .run(&invocation)
        .map_err(|e| Error::clipboard_failed(tool, e.to_string()))?;
    if !out.success {
        return Err(Error::clipboard_failed(tool, out.status_text()));
    }
    Ok(tool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::fake::FakeRunner;
    use crate::system::CommandOutput;
    use grabshot_core::tools::FixedLocator;
    use grabshot_core::Environment;

    fn copy_with(session: SessionType, installed: &[&str], runner: &FakeRunner) -> bool {
        let env = Environment::default();
        let locator = FixedLocator::new(installed.iter().copied());
        let ctx = Context::new(&env, &locator, runner);
        copy_to_clipboard(&ctx, session, Path::new("/tmp/shot.png"))
    }

    #[test]
    fn test_wayland_streams_file_into_wl_copy() {
        let runner = FakeRunner::default();
        assert!(copy_with(SessionType::Wayland, &["wl-copy"], &runner));

        let runs = runner.runs_of("wl-copy");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].stdin.as_deref(), Some(Path::new("/tmp/shot.png")));
        assert!(runner.notifications().is_empty());
    }

    #[test]
    fn test_wayland_missing_wl_copy() {
        let runner = FakeRunner::default();
        assert!(!copy_with(SessionType::Wayland, &[], &runner));
        assert_eq!(runner.programs(), vec!["notify-send"]);
        assert!(runner.notifications()[0].1.contains("wl-copy"));
    }

    #[test]
    fn test_x11_prefers_xclip() {
        let runner = FakeRunner::default();
        assert!(copy_with(SessionType::X11, &["xclip", "xsel"], &runner));

        assert_eq!(runner.programs(), vec!["xclip"]);
        let xclip = &runner.runs_of("xclip")[0];
        assert_eq!(xclip.arg_str(3).as_deref(), Some("image/png"));
        assert_eq!(xclip.arg_str(5).as_deref(), Some("/tmp/shot.png"));
    }

    #[test]
    fn test_x11_falls_back_to_xsel() {
        let runner = FakeRunner::default();
        assert!(copy_with(SessionType::X11, &["xsel"], &runner));

        let xsel = &runner.runs_of("xsel")[0];
        assert_eq!(xsel.stdin.as_deref(), Some(Path::new("/tmp/shot.png")));
    }

    #[test]
    fn test_x11_without_either_tool_fails() {
        let runner = FakeRunner::default();
        assert!(!copy_with(SessionType::X11, &["maim"], &runner));
        assert!(runner.notifications()[0].1.contains("xclip or xsel"));
    }

    #[test]
    fn test_unknown_session_fails() {
        let runner = FakeRunner::default();
        assert!(!copy_with(SessionType::Unknown, &["wl-copy", "xclip"], &runner));
        assert_eq!(runner.programs(), vec!["notify-send"]);
    }

    #[test]
    fn test_tool_exit_failure_is_reported() {
        let runner = FakeRunner::with(|inv| match inv.program.as_str() {
            "wl-copy" => Ok(CommandOutput::failed(1)),
            _ => Ok(CommandOutput::ok()),
        });
        assert!(!copy_with(SessionType::Wayland, &["wl-copy"], &runner));

        let notes = runner.notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].0, "Clipboard copy failed");
        assert!(notes[0].1.contains("clipboard with 'wl-copy'"), "{}", notes[0].1);
        assert!(notes[0].1.contains("exited with status 1"));
        assert!(!notes[0].1.contains("capture"));
    }

    #[test]
    fn test_tool_spawn_failure_names_the_tool() {
        let runner = FakeRunner::with(|inv| match inv.program.as_str() {
            "xsel" => Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")),
            _ => Ok(CommandOutput::ok()),
        });
        assert!(!copy_with(SessionType::X11, &["xsel"], &runner));

        let notes = runner.notifications();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].1.contains("'xsel'"), "{}", notes[0].1);
        assert!(!notes[0].1.contains("/tmp/shot.png"));
    }
}
