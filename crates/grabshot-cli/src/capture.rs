//! Region capture through the session's tool chain.
//!
//! - Wayland: `slurp` prints the selected geometry, `grim -g` grabs it.
//! - X11: `maim -s` does selection and grab in one step.
//!
//! Every failure raises a critical notification before it is returned;
//! callers treat capture errors as fatal.

use std::path::Path;

use grabshot_core::tools::{GRIM, MAIM, SLURP};
use grabshot_core::{Error, Result, SessionType};
use tracing::{debug, info};

use crate::notify;
use crate::system::{Context, Invocation};

/// Capture an interactively selected region into `output` (PNG).
pub fn capture(ctx: &Context, session: SessionType, output: &Path) -> Result<()> {
    let result = match session {
        SessionType::Wayland => capture_wayland(ctx, output),
        SessionType::X11 => capture_x11(ctx, output),
        SessionType::Unknown => Err(Error::UnsupportedSession),
    };

    match &result {
        Ok(()) => info!("Captured {} screenshot to {}", session, output.display()),
        Err(e) => notify::error(ctx, "Screenshot failed", &failure_message(e)),
    }
    result
}

fn failure_message(err: &Error) -> String {
    match err {
        Error::UnsupportedSession => {
            "Unsupported environment: neither Wayland nor X11 was detected".to_string()
        }
        Error::MissingTool { tool } => format!("{} is not installed", tool),
        other => other.to_string(),
    }
}

fn require(ctx: &Context, tools: &[&str]) -> Result<()> {
    match tools.iter().find(|t| !ctx.locator.is_available(t)) {
        Some(missing) => Err(Error::missing_tool(*missing)),
        None => Ok(()),
    }
}

fn capture_wayland(ctx: &Context, output: &Path) -> Result<()> {
    require(ctx, &[SLURP, GRIM])?;

    let selection = ctx
        .runner
        .run(&Invocation::new(SLURP).capture_stdout())
        .map_err(|e| Error::capture_failed(SLURP, e.to_string()))?;
    if !selection.success {
        return Err(Error::capture_failed(SLURP, "selection cancelled"));
    }

    let geometry = selection.stdout.trim();
    if geometry.is_empty() {
        return Err(Error::capture_failed(SLURP, "no region selected"));
    }
    debug!("Selected region {}", geometry);

    grab(ctx, GRIM, Invocation::new(GRIM).args(["-g", geometry]).arg(output), output)
}

fn capture_x11(ctx: &Context, output: &Path) -> Result<()> {
    require(ctx, &[MAIM])?;
    grab(ctx, MAIM, Invocation::new(MAIM).arg("-s").arg(output), output)
}

fn grab(ctx: &Context, tool: &str, invocation: Invocation, output: &Path) -> Result<()> {
    let out = ctx
        .runner
        .run(&invocation)
        .map_err(|e| Error::capture_failed(tool, e.to_string()))?;

    if !out.success {
        return Err(Error::capture_failed(tool, out.status_text()));
    }
    if !output.is_file() {
        return Err(Error::capture_failed(
            tool,
            format!("no image was written to {}", output.display()),
        ));
    }
    Ok(())
}
