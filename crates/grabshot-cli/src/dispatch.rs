//! Command dispatch: each action is a short linear pipeline of steps.
//!
//! ```text
//! clipboard: prepare -> capture -> copy -> notify "copied" -> display
//! save:      prepare -> capture -> notify "saved" -> display
//! where:     prepare -> capture -> save dialog -> move? -> notify -> display
//! ```
//!
//! The session type is detected once here and passed down. A failed
//! clipboard copy ends the clipboard pipeline without notifying or
//! displaying; the file stays on disk.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _};
use grabshot_core::tools::PathLocator;
use grabshot_core::{detect, paths, Result, SessionType};
use tracing::{info, warn};

use crate::alias;
use crate::args::Action;
use crate::capture::capture;
use crate::clipboard::copy_to_clipboard;
use crate::deps::run_dependency_check;
use crate::dialog;
use crate::display::display;
use crate::notify;
use crate::system::Context;

/// Terminal streams for the interactive actions.
pub struct Terminal<'a> {
    pub input: &'a mut dyn BufRead,
    pub out: &'a mut dyn Write,
}

/// Run `action`.
///
/// Operational failures are [`grabshot_core::Error`] values inside the
/// returned `anyhow::Error`; the caller downcasts them for hints.
pub fn dispatch(ctx: &Context, action: Action, term: &mut Terminal) -> anyhow::Result<()> {
    let session = detect(ctx.env);
    info!("Session type: {}", session);

    match action {
        Action::Clipboard => clipboard_flow(ctx, session)?,
        Action::Save => save_flow(ctx, session)?,
        Action::Where => where_flow(ctx, session)?,
        Action::Install => install_flow(ctx, term)?,
        Action::Deps => {
            run_dependency_check(session, ctx.locator, term.input, term.out)?;
        }
    }
    Ok(())
}

/// Pick the capture path and make sure its directory exists.
fn prepare(ctx: &Context) -> Result<PathBuf> {
    let file = paths::capture_file(ctx.env);
    paths::ensure_parent_dir(&file)?;
    Ok(file)
}

fn capture_new(ctx: &Context, session: SessionType) -> Result<PathBuf> {
    let file = prepare(ctx)?;
    capture(ctx, session, &file)?;
    Ok(file)
}

fn clipboard_flow(ctx: &Context, session: SessionType) -> Result<()> {
    let file = capture_new(ctx, session)?;

    if !copy_to_clipboard(ctx, session, &file) {
        warn!("Screenshot kept at {} but not copied", file.display());
        return Ok(());
    }

    notify::info(ctx, "Screenshot copied", "Screenshot copied to clipboard");
    display(ctx, &file);
    Ok(())
}

fn save_flow(ctx: &Context, session: SessionType) -> Result<()> {
    let file = capture_new(ctx, session)?;
    finish_saved(ctx, &file);
    Ok(())
}

fn where_flow(ctx: &Context, session: SessionType) -> Result<()> {
    let default = capture_new(ctx, session)?;
    let file = choose_destination(ctx, &default);
    finish_saved(ctx, &file);
    Ok(())
}

/// Where the capture ends up: the picked path, or `default` if the dialog
/// was cancelled or the move failed.
fn choose_destination(ctx: &Context, default: &Path) -> PathBuf {
    let Some(target) = dialog::pick_save_location(ctx, default) else {
        return default.to_path_buf();
    };

    match dialog::relocate(default, &target) {
        Ok(()) => {
            info!("Moved screenshot to {}", target.display());
            target
        }
        Err(e) => {
            warn!("{}", e);
            notify::error(
                ctx,
                "Could not move screenshot",
                &format!("{}\nKept at {}", e, default.display()),
            );
            default.to_path_buf()
        }
    }
}

fn finish_saved(ctx: &Context, file: &Path) {
    notify::info(
        ctx,
        "Screenshot saved",
        &format!("Saved to {}", file.display()),
    );
    display(ctx, file);
}

fn install_flow(ctx: &Context, term: &mut Terminal) -> anyhow::Result<()> {
    let home = ctx
        .env
        .home
        .as_deref()
        .ok_or_else(|| anyhow!("Could not determine your home directory"))?;
    let program = alias::resolve_program()?;
    let search_path = PathLocator::new(ctx.env.search_path.as_deref());

    let report = alias::install_alias(home, &program, &search_path, term.out)
        .context("Failed to install shell alias")?;
    info!(
        "Alias added to {} file(s), relocation suggested: {}",
        report.added_count(),
        report.needs_relocation
    );
    Ok(())
}
