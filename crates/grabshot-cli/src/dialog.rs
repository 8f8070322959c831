//! Save-location picker and moving the capture to the chosen path.

use std::fs;
use std::path::{Path, PathBuf};

use grabshot_core::tools::ZENITY;
use grabshot_core::{Error, Result};
use tracing::{debug, warn};

use crate::system::{Context, Invocation};

/// Ask where to save, pre-filled with `default`.
///
/// `None` means keep `default`: the dialog was cancelled, returned nothing,
/// or could not be shown.
pub fn pick_save_location(ctx: &Context, default: &Path) -> Option<PathBuf> {
    if !ctx.locator.is_available(ZENITY) {
        warn!("{} not installed, keeping {}", ZENITY, default.display());
        return None;
    }

    let mut filename = std::ffi::OsString::from("--filename=");
    filename.push(default.as_os_str());

    let invocation = Invocation::new(ZENITY)
        .args([
            "--file-selection",
            "--save",
            "--confirm-overwrite",
            "--title=Save screenshot",
        ])
        .arg(filename)
        .capture_stdout();

    match ctx.runner.run(&invocation) {
        Ok(out) if out.success => {
            let chosen = out.stdout.trim();
            if chosen.is_empty() {
                None
            } else {
                Some(PathBuf::from(chosen))
            }
        }
        Ok(out) => {
            debug!("Save dialog cancelled ({})", out.status_text());
            None
        }
        Err(e) => {
            warn!("Failed to open save dialog: {}", e);
            None
        }
    }
}

/// Move `from` to `to`, copying across filesystems when rename can't.
pub fn relocate(from: &Path, to: &Path) -> Result<()> {
    if from == to {
        return Ok(());
    }

    if let Err(e) = fs::rename(from, to) {
        debug!("rename failed ({}), copying instead", e);
        fs::copy(from, to).map_err(|e| Error::io("Failed to move screenshot", to, e))?;
        fs::remove_file(from).map_err(|e| Error::io("Failed to remove original", from, e))?;
    }
    Ok(())
}
