//! Screenshot output paths.
//!
//! Priority for the output directory:
//! 1. `GRABSHOT_DIR` (explicit override, ignores empty string)
//! 2. `$HOME/Pictures/Screenshots`
//! 3. `<temp dir>/Screenshots` (no home directory)
//!
//! Files are named `screenshot_<YYYY-MM-DD_HH-MM-SS>.png`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

use crate::error::{Error, Result};
use crate::session::Environment;

/// Timestamp format used in file names (second resolution).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Directory screenshots are written to.
pub fn screenshot_dir(env: &Environment) -> PathBuf {
    if let Some(dir) = &env.output_dir {
        if !dir.as_os_str().is_empty() {
            return dir.clone();
        }
    }

    env.home
        .clone()
        .map(|home| home.join("Pictures"))
        .unwrap_or_else(std::env::temp_dir)
        .join("Screenshots")
}

/// File name for a capture taken at `at`.
pub fn capture_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("screenshot_{}.png", at.format(TIMESTAMP_FORMAT))
}

/// Full path of a capture taken now.
pub fn capture_file(env: &Environment) -> PathBuf {
    screenshot_dir(env).join(capture_file_name(&Local::now()))
}

/// Create the parent directory of `file` if needed.
pub fn ensure_parent_dir(file: &Path) -> Result<()> {
    let Some(parent) = file.parent() else {
        return Ok(());
    };
    std::fs::create_dir_all(parent)
        .map_err(|e| Error::io("Failed to create screenshot directory", parent, e))
}
