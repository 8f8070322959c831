//! Graphical session detection.
//!
//! The process environment is read exactly once into an [`Environment`]
//! snapshot. Everything downstream receives that snapshot (or the
//! [`SessionType`] derived from it) as a parameter, so tests never have to
//! touch the real process environment.

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// Variable set by Wayland compositors.
pub const WAYLAND_DISPLAY_VAR: &str = "WAYLAND_DISPLAY";

/// Variable set by X servers (and by XWayland, hence the priority order).
pub const X11_DISPLAY_VAR: &str = "DISPLAY";

/// Overrides the screenshot output directory when set to a non-empty value.
pub const OUTPUT_DIR_VAR: &str = "GRABSHOT_DIR";

/// The active display protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionType {
    Wayland,
    X11,
    Unknown,
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionType::Wayland => write!(f, "wayland"),
            SessionType::X11 => write!(f, "x11"),
            SessionType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Snapshot of the environment values grabshot consumes.
///
/// Empty variables are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub wayland_display: Option<String>,
    pub x11_display: Option<String>,
    pub home: Option<PathBuf>,
    pub search_path: Option<OsString>,
    pub output_dir: Option<PathBuf>,
}

impl Environment {
    /// Read the current process environment.
    pub fn from_process() -> Self {
        Self {
            wayland_display: non_empty(env::var(WAYLAND_DISPLAY_VAR).ok()),
            x11_display: non_empty(env::var(X11_DISPLAY_VAR).ok()),
            home: dirs::home_dir(),
            search_path: env::var_os("PATH").filter(|p| !p.is_empty()),
            output_dir: env::var_os(OUTPUT_DIR_VAR)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Classify the session: Wayland beats X11, anything else is unknown.
pub fn detect(env: &Environment) -> SessionType {
    let set = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());

    if set(&env.wayland_display) {
        SessionType::Wayland
    } else if set(&env.x11_display) {
        SessionType::X11
    } else {
        SessionType::Unknown
    }
}
