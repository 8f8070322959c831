//! Core types and logic for grabshot.
//!
//! Everything here is free of subprocess calls so it can be tested without
//! a desktop session. The `grabshot` binary in `grabshot-cli` drives the
//! external tools.
//!
//! # Modules
//!
//! - [`session`]: environment snapshot and Wayland/X11 detection
//! - [`tools`]: external tool names and the [`tools::ToolLocator`] lookup
//! - [`deps`]: per-session dependency policy and install hints
//! - [`paths`]: screenshot directory and file naming
//! - [`error`]: error taxonomy with operator-facing suggestions
//!
//! # Tool chains
//!
//! | Session | Capture | Clipboard |
//! |---------|---------|-----------|
//! | **Wayland** | `slurp` + `grim` | `wl-copy` |
//! | **X11** | `maim -s` | `xclip`, else `xsel` |

pub mod deps;
pub mod error;
pub mod paths;
pub mod session;
pub mod tools;

pub use error::{Error, Result};
pub use session::{detect, Environment, SessionType};
