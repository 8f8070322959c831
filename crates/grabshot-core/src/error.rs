//! Error types with actionable suggestions.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a grabshot operation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("required tool '{tool}' is not installed")]
    MissingTool { tool: String },

    #[error("no supported graphical session detected")]
    UnsupportedSession,

    #[error("invalid option '{arg}'")]
    InvalidArgument { arg: String },

    #[error("cancelled by user")]
    UserCancelled,

    #[error("capture with '{tool}' failed: {detail}")]
    CaptureFailed { tool: String, detail: String },

    #[error("copying to the clipboard with '{tool}' failed: {detail}")]
    ClipboardFailed { tool: String, detail: String },

    #[error("{context} ({}): {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn missing_tool(tool: impl Into<String>) -> Self {
        Self::MissingTool { tool: tool.into() }
    }

    pub fn invalid_argument(arg: impl Into<String>) -> Self {
        Self::InvalidArgument { arg: arg.into() }
    }

    pub fn capture_failed(tool: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::CaptureFailed {
            tool: tool.into(),
            detail: detail.into(),
        }
    }

    pub fn clipboard_failed(tool: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ClipboardFailed {
            tool: tool.into(),
            detail: detail.into(),
        }
    }

    /// Wrap an I/O error with what was being done and to which path.
    pub fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            context,
            path: path.into(),
            source,
        }
    }

    /// A hint telling the operator how to get past this error.
    pub fn suggestion(&self) -> String {
        match self {
            Error::MissingTool { tool } => format!(
                "Install '{}' with your package manager, or run 'grabshot --deps' to list everything that is missing",
                tool
            ),
            Error::UnsupportedSession => {
                "Run grabshot from inside a Wayland or X11 desktop session (WAYLAND_DISPLAY or DISPLAY must be set)".into()
            }
            Error::InvalidArgument { .. } => "Run 'grabshot --help' to see the available options".into(),
            Error::UserCancelled => "Install the missing tools and run 'grabshot --deps' again".into(),
            Error::CaptureFailed { tool, .. } => format!(
                "Check that '{}' works when run directly in your terminal; pressing Escape during selection also cancels the capture",
                tool
            ),
            Error::ClipboardFailed { tool, .. } => format!(
                "The screenshot was still saved; check that '{}' can reach your clipboard from this session",
                tool
            ),
            Error::Io { .. } => "Check that the path exists and that you have permission to write to it".into(),
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
