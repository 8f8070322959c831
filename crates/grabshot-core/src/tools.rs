//! External programs and how they are found.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::trace;

/// Region selection on Wayland.
pub const SLURP: &str = "slurp";
/// Screen grab on Wayland.
pub const GRIM: &str = "grim";
/// Clipboard writer on Wayland.
pub const WL_COPY: &str = "wl-copy";
/// Interactive capture on X11.
pub const MAIM: &str = "maim";
/// Preferred clipboard writer on X11.
pub const XCLIP: &str = "xclip";
/// Fallback clipboard writer on X11.
pub const XSEL: &str = "xsel";
/// Dialog boxes (save-location picker).
pub const ZENITY: &str = "zenity";
/// Desktop notifications.
pub const NOTIFY_SEND: &str = "notify-send";

/// Image viewers, in the order they are tried.
pub const VIEWERS: [&str; 4] = ["imv", "feh", "eog", "gwenview"];

/// Capability lookup for external executables.
pub trait ToolLocator {
    /// Full path to `name`, or `None` when it is not installed.
    fn locate(&self, name: &str) -> Option<PathBuf>;

    fn is_available(&self, name: &str) -> bool {
        self.locate(name).is_some()
    }

    /// First of `names` that is available.
    fn first_available<'a>(&self, names: &[&'a str]) -> Option<&'a str> {
        names.iter().copied().find(|name| self.is_available(name))
    }
}

/// Looks tools up in the directories of an executable search path.
#[derive(Debug, Clone, Default)]
pub struct PathLocator {
    dirs: Vec<PathBuf>,
}

impl PathLocator {
    /// Build from a `PATH`-style value. `None` means nothing is installed.
    pub fn new(search_path: Option<&OsStr>) -> Self {
        let dirs = search_path
            .map(|p| std::env::split_paths(p).filter(|d| !d.as_os_str().is_empty()).collect())
            .unwrap_or_default();
        Self { dirs }
    }

    /// Whether `dir` is one of the search directories, following symlinks
    /// on the search side.
    pub fn contains_dir(&self, dir: &Path) -> bool {
        self.dirs
            .iter()
            .any(|d| d == dir || d.canonicalize().is_ok_and(|real| real == dir))
    }
}

impl ToolLocator for PathLocator {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        let found = self
            .dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| is_executable(candidate));
        trace!("locate {} -> {:?}", name, found);
        found
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// A fixed set of installed tools, useful when the real search path must
/// not be consulted.
#[derive(Debug, Clone, Default)]
pub struct FixedLocator {
    installed: HashSet<String>,
}

impl FixedLocator {
    pub fn new<I, S>(installed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            installed: installed.into_iter().map(Into::into).collect(),
        }
    }
}

impl ToolLocator for FixedLocator {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        self.installed
            .contains(name)
            .then(|| PathBuf::from("/usr/bin").join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn make_tool(dir: &Path, name: &str, mode: u32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    #[cfg(unix)]
    fn test_path_locator_finds_executable() {
        let dir = tempfile::tempdir().unwrap();
        let tool = make_tool(dir.path(), "grim", 0o755);

        let locator = PathLocator::new(Some(dir.path().as_os_str()));
        assert_eq!(locator.locate("grim"), Some(tool));
        assert!(!locator.is_available("slurp"));
    }

    #[test]
    #[cfg(unix)]
    fn test_path_locator_skips_non_executable_files() {
        let dir = tempfile::tempdir().unwrap();
        make_tool(dir.path(), "maim", 0o644);

        let locator = PathLocator::new(Some(dir.path().as_os_str()));
        assert!(!locator.is_available("maim"));
    }

    #[test]
    #[cfg(unix)]
    fn test_path_locator_respects_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        make_tool(second.path(), "feh", 0o755);
        let preferred = make_tool(first.path(), "feh", 0o755);

        let joined = std::env::join_paths([first.path(), second.path()]).unwrap();
        let locator = PathLocator::new(Some(&joined));
        assert_eq!(locator.locate("feh"), Some(preferred));
        assert!(locator.contains_dir(first.path()));
    }

    #[test]
    fn test_path_locator_without_path_finds_nothing() {
        let locator = PathLocator::new(None);
        assert!(!locator.contains_dir(Path::new("/usr/bin")));
        assert!(!locator.is_available("sh"));
    }

    #[test]
    #[cfg(unix)]
    fn test_contains_dir_resolves_symlinked_entries() {
        let root = tempfile::tempdir().unwrap();
        let real = root.path().join("real");
        std::fs::create_dir(&real).unwrap();
        let link = root.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let locator = PathLocator::new(Some(link.as_os_str()));
        assert!(locator.contains_dir(&link));
        assert!(locator.contains_dir(&real.canonicalize().unwrap()));
        assert!(!locator.contains_dir(root.path()));
    }

    #[test]
    fn test_directories_are_not_tools() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("eog")).unwrap();

        let locator = PathLocator::new(Some(dir.path().as_os_str()));
        assert!(!locator.is_available("eog"));
    }

    #[test]
    fn test_first_available_keeps_priority() {
        let locator = FixedLocator::new(["eog", "feh"]);
        assert_eq!(locator.first_available(&VIEWERS), Some("feh"));

        let none = FixedLocator::default();
        assert_eq!(none.first_available(&VIEWERS), None);
    }
}
