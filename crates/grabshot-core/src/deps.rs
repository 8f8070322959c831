//! Dependency policy: which tools each session needs, and how to install them.
//!
//! A [`Requirement`] is either a single tool or an "any of" group. Groups are
//! satisfied by one present alternative, so `xclip`/`xsel` on X11 and the
//! image viewers only count as missing when every alternative is absent.

use std::fmt;

use crate::session::SessionType;
use crate::tools::{self, ToolLocator};

/// One entry of a dependency set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Tool(&'static str),
    AnyOf(&'static [&'static str]),
}

impl Requirement {
    /// True when the requirement is met under `locator`.
    pub fn is_satisfied(&self, locator: &dyn ToolLocator) -> bool {
        match self {
            Requirement::Tool(name) => locator.is_available(name),
            Requirement::AnyOf(names) => names.iter().any(|n| locator.is_available(n)),
        }
    }

    /// The tool to suggest installing when the requirement is unmet.
    pub fn suggested_tool(&self) -> &'static str {
        match self {
            Requirement::Tool(name) => name,
            Requirement::AnyOf(names) => names[0],
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Tool(name) => write!(f, "{}", name),
            Requirement::AnyOf(names) => write!(f, "{}", names.join(" or ")),
        }
    }
}

const X11_CLIPBOARD: &[&str] = &[tools::XCLIP, tools::XSEL];

/// Static requirements for a session type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySet {
    pub session: SessionType,
    pub requirements: Vec<Requirement>,
}

impl DependencySet {
    pub fn for_session(session: SessionType) -> Self {
        let mut requirements = vec![
            Requirement::Tool(tools::ZENITY),
            Requirement::Tool(tools::NOTIFY_SEND),
        ];

        match session {
            SessionType::Wayland => requirements.extend([
                Requirement::Tool(tools::SLURP),
                Requirement::Tool(tools::GRIM),
                Requirement::Tool(tools::WL_COPY),
            ]),
            SessionType::X11 => requirements.extend([
                Requirement::Tool(tools::MAIM),
                Requirement::AnyOf(X11_CLIPBOARD),
            ]),
            SessionType::Unknown => {}
        }

        requirements.push(Requirement::AnyOf(&tools::VIEWERS));

        Self {
            session,
            requirements,
        }
    }
}

/// Outcome of a dependency check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyReport {
    pub session: SessionType,
    pub missing: Vec<Requirement>,
}

impl DependencyReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Names of the missing requirements, as shown to the operator.
    pub fn missing_names(&self) -> Vec<String> {
        self.missing.iter().map(ToString::to_string).collect()
    }

    /// One install command per package-manager family.
    pub fn install_commands(&self) -> Vec<(PackageManager, String)> {
        PackageManager::ALL
            .iter()
            .map(|pm| {
                let mut packages: Vec<&str> = Vec::new();
                for req in &self.missing {
                    let package = pm.package_for(req.suggested_tool());
                    if !packages.contains(&package) {
                        packages.push(package);
                    }
                }
                (*pm, pm.install_command(&packages))
            })
            .collect()
    }
}

/// Compute which requirements of `session` are unmet.
pub fn check_dependencies(session: SessionType, locator: &dyn ToolLocator) -> DependencyReport {
    let set = DependencySet::for_session(session);
    let missing = set
        .requirements
        .into_iter()
        .filter(|req| !req.is_satisfied(locator))
        .collect();

    DependencyReport { session, missing }
}

/// Package-manager families that install hints are printed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Dnf,
    Pacman,
}

impl PackageManager {
    pub const ALL: [PackageManager; 3] = [
        PackageManager::Apt,
        PackageManager::Dnf,
        PackageManager::Pacman,
    ];

    /// Distribution family label.
    pub fn family(&self) -> &'static str {
        match self {
            PackageManager::Apt => "Debian/Ubuntu",
            PackageManager::Dnf => "Fedora",
            PackageManager::Pacman => "Arch",
        }
    }

    /// Package providing `tool` under this package manager.
    pub fn package_for(&self, tool: &'static str) -> &'static str {
        match (self, tool) {
            (_, tools::WL_COPY) => "wl-clipboard",
            (PackageManager::Apt, tools::NOTIFY_SEND) => "libnotify-bin",
            (_, tools::NOTIFY_SEND) => "libnotify",
            _ => tool,
        }
    }

    pub fn install_command(&self, packages: &[&str]) -> String {
        let prefix = match self {
            PackageManager::Apt => "sudo apt install",
            PackageManager::Dnf => "sudo dnf install",
            PackageManager::Pacman => "sudo pacman -S",
        };
        format!("{} {}", prefix, packages.join(" "))
    }
}
