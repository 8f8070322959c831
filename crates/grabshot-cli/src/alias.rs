//! Shell alias installation.
//!
//! Appends `alias shot=...` to the bash, zsh and fish startup files found
//! under the home directory. Each file is checked for an existing alias
//! first, so running the installer repeatedly never duplicates the line.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use grabshot_core::tools::PathLocator;
use tracing::{debug, warn};

/// Name of the installed alias.
pub const ALIAS_NAME: &str = "shot";

/// Where a system-wide install is expected to live.
pub const SYSTEM_INSTALL_PATH: &str = "/usr/local/bin/grabshot";

const MARKER: &str = "# grabshot screenshot shortcut";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl Shell {
    pub const ALL: [Shell; 3] = [Shell::Bash, Shell::Zsh, Shell::Fish];

    /// Startup file relative to the home directory.
    pub fn config_file(&self, home: &Path) -> PathBuf {
        match self {
            Shell::Bash => home.join(".bashrc"),
            Shell::Zsh => home.join(".zshrc"),
            Shell::Fish => home.join(".config").join("fish").join("config.fish"),
        }
    }

    /// Text whose presence means the alias is already defined.
    fn existing_marker(&self) -> String {
        match self {
            Shell::Bash | Shell::Zsh => format!("alias {}=", ALIAS_NAME),
            Shell::Fish => format!("alias {} ", ALIAS_NAME),
        }
    }

    pub fn alias_line(&self, program: &Path) -> String {
        let quoted = shell_quote(&program.to_string_lossy());
        match self {
            Shell::Bash | Shell::Zsh => format!("alias {}={}", ALIAS_NAME, quoted),
            Shell::Fish => format!("alias {} {}", ALIAS_NAME, quoted),
        }
    }

    /// bash/zsh files must already exist; fish only needs its directory.
    fn is_installed(&self, file: &Path) -> bool {
        match self {
            Shell::Bash | Shell::Zsh => file.is_file(),
            Shell::Fish => file.is_file() || file.parent().is_some_and(Path::is_dir),
        }
    }
}

/// Single-quote for POSIX shells and fish.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// What happened to one shell file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasOutcome {
    Added,
    AlreadyPresent,
    /// Shell not set up for this user.
    NotFound,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub files: Vec<(Shell, PathBuf, AliasOutcome)>,
    pub needs_relocation: bool,
}

impl InstallReport {
    /// Files the alias was newly written to.
    pub fn added_count(&self) -> usize {
        self.files
            .iter()
            .filter(|(_, _, o)| *o == AliasOutcome::Added)
            .count()
    }

    #[cfg(test)]
    pub fn outcome(&self, shell: Shell) -> Option<&AliasOutcome> {
        self.files
            .iter()
            .find(|(s, _, _)| *s == shell)
            .map(|(_, _, outcome)| outcome)
    }
}

/// Canonical absolute path of the running binary.
pub fn resolve_program() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to get current executable path")?;
    exe.canonicalize()
        .with_context(|| format!("Failed to resolve {}", exe.display()))
}

/// Install the alias into every shell startup file present under `home`.
pub fn install_alias(
    home: &Path,
    program: &Path,
    search_path: &PathLocator,
    out: &mut dyn Write,
) -> Result<InstallReport> {
    writeln!(out, "Installing '{}' alias for {}", ALIAS_NAME, program.display())?;

    let mut files = Vec::new();
    for shell in Shell::ALL {
        let file = shell.config_file(home);
        let outcome = if shell.is_installed(&file) {
            match add_alias(shell, &file, program) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Failed to update {}: {}", file.display(), e);
                    AliasOutcome::Failed(e.to_string())
                }
            }
        } else {
            AliasOutcome::NotFound
        };

        match &outcome {
            AliasOutcome::Added => writeln!(out, "  added alias to {}", file.display())?,
            AliasOutcome::AlreadyPresent => {
                writeln!(out, "  alias already exists in {}", file.display())?
            }
            AliasOutcome::NotFound => debug!("Skipping {}: not present", file.display()),
            AliasOutcome::Failed(reason) => {
                writeln!(out, "  could not update {}: {}", file.display(), reason)?
            }
        }
        files.push((shell, file, outcome));
    }

    let needs_relocation = needs_relocation(program, search_path);
    if needs_relocation {
        writeln!(out)?;
        writeln!(
            out,
            "{} is not on your PATH. To install it system-wide, run:",
            program.display()
        )?;
        writeln!(
            out,
            "  sudo install -m 755 {} {}",
            shell_quote(&program.to_string_lossy()),
            SYSTEM_INSTALL_PATH
        )?;
        writeln!(out, "then run 'grabshot --install' again from there.")?;
    }

    let touched: Vec<&(Shell, PathBuf, AliasOutcome)> = files
        .iter()
        .filter(|(_, _, o)| matches!(o, AliasOutcome::Added | AliasOutcome::AlreadyPresent))
        .collect();

    writeln!(out)?;
    let reload: Vec<&PathBuf> = if touched.is_empty() {
        writeln!(out, "No bash, zsh or fish configuration found under {}", home.display())?;
        writeln!(out, "Create one, run 'grabshot --install' again, then reload it:")?;
        files.iter().map(|(_, file, _)| file).collect()
    } else {
        writeln!(out, "To use '{}' in this terminal, reload your shell config:", ALIAS_NAME)?;
        touched.into_iter().map(|(_, file, _)| file).collect()
    };
    for file in reload {
        writeln!(out, "  source {}", file.display())?;
    }

    Ok(InstallReport {
        files,
        needs_relocation,
    })
}

fn add_alias(shell: Shell, file: &Path, program: &Path) -> io::Result<AliasOutcome> {
    let existing = match fs::read_to_string(file) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };

    if existing.contains(&shell.existing_marker()) {
        return Ok(AliasOutcome::AlreadyPresent);
    }

    let mut f = OpenOptions::new().create(true).append(true).open(file)?;
    if !existing.is_empty() && !existing.ends_with('\n') {
        writeln!(f)?;
    }
    writeln!(f, "{}", MARKER)?;
    writeln!(f, "{}", shell.alias_line(program))?;
    Ok(AliasOutcome::Added)
}

fn needs_relocation(program: &Path, search_path: &PathLocator) -> bool {
    if program == Path::new(SYSTEM_INSTALL_PATH) {
        return false;
    }
    match program.parent() {
        Some(dir) => !search_path.contains_dir(dir),
        None => true,
    }
}
