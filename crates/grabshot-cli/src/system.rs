//! Subprocess execution and the per-invocation context.
//!
//! Every external program goes through [`Runner`], so flows can be tested
//! with a fake that records invocations instead of spawning anything.

use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use grabshot_core::tools::ToolLocator;
use grabshot_core::Environment;
use tracing::debug;

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
    /// File streamed to the program's stdin.
    pub stdin: Option<PathBuf>,
    /// Collect stdout instead of inheriting it.
    pub capture_stdout: bool,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
            capture_stdout: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin_file(mut self, path: &Path) -> Self {
        self.stdin = Some(path.to_path_buf());
        self
    }

    pub fn capture_stdout(mut self) -> Self {
        self.capture_stdout = true;
        self
    }

    /// Argument at `index` as lossy UTF-8.
    #[cfg(test)]
    pub fn arg_str(&self, index: usize) -> Option<String> {
        self.args
            .get(index)
            .map(|a| a.to_string_lossy().into_owned())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        if let Some(stdin) = &self.stdin {
            write!(f, " < {}", stdin.display())?;
        }
        Ok(())
    }
}

/// Result of a finished program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    /// Captured stdout, empty unless requested.
    pub stdout: String,
}

impl CommandOutput {
    #[cfg(test)]
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: String::new(),
        }
    }

    #[cfg(test)]
    pub fn ok_with_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::ok()
        }
    }

    #[cfg(test)]
    pub fn failed(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
        }
    }

    /// Human-readable exit status.
    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs external programs.
pub trait Runner {
    /// Run to completion, blocking for as long as the program runs.
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput>;

    /// Start a program that outlives this process.
    fn spawn_detached(&self, invocation: &Invocation) -> io::Result<()>;
}

/// [`Runner`] backed by real processes.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    fn command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        cmd
    }
}

impl Runner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        debug!("Running: {}", invocation);
        let mut cmd = Self::command(invocation);

        if let Some(path) = &invocation.stdin {
            cmd.stdin(Stdio::from(File::open(path)?));
        }

        if invocation.capture_stdout {
            let output = cmd.stderr(Stdio::inherit()).output()?;
            Ok(CommandOutput {
                success: output.status.success(),
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            })
        } else {
            let status = cmd.status()?;
            Ok(CommandOutput {
                success: status.success(),
                code: status.code(),
                stdout: String::new(),
            })
        }
    }

    fn spawn_detached(&self, invocation: &Invocation) -> io::Result<()> {
        debug!("Spawning detached: {}", invocation);
        let mut cmd = Self::command(invocation);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // New process group so the viewer survives the terminal closing.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        // Never waited on; the viewer is reparented once we exit.
        cmd.spawn().map(|_child| ())
    }
}

/// What every flow needs: the environment snapshot and the two seams to
/// the outside world.
pub struct Context<'a> {
    pub env: &'a Environment,
    pub locator: &'a dyn ToolLocator,
    pub runner: &'a dyn Runner,
}

impl<'a> Context<'a> {
    pub fn new(
        env: &'a Environment,
        locator: &'a dyn ToolLocator,
        runner: &'a dyn Runner,
    ) -> Self {
        Self {
            env,
            locator,
            runner,
        }
    }
}
