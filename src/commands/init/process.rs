use super::error::InitError;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// A single external program call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub stdin: Option<String>,
}

impl Invocation {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Invocation {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            cwd: None,
            stdin: None,
        }
    }

    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    pub fn with_stdin(mut self, input: String) -> Self {
        self.stdin = Some(input);
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Executes invocations on behalf of the bootstrap sequence.
pub trait Runner {
    /// Run with inherited stdio (stdin is piped when the invocation carries
    /// input). Fails on non-zero exit.
    fn run(&self, invocation: &Invocation) -> Result<(), InitError>;

    /// Run with captured stdout and discarded stderr. `None` when the program
    /// can't be launched or exits non-zero.
    fn probe(&self, invocation: &Invocation) -> Option<String>;
}

pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), InitError> {
        log::debug!("Running: {}", invocation);
        // Only for failures to start or wait on the child.
        let launch_err = |source: std::io::Error| InitError::Launch {
            program: invocation.program.clone(),
            source,
        };

        let mut cmd = invocation.command();
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());

        let status = match &invocation.stdin {
            None => cmd.stdin(Stdio::inherit()).status().map_err(launch_err)?,
            Some(input) => {
                let mut child = cmd.stdin(Stdio::piped()).spawn().map_err(launch_err)?;
                if let Some(mut stdin) = child.stdin.take() {
                    // A child that exits without reading closes the pipe; its
                    // exit status is what gets reported.
                    if let Err(err) = stdin.write_all(input.as_bytes()) {
                        log::debug!("Writing stdin of {} failed: {}", invocation, err);
                    }
                }
                child.wait().map_err(launch_err)?
            }
        };

        if !status.success() {
            return Err(InitError::StepFailed {
                command: invocation.to_string(),
                code: exit_code_of(&status),
            });
        }
        Ok(())
    }

    fn probe(&self, invocation: &Invocation) -> Option<String> {
        log::debug!("Probing: {}", invocation);
        let output = invocation
            .command()
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()?;

        if !output.status.success() {
            log::debug!("{} exited with {}", invocation, output.status);
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Exit code to report for a failed child. Signals map to `128 + signal`.
fn exit_code_of(status: &ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        return u8::try_from(code).unwrap_or(u8::MAX);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return u8::try_from(128 + signal).unwrap_or(u8::MAX);
        }
    }

    1
}
