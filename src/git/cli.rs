use crate::error::{Result, SemtagError};
use crate::git::VersionControl;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Version control through the `git` command line
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    work_dir: Option<PathBuf>,
}

impl GitCli {
    /// Run `git` from `PATH` in the process working directory
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Run a specific git executable
    pub fn with_program(program: impl Into<String>) -> Self {
        GitCli {
            program: program.into(),
            work_dir: None,
        }
    }

    /// Run every command inside `dir` instead of the process working directory
    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.work_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).stdin(Stdio::null());
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Run and report only whether the command exited with zero
    fn succeeds(&self, args: &[&str]) -> bool {
        debug!(program = %self.program, ?args, "running git");
        match self
            .command(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) => status.success(),
            Err(e) => {
                debug!(error = %e, "could not spawn git");
                false
            }
        }
    }

    /// Run and capture output, turning spawn failures and non-zero exits into errors
    fn output(&self, args: &[&str]) -> Result<Output> {
        debug!(program = %self.program, ?args, "running git");
        let output = self.command(args).output().map_err(|e| {
            SemtagError::command(format!("failed to run {} {}: {}", self.program, args.join(" "), e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SemtagError::command(format!(
                "{} {} exited with code {}: {}",
                self.program,
                args.join(" "),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(output)
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitCli {
    fn is_available(&self) -> bool {
        self.succeeds(&["--version"])
    }

    fn has_no_unstaged_changes(&self) -> bool {
        self.succeeds(&["diff", "--quiet", "--exit-code"])
    }

    fn tags_at_head(&self) -> Result<Vec<String>> {
        let output = self.output(&["tag", "--points-at", "HEAD"])?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.output(&["tag", name])
            .map_err(|e| SemtagError::tag_creation(format!("cannot create tag '{}': {}", name, e)))?;
        Ok(())
    }
}
