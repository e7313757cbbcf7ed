//! Process execution seam for the spooler clients.
//! 列印用戶端的行程執行介面。

use std::path::{Path, PathBuf};

use tracing::debug;

use psprint_runexec::{execute, find_executable, CommandSpec, ExecError};

/// Outcome of running an external client, flattened to what the job
/// submission layer needs for its result codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The process ran to completion with this exit code.
    Exited(i32),
    /// The process started but was killed by a signal.
    Crashed,
    /// The process could not be started at all.
    StartFailed,
}

/// Abstraction over process lookup and execution so job submission can
/// be exercised without touching the real system.
pub trait ProcessRunner {
    fn find_executable(&self, name: &str) -> Option<PathBuf>;
    fn run(&self, program: &Path, args: &[String]) -> RunStatus;
}

/// The real runner, backed by the execution helpers in
/// `psprint_runexec`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        find_executable(name)
    }

    fn run(&self, program: &Path, args: &[String]) -> RunStatus {
        debug!(program = %program.display(), ?args, "spawning spooler client");
        let spec = CommandSpec::new(program.to_string_lossy()).with_args(args.to_vec());
        match execute(&spec) {
            Ok(outcome) => match outcome.exit_code {
                Some(code) => RunStatus::Exited(code),
                // No exit code on Unix means a signal ended it.
                None => RunStatus::Crashed,
            },
            Err(ExecError::Spawn(_)) => RunStatus::StartFailed,
            Err(_) => RunStatus::Crashed,
        }
    }
}
