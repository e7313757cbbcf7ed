//! Blocking external-command execution for the print pipeline.
//! 列印流程使用的外部指令同步執行工具。
//!
//! Wraps `std::process::Command` behind a serialisable command spec so
//! spooler and probe invocations stay declarative and loggable, and adds
//! the search-path lookup the capability probes rely on.
//! 以可序列化的指令設定封裝 `std::process::Command`，讓列印與偵測呼叫
//! 保持宣告式且易於記錄，並提供能力偵測所需的搜尋路徑查找。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors that may surface while executing a command.
/// （執行指令時可能發生的錯誤。）
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to spawn process: {0}")]
    Spawn(std::io::Error),
    #[error("failed to read process output: {0}")]
    Output(std::io::Error),
    #[error("failed to poll process status: {0}")]
    Poll(std::io::Error),
    #[error("process timed out after {0:?}")]
    TimedOut(Duration),
    #[error("failed to terminate process: {0}")]
    Kill(std::io::Error),
}

/// Serialisable command specification.
/// （可序列化的指令設定資料結構。）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default = "default_kill_on_timeout")]
    pub kill_on_timeout: bool,
}

fn default_kill_on_timeout() -> bool {
    true
}

impl CommandSpec {
    /// Creates a new spec pointing at the given program.
    /// （以指定的程式建立指令設定。）
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            timeout_ms: None,
            kill_on_timeout: true,
        }
    }

    /// Appends a single argument.
    pub fn push_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple arguments at once.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory.
    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }

    /// Applies a timeout to the execution.
    /// （設定指令執行的逾時限制。）
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_millis().clamp(1, u128::from(u64::MAX)) as u64;
        self.timeout_ms = Some(millis);
        self
    }

    /// Controls whether the process is killed after a timeout.
    pub fn with_kill_on_timeout(mut self, kill: bool) -> Self {
        self.kill_on_timeout = kill;
        self
    }
}

/// Result information produced by a command execution.
/// （指令執行完成後的結果資訊。）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub duration_ms: u128,
    pub timed_out: bool,
}

impl CommandOutcome {
    /// Indicates whether the command exited successfully (code `0`).
    pub fn success(&self) -> bool {
        !self.timed_out && matches!(self.exit_code, Some(0))
    }
}

/// Runs the provided command, blocking until it completes (or times
/// out), and captures its output.
/// （執行指定指令，阻塞等待完成並擷取輸出。）
pub fn execute(spec: &CommandSpec) -> Result<CommandOutcome, ExecError> {
    let mut command = Command::new(&spec.program);
    command.args(&spec.args);
    command.stdin(Stdio::null());
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    if let Some(dir) = &spec.working_dir {
        command.current_dir(dir);
    }

    let start = Instant::now();
    let mut child = command.spawn().map_err(ExecError::Spawn)?;

    let timeout_duration = spec.timeout_ms.map(Duration::from_millis);
    let mut timed_out = false;
    let output = match timeout_duration {
        Some(timeout) => loop {
            if child.try_wait().map_err(ExecError::Poll)?.is_some() {
                break child.wait_with_output().map_err(ExecError::Output)?;
            }
            if start.elapsed() >= timeout {
                if spec.kill_on_timeout {
                    child.kill().map_err(ExecError::Kill)?;
                    timed_out = true;
                    break child.wait_with_output().map_err(ExecError::Output)?;
                } else {
                    return Err(ExecError::TimedOut(timeout));
                }
            }
            thread::sleep(Duration::from_millis(15));
        },
        None => child.wait_with_output().map_err(ExecError::Output)?,
    };
    let duration = start.elapsed();

    Ok(CommandOutcome {
        exit_code: output.status.code(),
        stdout: output.stdout,
        stderr: output.stderr,
        duration_ms: duration.as_millis(),
        timed_out,
    })
}

/// Locates `name` on the search path, honouring executable suffixes on
/// Windows. Returns the first match. A name that already contains a
/// path separator is checked directly.
/// （在搜尋路徑上尋找指定程式；Windows 上會補上可執行檔副檔名。）
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let direct = dir.join(name);
        if is_executable(&direct) {
            return Some(direct);
        }
        #[cfg(windows)]
        for ext in ["exe", "bat", "cmd", "com"] {
            let with_ext = dir.join(format!("{name}.{ext}"));
            if is_executable(&with_ext) {
                return Some(with_ext);
            }
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
