//! Subprocess spawning helpers.

pub mod jsonl;

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};

use crate::error::{AutomakerError, Result};
use crate::utils::command_line;

pub use jsonl::{spawn_jsonl_process, JsonlEvent, JsonlStream};

/// Grace period between SIGTERM and SIGKILL.
const TERMINATE_GRACE: Duration = Duration::from_secs(2);

/// Options for spawning a subprocess.
#[derive(Debug, Clone, Default)]
pub struct SubprocessOptions {
    pub command: String,
    pub args: Vec<String>,
    /// Working directory; inherits the current one when unset.
    pub cwd: Option<PathBuf>,
    /// Extra environment variables layered over the inherited environment.
    pub env: HashMap<String, String>,
    /// Overall timeout for `spawn_process`, inactivity timeout for `spawn_jsonl_process`.
    pub timeout: Option<Duration>,
}

impl SubprocessOptions {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Shell-quoted rendering for logs.
    pub fn display(&self) -> String {
        command_line(&self.command, &self.args)
    }

    /// Build the tokio command with piped stdout/stderr and a null stdin.
    fn build(&self) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .envs(&self.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }

    fn spawn(&self) -> Result<Child> {
        tracing::debug!("Spawning: {}", self.display());
        self.build().spawn().map_err(|source| AutomakerError::Spawn {
            command: self.command.clone(),
            source,
        })
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run a process to completion and capture its output.
///
/// A non-zero exit is not an error; inspect `exit_code`. Exceeding the
/// timeout kills the process and returns `AutomakerError::Timeout`.
pub async fn spawn_process(options: &SubprocessOptions) -> Result<ProcessOutput> {
    let child = options.spawn()?;

    let output = match options.timeout {
        Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
            Ok(result) => result?,
            // Dropping the future drops the child, and kill_on_drop reaps it.
            Err(_) => {
                tracing::warn!("Process timed out after {:?}: {}", limit, options.display());
                return Err(AutomakerError::Timeout {
                    command: options.command.clone(),
                    timeout_ms: limit.as_millis() as u64,
                });
            }
        },
        None => child.wait_with_output().await?,
    };

    Ok(ProcessOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code(),
    })
}

/// Ask a child to stop, escalating to a kill after a grace period.
pub(crate) async fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        if let Some(pid) = child.id() {
            if kill(Pid::from_raw(pid as i32), Signal::SIGTERM).is_ok()
                && tokio::time::timeout(TERMINATE_GRACE, child.wait())
                    .await
                    .is_ok()
            {
                return;
            }
        }
    }

    if let Err(e) = child.kill().await {
        tracing::debug!("Failed to kill child process: {}", e);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_process_captures_output() {
        let opts = SubprocessOptions::new("sh").args(["-c", "echo out; echo err >&2; exit 3"]);
        let output = spawn_process(&opts).await.unwrap();

        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
    }

    #[tokio::test]
    async fn test_spawn_process_env_and_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let opts = SubprocessOptions::new("sh")
            .args(["-c", "echo $AUTOMAKER_TEST_VALUE; pwd"])
            .env("AUTOMAKER_TEST_VALUE", "hello")
            .cwd(dir.path());
        let output = spawn_process(&opts).await.unwrap();

        let mut lines = output.stdout.lines();
        assert_eq!(lines.next(), Some("hello"));
        let cwd = std::fs::canonicalize(lines.next().unwrap()).unwrap();
        assert_eq!(cwd, std::fs::canonicalize(dir.path()).unwrap());
    }

    #[tokio::test]
    async fn test_spawn_process_timeout() {
        let opts = SubprocessOptions::new("sleep")
            .args(["5"])
            .timeout(Duration::from_millis(100));
        let err = spawn_process(&opts).await.unwrap_err();
        assert!(matches!(err, AutomakerError::Timeout { timeout_ms: 100, .. }));
    }

    #[tokio::test]
    async fn test_spawn_missing_command() {
        let opts = SubprocessOptions::new("automaker-definitely-missing-binary");
        let err = spawn_process(&opts).await.unwrap_err();
        assert!(matches!(err, AutomakerError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_terminate_escalates_to_kill() {
        use tokio::io::{AsyncBufReadExt, BufReader};

        let opts = SubprocessOptions::new("sh").args(["-c", "trap '' TERM; echo ready; sleep 10"]);
        let mut child = opts.spawn().unwrap();
        let stdout = child.stdout.take().unwrap();
        let mut lines = BufReader::new(stdout).lines();
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("ready"));

        let started = std::time::Instant::now();
        terminate(&mut child).await;
        let status = child.wait().await.unwrap();

        assert_eq!(status.code(), None);
        assert!(started.elapsed() >= TERMINATE_GRACE);
        assert!(started.elapsed() < Duration::from_secs(8));
    }

    #[test]
    fn test_display() {
        let opts = SubprocessOptions::new("claude").args(["-p", "hello world"]);
        assert_eq!(opts.display(), "claude -p 'hello world'");
    }
}
