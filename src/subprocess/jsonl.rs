//! Streaming JSON-lines subprocess output.
//!
//! Agent CLIs print one JSON object per stdout line. `spawn_jsonl_process`
//! parses each line as it arrives and hands the values to the caller through
//! a channel, ending with an exit, timeout or abort event.

use futures::Stream;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};

use crate::error::{AutomakerError, Result};
use crate::subprocess::{terminate, SubprocessOptions};

/// Event produced by a JSON-lines process.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonlEvent {
    /// One parsed stdout line.
    Message(Value),
    /// The process exited. Always the last event of a normal run.
    Exit { code: Option<i32>, stderr: String },
    /// No output within the inactivity timeout; the process was terminated.
    Timeout,
    /// The caller aborted the stream; the process was terminated.
    Aborted,
}

/// Handle to a running JSON-lines process.
///
/// Dropping the handle terminates the process.
pub struct JsonlStream {
    rx: mpsc::Receiver<JsonlEvent>,
    abort_tx: Option<oneshot::Sender<()>>,
    command: String,
}

impl JsonlStream {
    /// Receive the next event, or `None` once the stream is finished.
    pub async fn next(&mut self) -> Option<JsonlEvent> {
        self.rx.recv().await
    }

    /// Terminate the process. An `Aborted` event follows.
    pub fn abort(&mut self) {
        if let Some(tx) = self.abort_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Adapt the handle into a `futures::Stream`.
    pub fn into_stream(self) -> impl Stream<Item = JsonlEvent> {
        futures::stream::unfold(self, |mut stream| async move {
            stream.next().await.map(|event| (event, stream))
        })
    }

    /// Drain the stream, returning every message of a successful run.
    pub async fn collect_messages(mut self) -> Result<Vec<Value>> {
        let mut messages = Vec::new();
        while let Some(event) = self.next().await {
            match event {
                JsonlEvent::Message(value) => messages.push(value),
                JsonlEvent::Exit { code: Some(0), .. } => return Ok(messages),
                JsonlEvent::Exit { code, stderr } => {
                    return Err(AutomakerError::ProcessFailed(format!(
                        "'{}' exited with {:?}: {}",
                        self.command,
                        code,
                        stderr.trim()
                    )))
                }
                JsonlEvent::Timeout => {
                    return Err(AutomakerError::ProcessFailed(format!(
                        "'{}' produced no output before the timeout",
                        self.command
                    )))
                }
                JsonlEvent::Aborted => {
                    return Err(AutomakerError::ProcessFailed(format!(
                        "'{}' was aborted",
                        self.command
                    )))
                }
            }
        }
        Ok(messages)
    }
}

/// Spawn a process whose stdout is JSON lines.
///
/// `options.timeout` is an inactivity timeout: it restarts with every line.
/// Lines that are blank or not valid JSON are skipped.
pub fn spawn_jsonl_process(options: &SubprocessOptions) -> Result<JsonlStream> {
    let mut child = options.spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| AutomakerError::ProcessFailed("stdout was not captured".to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| AutomakerError::ProcessFailed("stderr was not captured".to_string()))?;

    let (tx, rx) = mpsc::channel(100);
    let (abort_tx, mut abort_rx) = oneshot::channel::<()>();
    let timeout = options.timeout;
    let command_display = options.display();

    let stderr_task = tokio::spawn(async move {
        let mut buf = String::new();
        if let Err(e) = BufReader::new(stderr).read_to_string(&mut buf).await {
            tracing::debug!("Failed to read stderr: {}", e);
        }
        buf
    });

    tokio::spawn(async move {
        let mut lines = BufReader::new(stdout).lines();

        loop {
            let next_line = async {
                match timeout {
                    Some(limit) => tokio::time::timeout(limit, lines.next_line()).await.ok(),
                    None => Some(lines.next_line().await),
                }
            };

            tokio::select! {
                line = next_line => match line {
                    Some(Ok(Some(line))) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<Value>(trimmed) {
                            Ok(value) => {
                                if tx.send(JsonlEvent::Message(value)).await.is_err() {
                                    // Receiver gone, nobody is listening.
                                    terminate(&mut child).await;
                                    return;
                                }
                            }
                            Err(e) => crate::debug_log!("Skipping non-JSON line from {}: {}", command_display, e),
                        }
                    }
                    Some(Ok(None)) => break,
                    Some(Err(e)) => {
                        tracing::debug!("Error reading stdout of {}: {}", command_display, e);
                        break;
                    }
                    None => {
                        tracing::warn!("No output from {} within {:?}, terminating", command_display, timeout);
                        terminate(&mut child).await;
                        let _ = tx.send(JsonlEvent::Timeout).await;
                        return;
                    }
                },
                _ = &mut abort_rx => {
                    tracing::debug!("Aborting {}", command_display);
                    terminate(&mut child).await;
                    let _ = tx.send(JsonlEvent::Aborted).await;
                    return;
                }
            }
        }

        // Stdout is closed but the child may keep running, so the inactivity
        // timeout and abort still apply while waiting for it to exit.
        let code = tokio::select! {
            waited = async {
                match timeout {
                    Some(limit) => tokio::time::timeout(limit, child.wait()).await.ok(),
                    None => Some(child.wait().await),
                }
            } => match waited {
                Some(Ok(status)) => status.code(),
                Some(Err(e)) => {
                    tracing::debug!("Failed to wait for {}: {}", command_display, e);
                    None
                }
                None => {
                    tracing::warn!(
                        "{} closed stdout but did not exit within {:?}, terminating",
                        command_display,
                        timeout
                    );
                    terminate(&mut child).await;
                    let _ = tx.send(JsonlEvent::Timeout).await;
                    return;
                }
            },
            _ = &mut abort_rx => {
                tracing::debug!("Aborting {}", command_display);
                terminate(&mut child).await;
                let _ = tx.send(JsonlEvent::Aborted).await;
                return;
            }
        };
        let stderr = stderr_task.await.unwrap_or_default();
        let _ = tx.send(JsonlEvent::Exit { code, stderr }).await;
    });

    Ok(JsonlStream {
        rx,
        abort_tx: Some(abort_tx),
        command: options.command.clone(),
    })
}
