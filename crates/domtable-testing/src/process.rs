//! Background process management for long-running commands.
//!
//! Provides utilities for:
//! - Starting `watch --mode console` in the background
//! - Collecting its output line by line without blocking the test
//! - Terminating the process when the test is done

use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::time::{Duration, Instant};

/// A background process handle.
pub struct BackgroundProcess {
    child: Child,
}

impl BackgroundProcess {
    /// Spawn a new background process with piped stdout.
    ///
    /// Stderr is discarded so an unread pipe can never stall the child.
    pub fn spawn_piped(mut command: Command) -> std::io::Result<Self> {
        command.stdout(Stdio::piped());
        command.stderr(Stdio::null());
        let child = command.spawn()?;
        Ok(Self { child })
    }

    /// Kill the process.
    pub fn kill(&mut self) -> std::io::Result<()> {
        self.child.kill()
    }

    /// Move stdout onto a reader thread and return a line stream.
    pub fn stdout_lines(&mut self) -> Option<LineStream> {
        let stdout = self.child.stdout.take()?;
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Some(LineStream { rx })
    }
}

impl Drop for BackgroundProcess {
    fn drop(&mut self) {
        // Ensure process is killed when dropped
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Lines read from a background process.
pub struct LineStream {
    rx: Receiver<String>,
}

impl LineStream {
    /// Collect lines until one matches `predicate`; returns everything read.
    ///
    /// Returns `None` on timeout or when the process closed its output first.
    pub fn wait_for(
        &self,
        timeout: Duration,
        predicate: impl Fn(&str) -> bool,
    ) -> Option<Vec<String>> {
        let deadline = Instant::now() + timeout;
        let mut seen = Vec::new();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(line) => {
                    let done = predicate(&line);
                    seen.push(line);
                    if done {
                        return Some(seen);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None;
                }
            }
        }
    }
}
