//! Change notification for the domain state file.
//!
//! The watcher is registered on the file's parent directory and events are
//! filtered down to the file name, so a rename-over-replace of the file is
//! still reported. Callbacks run on notify's thread (or on the debounce
//! worker when a window is configured) and must only hand the event off.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::time::{Duration, Instant};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    Changed { path: PathBuf },
    Error(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorOptions {
    /// Events arriving within this window after the first are coalesced.
    /// Zero reports every event.
    pub debounce: Duration,
}

impl MonitorOptions {
    pub fn with_debounce_ms(ms: u64) -> Self {
        Self {
            debounce: Duration::from_millis(ms),
        }
    }
}

/// Active subscription; dropping it stops notifications
pub struct ChangeMonitor {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl ChangeMonitor {
    pub fn subscribe<F>(
        path: impl Into<PathBuf>,
        options: MonitorOptions,
        on_change: F,
    ) -> Result<Self>
    where
        F: FnMut(MonitorEvent) + Send + 'static,
    {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_os_string())
            .ok_or_else(|| {
                Error::Config(format!("Not a file path to watch: {}", path.display()))
            })?;
        let watch_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let watcher = if options.debounce.is_zero() {
            Self::start(&watch_dir, file_name, on_change)?
        } else {
            let (tx, rx) = channel();
            let window = options.debounce;
            std::thread::Builder::new()
                .name("domtable-monitor-debounce".to_string())
                .spawn(move || debounce_worker(rx, window, on_change))?;
            Self::start(&watch_dir, file_name, move |event| {
                let _ = tx.send(event);
            })?
        };

        tracing::info!(
            path = %path.display(),
            debounce_ms = options.debounce.as_millis() as u64,
            "watching state file"
        );

        Ok(Self {
            _watcher: watcher,
            path,
        })
    }

    /// Forward notifications into a channel for the control loop
    pub fn channel(
        path: impl Into<PathBuf>,
        options: MonitorOptions,
    ) -> Result<(Self, Receiver<MonitorEvent>)> {
        let (tx, rx) = channel();
        let monitor = Self::subscribe(path, options, move |event| {
            let _ = tx.send(event);
        })?;
        Ok((monitor, rx))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn start<F>(watch_dir: &Path, file_name: OsString, mut emit: F) -> Result<RecommendedWatcher>
    where
        F: FnMut(MonitorEvent) + Send + 'static,
    {
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                    return;
                }
                if let Some(path) = event
                    .paths
                    .iter()
                    .find(|p| p.file_name() == Some(file_name.as_os_str()))
                {
                    tracing::debug!(
                        path = %path.display(),
                        kind = ?event.kind,
                        "state file changed"
                    );
                    emit(MonitorEvent::Changed { path: path.clone() });
                }
            }
            Err(e) => emit(MonitorEvent::Error(format!("Watch error: {}", e))),
        })?;

        watcher.watch(watch_dir, RecursiveMode::NonRecursive)?;
        Ok(watcher)
    }
}

fn debounce_worker<F>(rx: Receiver<MonitorEvent>, window: Duration, mut on_change: F)
where
    F: FnMut(MonitorEvent),
{
    while let Ok(first) = rx.recv() {
        if matches!(first, MonitorEvent::Error(_)) {
            on_change(first);
            continue;
        }

        // The window is measured from the first event, so a steady stream
        // still yields one notification per window
        let deadline = Instant::now() + window;
        let mut pending = first;
        let mut coalesced = 0usize;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(MonitorEvent::Error(msg)) => on_change(MonitorEvent::Error(msg)),
                Ok(next) => {
                    pending = next;
                    coalesced += 1;
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    on_change(pending);
                    return;
                }
            }
        }

        if coalesced > 0 {
            tracing::debug!(coalesced, "debounced state file events");
        }
        on_change(pending);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changed(name: &str) -> MonitorEvent {
        MonitorEvent::Changed {
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn test_debounce_worker_coalesces_burst() {
        let (tx, rx) = channel();
        for _ in 0..5 {
            tx.send(changed("qubes.xml")).unwrap();
        }
        drop(tx);

        let mut seen = Vec::new();
        debounce_worker(rx, Duration::from_millis(50), |event| seen.push(event));
        assert_eq!(seen, vec![changed("qubes.xml")]);
    }

    #[test]
    fn test_debounce_worker_passes_errors_through() {
        let (tx, rx) = channel();
        tx.send(changed("qubes.xml")).unwrap();
        tx.send(MonitorEvent::Error("boom".to_string())).unwrap();
        tx.send(changed("qubes.xml")).unwrap();
        drop(tx);

        let mut seen = Vec::new();
        debounce_worker(rx, Duration::from_millis(50), |event| seen.push(event));
        assert_eq!(
            seen,
            vec![MonitorEvent::Error("boom".to_string()), changed("qubes.xml")]
        );
    }

    #[test]
    fn test_debounce_worker_reports_during_steady_stream() {
        let (tx, rx) = channel();
        let (seen_tx, seen_rx) = channel();
        let worker = std::thread::spawn(move || {
            debounce_worker(rx, Duration::from_millis(100), |event| {
                let _ = seen_tx.send(event);
            })
        });

        // Gaps are shorter than the window for the whole stream
        for _ in 0..15 {
            tx.send(changed("qubes.xml")).unwrap();
            std::thread::sleep(Duration::from_millis(40));
        }
        let during_stream = seen_rx.try_iter().count();
        drop(tx);
        worker.join().unwrap();

        assert!(
            during_stream >= 2,
            "expected notifications while events kept arriving, got {during_stream}"
        );
    }

    #[test]
    fn test_debounce_worker_forwards_leading_error() {
        let (tx, rx) = channel();
        tx.send(MonitorEvent::Error("boom".to_string())).unwrap();
        tx.send(changed("qubes.xml")).unwrap();
        drop(tx);

        let mut seen = Vec::new();
        debounce_worker(rx, Duration::from_millis(50), |event| seen.push(event));
        assert_eq!(
            seen,
            vec![MonitorEvent::Error("boom".to_string()), changed("qubes.xml")]
        );
    }

    #[test]
    fn test_default_options_report_every_event() {
        assert!(MonitorOptions::default().debounce.is_zero());
        assert_eq!(
            MonitorOptions::with_debounce_ms(200).debounce,
            Duration::from_millis(200)
        );
    }

    #[test]
    fn test_directory_without_file_name_is_rejected() {
        let result = ChangeMonitor::subscribe("/", MonitorOptions::default(), |_| {});
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
