//! Tor daemon lifecycle
//!
//! Start, stop, restart and uptime tracking for the Tor process that hosts the
//! SOCKS proxy. Timing is tracked per instance.

use crate::config::ProxyConfig;
use crate::DigError;
use std::fmt;
use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Whether the managed Tor process is alive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonStatus {
    Running,
    Stopped,
}

impl fmt::Display for DaemonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "Tor process is running."),
            Self::Stopped => write!(f, "Tor process is not running."),
        }
    }
}

/// A Tor process owned by the crawler
pub struct TorDaemon {
    binary: String,
    port: u16,
    args: Vec<String>,
    process: Mutex<Option<Child>>,
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl TorDaemon {
    /// Creates a daemon handle; nothing is spawned until [`TorDaemon::start`]
    pub fn new(binary: impl Into<String>, port: u16) -> Self {
        Self {
            binary: binary.into(),
            port,
            args: vec!["--SocksPort".to_string(), port.to_string()],
            process: Mutex::new(None),
            started_at: None,
            stopped_at: None,
        }
    }

    /// Creates a daemon handle from the proxy configuration
    pub fn from_config(config: &ProxyConfig) -> Self {
        Self::new(config.tor_binary.clone(), config.port)
    }

    /// Replaces the command line arguments passed to the binary
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// SOCKS port the daemon serves
    pub fn port(&self) -> u16 {
        self.port
    }

    fn process(&self) -> MutexGuard<'_, Option<Child>> {
        self.process.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn slot(&mut self) -> &mut Option<Child> {
        self.process.get_mut().unwrap_or_else(|e| e.into_inner())
    }

    /// Spawns the Tor process in the background
    pub fn start(&mut self) -> Result<(), DigError> {
        if self.status() == DaemonStatus::Running {
            return Err(DigError::Daemon("Tor process is already running".to_string()));
        }

        let child = Command::new(&self.binary)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| DigError::Daemon(format!("Failed to start {}: {}", self.binary, e)))?;

        tracing::info!("Tor started (pid {}, port {})", child.id(), self.port);

        *self.slot() = Some(child);
        self.started_at = Some(Instant::now());
        self.stopped_at = None;
        Ok(())
    }

    /// Terminates the Tor process and waits for it to exit
    ///
    /// Killing a daemon that is not running only logs a warning.
    pub fn kill(&mut self) -> Result<(), DigError> {
        let Some(mut child) = self.slot().take() else {
            tracing::warn!("Tor process is not running.");
            return Ok(());
        };

        // kill() fails if the child already exited; wait() still reaps it
        if let Err(e) = child.kill() {
            tracing::debug!("Tor process already exited: {}", e);
        }
        child.wait()?;

        self.stopped_at = Some(Instant::now());
        tracing::info!("Tor stopped after {:.2}s", self.uptime().as_secs_f64());
        Ok(())
    }

    /// Reports whether the process is still alive
    pub fn status(&self) -> DaemonStatus {
        match self.process().as_mut().map(|child| child.try_wait()) {
            Some(Ok(None)) => DaemonStatus::Running,
            _ => DaemonStatus::Stopped,
        }
    }

    /// Stops (if running) and starts the daemon again
    pub fn restart(&mut self) -> Result<(), DigError> {
        self.kill()?;
        self.start()
    }

    /// Time since the last start, frozen at the last stop
    pub fn uptime(&self) -> Duration {
        match (self.started_at, self.stopped_at) {
            (None, _) => Duration::ZERO,
            (Some(started), None) => started.elapsed(),
            (Some(started), Some(stopped)) => stopped.saturating_duration_since(started),
        }
    }
}

impl fmt::Display for TorDaemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tor({}, {}): {}, Uptime: {:.2} seconds.",
            self.port,
            self.binary,
            self.status(),
            self.uptime().as_secs_f64()
        )
    }
}

impl Drop for TorDaemon {
    fn drop(&mut self) {
        if let Some(mut child) = self.slot().take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
