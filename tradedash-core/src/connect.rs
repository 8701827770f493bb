//! Simulated broker connection.
//!
//! No network traffic: a non-empty API key walks the status through
//! `Connecting` to `Connected` after a fixed delay, an empty key fails
//! immediately.

use std::fmt;
use std::thread;
use std::time::Duration;

use tracing::info;

/// Default time spent in the `Connecting` state.
pub const DEFAULT_CONNECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Idle,
    Connecting,
    Connected,
    Error(String),
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Idle => write!(f, "Not connected"),
            ConnectionStatus::Connecting => write!(f, "Connecting..."),
            ConnectionStatus::Connected => write!(f, "Connected (simulation)"),
            ConnectionStatus::Error(reason) => write!(f, "Error: {reason}"),
        }
    }
}

/// Pretend connector with a fixed handshake delay.
#[derive(Debug, Clone)]
pub struct SimulatedConnector {
    delay: Duration,
}

impl Default for SimulatedConnector {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_DELAY)
    }
}

impl SimulatedConnector {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run the simulated handshake, reporting every status change to
    /// `on_status`. Returns the final status.
    pub fn connect(&self, api_key: &str, mut on_status: impl FnMut(&ConnectionStatus)) -> ConnectionStatus {
        if api_key.trim().is_empty() {
            let status = ConnectionStatus::Error("API key required".into());
            on_status(&status);
            return status;
        }

        on_status(&ConnectionStatus::Connecting);
        thread::sleep(self.delay);

        let status = ConnectionStatus::Connected;
        info!("simulated connection established");
        on_status(&status);
        status
    }
}
