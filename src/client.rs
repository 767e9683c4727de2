use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use crate::constants::{DEFAULT_PROBE_TIMEOUT, DEFAULT_REPLY_TIMEOUT};
use crate::error::{Error, Result};
use crate::probe::{ProbeOutcome, ProbeStatus, Prober};

#[derive(Debug, Clone)]
pub struct PingClientConfig {
    pub reply_timeout: Duration,
    pub probe_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct PingClientConfigBuilder {
    reply_timeout: Option<Duration>,
    probe_timeout: Option<Duration>,
}

impl PingClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            reply_timeout: Some(DEFAULT_REPLY_TIMEOUT),
            probe_timeout: Some(DEFAULT_PROBE_TIMEOUT),
        }
    }

    /// Time to wait for an echo reply.
    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = Some(timeout);
        self
    }

    /// Hard cap on the whole probe operation.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> PingClientConfig {
        PingClientConfig {
            reply_timeout: self.reply_timeout.unwrap(),
            probe_timeout: self.probe_timeout.unwrap(),
        }
    }
}

impl Default for PingClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`Prober`] that delegates the liveness check to the system `ping`
/// utility.
///
/// Each probe sends exactly one echo request and waits up to the configured
/// reply timeout; the child process itself is bounded by the probe timeout
/// and killed if it overruns. There are no retries: a single miss means the
/// host is reported down for this sweep.
///
/// # Example
/// ```no_run
/// use ping_sweep::{PingClient, PingClientConfigBuilder, Prober};
/// use std::net::Ipv4Addr;
/// use std::time::Duration;
///
/// let client = PingClient::new(
///     PingClientConfigBuilder::new()
///         .with_reply_timeout(Duration::from_millis(500))
///         .build(),
/// );
/// tokio_test::block_on(async {
///     let outcome = client.probe(Ipv4Addr::new(192, 168, 1, 1)).await;
///     println!("{:?}", outcome.status);
/// })
/// ```
#[derive(Debug)]
pub struct PingClient {
    reply_timeout: Duration,
    probe_timeout: Duration,
}

impl PingClient {
    pub fn new(config: PingClientConfig) -> Self {
        Self {
            reply_timeout: config.reply_timeout,
            probe_timeout: config.probe_timeout,
        }
    }

    async fn run_ping(&self, target_ip: Ipv4Addr) -> Result<bool> {
        let mut command = Command::new("ping");
        command
            .args(ping_args(self.reply_timeout))
            .arg(target_ip.to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let status = tokio::time::timeout(self.probe_timeout, command.status())
            .await
            .map_err(|_| Error::Opaque("probe timed out".into()))?
            .map_err(|err| {
                Error::Opaque(format!("failed to run ping, reason: {}", err).into())
            })?;
        Ok(status.success())
    }
}

#[async_trait]
impl Prober for PingClient {
    async fn probe(&self, target_ip: Ipv4Addr) -> ProbeOutcome {
        let status = match self.run_ping(target_ip).await {
            Ok(true) => ProbeStatus::Up,
            Ok(false) => ProbeStatus::Down,
            Err(err) => {
                debug!("probe of {} failed: {}", target_ip, err);
                ProbeStatus::Down
            }
        };
        ProbeOutcome::new(status, target_ip)
    }
}

#[cfg(windows)]
fn ping_args(reply_timeout: Duration) -> [String; 4] {
    [
        "-n".into(),
        "1".into(),
        "-w".into(),
        reply_timeout.as_millis().to_string(),
    ]
}

#[cfg(not(windows))]
fn ping_args(reply_timeout: Duration) -> [String; 4] {
    // -W takes whole seconds; round sub-second timeouts up to keep at
    // least one second of reply wait.
    let secs = (reply_timeout.as_secs_f64().ceil() as u64).max(1);
    ["-c".into(), "1".into(), "-W".into(), secs.to_string()]
}
