use std::net::Ipv4Addr;
use std::sync::Arc;

use chrono::{DateTime, Local};
use futures::future::join_all;
use log::{debug, info};
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;

use crate::constants::DEFAULT_CONCURRENCY;
use crate::error::{Error, Result};
use crate::net::NetworkRange;
use crate::probe::{ProbeOutcome, Prober};

type HostUpCallback = Box<dyn Fn(Ipv4Addr) + Send + Sync>;

/// Aggregate result of one sweep over a network range.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub network: NetworkRange,
    /// Active addresses in the order their probes completed. Completion
    /// order races across runs; only the set is stable.
    pub active: Vec<Ipv4Addr>,
    /// Usable host addresses in the range.
    pub candidates: u64,
    /// Probes that ran to completion. Equal to `candidates` unless the
    /// sweep was cancelled mid-dispatch.
    pub completed: u64,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl SweepOutcome {
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

/// Coordinates one sweep: enumerates the usable hosts of a range, dispatches
/// probes under a concurrency bound and aggregates outcomes as they
/// complete.
///
/// Candidates are admitted in ascending address order through a semaphore
/// sized to the bound, so a finishing probe immediately frees its slot for
/// the next undispatched address. Outcomes flow back over a channel to a
/// single aggregating loop; nothing else mutates the active list.
pub struct Sweeper {
    prober: Arc<dyn Prober>,
    concurrency: usize,
    cancellation: CancellationToken,
    on_host_up: Option<HostUpCallback>,
}

impl Sweeper {
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self {
            prober,
            concurrency: DEFAULT_CONCURRENCY,
            cancellation: CancellationToken::new(),
            on_host_up: None,
        }
    }

    /// Bounds the number of simultaneously in-flight probes.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Cancelling the token stops further dispatch; probes already in
    /// flight drain normally.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Registers a callback invoked for every host found up, at the moment
    /// its probe completes.
    pub fn on_host_up(mut self, callback: impl Fn(Ipv4Addr) + Send + Sync + 'static) -> Self {
        self.on_host_up = Some(Box::new(callback));
        self
    }

    /// Probes every usable host in `range` exactly once and returns once
    /// all dispatched probes have completed.
    ///
    /// # Errors
    /// Fails without probing if the concurrency bound is zero.
    pub async fn sweep(&self, range: NetworkRange) -> Result<SweepOutcome> {
        if self.concurrency == 0 {
            return Err(Error::InvalidConcurrency);
        }

        let candidates = range.host_count();
        info!("sweeping {} ({} usable addresses)", range, candidates);
        let started_at = Local::now();

        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
        let dispatcher = tokio::spawn(dispatch(
            range,
            Arc::clone(&self.prober),
            self.concurrency,
            self.cancellation.clone(),
            outcome_tx,
        ));

        let mut active = Vec::new();
        let mut completed = 0u64;
        while let Some(outcome) = outcome_rx.recv().await {
            completed += 1;
            debug!("probe of {} completed: {:?}", outcome.target_ip, outcome.status);
            if outcome.is_up() {
                info!("{} is up", outcome.target_ip);
                if let Some(callback) = &self.on_host_up {
                    callback(outcome.target_ip);
                }
                active.push(outcome.target_ip);
            }
        }
        dispatcher.await.map_err(|err| {
            Error::Opaque(format!("dispatcher task failed, reason: {}", err).into())
        })?;

        Ok(SweepOutcome {
            network: range,
            active,
            candidates,
            completed,
            started_at,
            finished_at: Local::now(),
        })
    }
}

async fn dispatch(
    range: NetworkRange,
    prober: Arc<dyn Prober>,
    concurrency: usize,
    cancellation: CancellationToken,
    outcome_tx: mpsc::UnboundedSender<ProbeOutcome>,
) {
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut probes = Vec::new();

    for target_ip in range.hosts() {
        let permit = tokio::select! {
            biased;
            _ = cancellation.cancelled() => break,
            permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => break,
            },
        };
        let prober = Arc::clone(&prober);
        let outcome_tx = outcome_tx.clone();
        probes.push(tokio::spawn(async move {
            let outcome = prober.probe(target_ip).await;
            let _ = outcome_tx.send(outcome);
            drop(permit);
        }));
    }

    // The aggregator's channel closes only after every probe has reported.
    join_all(probes).await;
}
