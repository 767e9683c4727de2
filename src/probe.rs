use std::net::Ipv4Addr;

use async_trait::async_trait;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ProbeStatus {
    Up,
    Down,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ProbeOutcome {
    pub status: ProbeStatus,
    pub target_ip: Ipv4Addr,
}

impl ProbeOutcome {
    pub fn new(status: ProbeStatus, target_ip: Ipv4Addr) -> Self {
        Self { status, target_ip }
    }

    pub fn is_up(&self) -> bool {
        self.status == ProbeStatus::Up
    }
}

/// A single-shot liveness check against one host address.
///
/// Implementations never fail: any operational error (probe mechanism
/// unavailable, permission denied, timeout) is reported as
/// [`ProbeStatus::Down`]. An unprobeable host is indistinguishable from a
/// dead one.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target_ip: Ipv4Addr) -> ProbeOutcome;
}
