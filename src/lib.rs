//! Asynchronous ping sweeps over IPv4 network ranges.
//!
//! ## Example
//! Following example probes every usable host in a /24 and prints the live
//! ones as they are found.
//! ```no_run
//! use std::sync::Arc;
//!
//! use ping_sweep::{NetworkRange, PingClient, PingClientConfigBuilder, Sweeper};
//!
//! tokio_test::block_on(async {
//!     let range = NetworkRange::parse("192.168.1.0/24").unwrap();
//!     let client = Arc::new(PingClient::new(PingClientConfigBuilder::new().build()));
//!     let sweeper = Sweeper::new(client)
//!         .with_concurrency(50)
//!         .on_host_up(|host| println!("{host} is up"));
//!     let outcome = sweeper.sweep(range).await.unwrap();
//!     println!("{} host(s) found", outcome.active_count());
//! })
//! ```
//! Any [`Prober`] implementation can stand in for [`PingClient`], e.g. to
//! sweep with a different liveness check than ICMP echo.

pub mod client;
pub mod error;
pub mod net;
pub mod probe;
pub mod report;
pub mod sweep;

pub(crate) mod constants;

pub use client::{PingClient, PingClientConfig, PingClientConfigBuilder};
pub use error::{Error, Result};
pub use net::NetworkRange;
pub use probe::{ProbeOutcome, ProbeStatus, Prober};
pub use sweep::{SweepOutcome, Sweeper};
