use std::time::Duration;

pub(crate) const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(1);
pub(crate) const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);
pub(crate) const DEFAULT_CONCURRENCY: usize = 50;

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub(crate) const SEPARATOR_WIDTH: usize = 50;
