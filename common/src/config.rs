use std::num::NonZeroUsize;
use std::time::Duration;

/// Per-probe connect timeout used when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound on a single TCP connect attempt.
    pub timeout: Duration,
    /// Maximum number of probes in flight for one address.
    ///
    /// `None` launches every port of the address at once.
    pub concurrency: Option<NonZeroUsize>,
    /// 0 prints everything, 1 hides banners and per-address timing,
    /// 2 and above only prints connected targets.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            concurrency: None,
            quiet: 0,
        }
    }
}
