pub mod scan;

use std::ffi::OsString;
use std::num::NonZeroUsize;
use std::time::Duration;

use clap::{ArgAction, Parser};
use portsweep_common::config::Config;
use portsweep_common::error::InputError;
use portsweep_common::network::{ports::PortList, range::Ipv4Range};

/// Long flags that are also accepted with a single dash (`-sip`, `-eip`).
const SINGLE_DASH_LONG_FLAGS: &[&str] = &["sip", "eip"];

#[derive(Parser, Debug)]
#[command(name = "portsweep", version)]
#[command(about = "Concurrent TCP reachability scanner for IPv4 ranges.")]
pub struct CommandLine {
    /// Start of the IPv4 range, inclusive
    #[arg(long = "sip", value_name = "IPV4")]
    pub start_ip: Option<String>,

    /// End of the IPv4 range, inclusive
    #[arg(long = "eip", value_name = "IPV4")]
    pub end_ip: Option<String>,

    /// Ports to scan, e.g. `-p 80,443`
    #[arg(short = 'p', long = "ports", value_name = "PORTS", default_value = "80")]
    pub ports: String,

    /// Connect timeout per probe, in seconds
    #[arg(short = 't', long = "timeout", value_name = "SECS", default_value_t = 5)]
    pub timeout: u64,

    /// Maximum probes in flight per address (unbounded when omitted)
    #[arg(short = 'c', long = "concurrency", value_name = "N")]
    pub concurrency: Option<NonZeroUsize>,

    /// Reduce output; repeat to also hide the summary
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn range(&self) -> Result<Ipv4Range, InputError> {
        Ipv4Range::from_bounds(self.start_ip.as_deref(), self.end_ip.as_deref())
    }

    pub fn port_list(&self) -> Result<PortList, InputError> {
        self.ports.parse()
    }

    pub fn config(&self) -> Result<Config, InputError> {
        if self.timeout == 0 {
            return Err(InputError::InvalidTimeout);
        }

        Ok(Config {
            timeout: Duration::from_secs(self.timeout),
            concurrency: self.concurrency,
            quiet: self.quiet,
        })
    }
}

/// Rewrites `-sip`/`-eip` (and their `=value` forms) to the `--` spelling clap expects.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(flag) = text.strip_prefix('-').filter(|rest| !rest.starts_with('-')) else {
                return arg;
            };
            let name: &str = flag.split_once('=').map_or(flag, |(name, _)| name);

            if SINGLE_DASH_LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
