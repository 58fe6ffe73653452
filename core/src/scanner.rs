//! The **scan driver**.
//!
//! Walks an [`Ipv4Range`] one address at a time. For each address every port
//! is probed concurrently through [`dispatch::fan_out`], and the merged
//! outcomes are drained to the end before the next address is touched, so at
//! most one address worth of probes is ever in flight.
//!
//! Results are pushed to the caller as [`ScanEvent`]s while the scan runs.

use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;
use std::time::{Duration, Instant};

use portsweep_common::config::Config;
use portsweep_common::network::{ports::PortList, range::Ipv4Range};
use tokio::sync::Semaphore;
use tracing::{Instrument, debug, debug_span};

use crate::dispatch;
use crate::merge;
use crate::probe::{ProbeOutcome, Prober, TcpProber};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A target completed the TCP handshake.
    Connected(ProbeOutcome),
    /// Every port of `addr` has resolved.
    AddressComplete {
        addr: Ipv4Addr,
        elapsed: Duration,
        open: usize,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    pub addresses_scanned: u64,
    /// Open targets in the order they were reported.
    pub open: Vec<SocketAddrV4>,
    pub elapsed: Duration,
}

pub struct Scanner<P: Prober + ?Sized> {
    range: Ipv4Range,
    ports: PortList,
    prober: Arc<P>,
    limiter: Option<Arc<Semaphore>>,
}

impl Scanner<TcpProber> {
    /// A scanner doing real TCP connects with the timeout from `cfg`.
    pub fn tcp(range: Ipv4Range, ports: PortList, cfg: &Config) -> Self {
        Self::with_prober(range, ports, cfg, Arc::new(TcpProber::new(cfg.timeout)))
    }
}

impl<P: Prober + ?Sized + 'static> Scanner<P> {
    pub fn with_prober(range: Ipv4Range, ports: PortList, cfg: &Config, prober: Arc<P>) -> Self {
        let limiter = cfg
            .concurrency
            .map(|limit| Arc::new(Semaphore::new(limit.get())));

        Self {
            range,
            ports,
            prober,
            limiter,
        }
    }

    /// Scans the whole range, calling `on_event` as results come in.
    pub async fn run<F>(&self, mut on_event: F) -> ScanSummary
    where
        F: FnMut(ScanEvent),
    {
        let scan_start: Instant = Instant::now();
        let mut summary = ScanSummary::default();

        for addr in self.range.iter() {
            let span = debug_span!("address", %addr);
            let open: Vec<SocketAddrV4> = self
                .scan_address(addr, &mut on_event)
                .instrument(span)
                .await;

            summary.addresses_scanned += 1;
            summary.open.extend(open);
        }

        summary.elapsed = scan_start.elapsed();
        summary
    }

    /// Probes every port of a single address and waits for the whole batch.
    pub async fn scan_address<F>(&self, addr: Ipv4Addr, on_event: &mut F) -> Vec<SocketAddrV4>
    where
        F: FnMut(ScanEvent),
    {
        let start: Instant = Instant::now();

        let batch = dispatch::fan_out(
            &self.prober,
            addr,
            self.ports.as_slice(),
            self.limiter.as_ref(),
        );
        debug!(probes = batch.len(), "batch dispatched");

        let mut merged = merge::merge(batch);
        let mut open: Vec<SocketAddrV4> = Vec::new();

        while let Some(outcome) = merged.recv().await {
            if outcome.success {
                open.push(outcome.target);
                on_event(ScanEvent::Connected(outcome));
            }
        }

        let elapsed: Duration = start.elapsed();
        debug!(open = open.len(), ?elapsed, "batch drained");
        on_event(ScanEvent::AddressComplete {
            addr,
            elapsed,
            open: open.len(),
        });

        open
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
