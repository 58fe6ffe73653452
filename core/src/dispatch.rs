use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;

use tokio::sync::{Semaphore, oneshot};

use crate::probe::{ProbeOutcome, Prober, spawn_probe};

/// Launches one probe per port of `addr` and returns their pending outcomes
/// in port order, without waiting on any of them.
///
/// Every probe is spawned immediately. When a `limiter` is given, the probe
/// tasks queue on it before connecting, so at most its permit count are
/// connecting at the same time.
pub fn fan_out<P>(
    prober: &Arc<P>,
    addr: Ipv4Addr,
    ports: &[u16],
    limiter: Option<&Arc<Semaphore>>,
) -> Vec<oneshot::Receiver<ProbeOutcome>>
where
    P: Prober + ?Sized + 'static,
{
    ports
        .iter()
        .map(|&port| {
            spawn_probe(
                Arc::clone(prober),
                SocketAddrV4::new(addr, port),
                limiter.cloned(),
            )
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
