use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Mutex;

use async_trait::async_trait;
use portsweep_core::probe::{ProbeOutcome, Prober};
use tokio::net::TcpListener;

/// A listener on an ephemeral loopback port. Accepts nothing; the kernel
/// completes the handshake from the backlog.
pub async fn open_port() -> (TcpListener, u16) {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let port: u16 = listener.local_addr().unwrap().port();
    (listener, port)
}

/// A loopback port that was bound once and released, so nothing listens on it.
pub async fn closed_port() -> u16 {
    let (listener, port) = open_port().await;
    drop(listener);
    port
}

/// Reports every target as closed and remembers what it was asked to probe.
#[derive(Default)]
pub struct ClosedNetwork {
    pub probed: Mutex<Vec<SocketAddrV4>>,
}

#[async_trait]
impl Prober for ClosedNetwork {
    async fn probe(&self, target: SocketAddrV4) -> ProbeOutcome {
        self.probed.lock().unwrap().push(target);
        ProbeOutcome::closed(target)
    }
}
