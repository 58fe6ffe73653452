//! A single TCP connect attempt against one `address:port`.

use std::future::Future;
use std::io;
use std::net::SocketAddrV4;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use portsweep_common::config::DEFAULT_TIMEOUT;
use tokio::net::TcpStream;
use tokio::sync::{Semaphore, oneshot};
use tokio::time::timeout;
use tracing::trace;

/// Result of one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub success: bool,
    pub target: SocketAddrV4,
}

impl ProbeOutcome {
    pub fn open(target: SocketAddrV4) -> Self {
        Self { success: true, target }
    }

    pub fn closed(target: SocketAddrV4) -> Self {
        Self { success: false, target }
    }
}

/// Decides whether a target accepts connections.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target: SocketAddrV4) -> ProbeOutcome;
}

/// Full three-way handshake, bounded by `timeout`. The stream is dropped
/// as soon as it is established.
#[derive(Debug, Clone, Copy)]
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, target: SocketAddrV4) -> ProbeOutcome {
        connect_within(self.timeout, target, TcpStream::connect(target)).await
    }
}

/// Awaits `connect` for at most `limit`. Whatever it yields on success is
/// dropped right away, closing the connection.
async fn connect_within<S, F>(
    limit: Duration,
    target: SocketAddrV4,
    connect: F,
) -> ProbeOutcome
where
    F: Future<Output = io::Result<S>>,
{
    match timeout(limit, connect).await {
        Ok(Ok(stream)) => {
            drop(stream);
            ProbeOutcome::open(target)
        }
        Ok(Err(e)) => {
            trace!(%target, error = %e, "connect failed");
            ProbeOutcome::closed(target)
        }
        Err(_elapsed) => {
            trace!(%target, "connect timed out");
            ProbeOutcome::closed(target)
        }
    }
}

/// Runs one probe on its own task and hands back the receiving half of a
/// oneshot that carries its outcome.
///
/// With a `limiter`, the task holds a permit for the duration of the connect.
pub fn spawn_probe<P>(
    prober: Arc<P>,
    target: SocketAddrV4,
    limiter: Option<Arc<Semaphore>>,
) -> oneshot::Receiver<ProbeOutcome>
where
    P: Prober + ?Sized + 'static,
{
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let _permit = match limiter {
            Some(sem) => sem.acquire_owned().await.ok(),
            None => None,
        };
        let outcome: ProbeOutcome = prober.probe(target).await;
        // Receiver gone means nobody is merging this batch anymore.
        let _ = tx.send(outcome);
    });

    rx
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::time::Instant;
    use tokio::net::TcpListener;

    async fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }

    #[tokio::test]
    async fn probe_reports_listening_port_as_open() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port: u16 = listener.local_addr().unwrap().port();
        let target = SocketAddrV4::new(Ipv4Addr::LOCALHOST, port);

        let outcome = TcpProber::new(Duration::from_secs(2)).probe(target).await;

        assert_eq!(outcome, ProbeOutcome::open(target));
        assert_eq!(outcome.target.to_string(), format!("127.0.0.1:{port}"));
    }

    #[tokio::test]
    async fn probe_reports_closed_port_within_timeout() {
        let port: u16 = closed_port().await;
        let target = SocketAddrV4::new(Ipv4Addr::LOCALHOST, port);
        let probe_timeout = Duration::from_millis(500);

        let started = Instant::now();
        let outcome = TcpProber::new(probe_timeout).probe(target).await;

        assert!(!outcome.success);
        assert!(started.elapsed() < probe_timeout + Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_connect_is_cut_off_at_timeout() {
        let target = SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 80);
        let limit = DEFAULT_TIMEOUT;

        let started = tokio::time::Instant::now();
        let hanging = std::future::pending::<io::Result<()>>();
        let outcome = connect_within(limit, target, hanging).await;
        let elapsed = started.elapsed();

        assert_eq!(outcome, ProbeOutcome::closed(target));
        assert!(elapsed >= limit, "gave up after {elapsed:?}, before the timeout");
        assert!(elapsed < limit + Duration::from_millis(50), "overran timeout: {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn connect_result_decides_outcome_before_timeout() {
        let target = SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 443);
        let limit = Duration::from_secs(1);

        let accepted = connect_within(limit, target, async { Ok::<(), io::Error>(()) }).await;
        let refused = connect_within(limit, target, async {
            Err::<(), io::Error>(io::ErrorKind::ConnectionRefused.into())
        })
        .await;

        assert_eq!(accepted, ProbeOutcome::open(target));
        assert_eq!(refused, ProbeOutcome::closed(target));
    }

    #[tokio::test]
    async fn spawn_probe_delivers_exactly_one_outcome() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port: u16 = listener.local_addr().unwrap().port();
        let target = SocketAddrV4::new(Ipv4Addr::LOCALHOST, port);

        let rx = spawn_probe(Arc::new(TcpProber::default()), target, None);

        assert_eq!(rx.await, Ok(ProbeOutcome::open(target)));
    }
}
