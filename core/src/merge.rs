//! Fan-in of single-shot results.
//!
//! [`merge`] turns N pending oneshot receivers into one stream that yields
//! every value in the order it arrives. One forwarding worker per input moves
//! its value into a shared channel. The workers are all registered in a
//! [`JoinSet`] before a separate closer task starts draining that set; the
//! closer keeps the last sender alive until every worker has finished, so the
//! stream ends exactly once, after the final delivery.

use portsweep_common::{error, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tracing::debug;

/// Capacity of the merged channel. Tokio has no zero-capacity channel, so
/// this is the closest hand-off: a forwarder blocks until the previous value
/// has been taken by the consumer.
pub const MERGE_CAPACITY: usize = 1;

/// Merges `inputs` into a single receiver that closes after all of them resolved.
///
/// The consumer must be polled concurrently with the workers, otherwise the
/// forwarders park on the full channel.
pub fn merge<T>(inputs: Vec<oneshot::Receiver<T>>) -> mpsc::Receiver<T>
where
    T: Send + 'static,
{
    let (tx, rx) = mpsc::channel::<T>(MERGE_CAPACITY);
    let expected: usize = inputs.len();

    let mut forwarders: JoinSet<bool> = JoinSet::new();
    for input in inputs {
        forwarders.spawn(forward(input, tx.clone()));
    }

    // Every forwarder is in the set at this point; the closer can't observe
    // an empty set before the batch has actually drained.
    tokio::spawn(close_when_done(forwarders, tx, expected));

    rx
}

/// Returns whether the value reached the merged channel.
async fn forward<T>(input: oneshot::Receiver<T>, out: mpsc::Sender<T>) -> bool {
    match input.await {
        Ok(value) => out.send(value).await.is_ok(),
        Err(_) => {
            warn!("Producer finished without reporting a result");
            false
        }
    }
}

async fn close_when_done<T>(mut forwarders: JoinSet<bool>, out: mpsc::Sender<T>, expected: usize) {
    let mut finished: usize = 0;
    let mut delivered: usize = 0;

    while let Some(joined) = forwarders.join_next().await {
        finished += 1;
        match joined {
            Ok(true) => delivered += 1,
            Ok(false) => {}
            Err(e) => error!("Forwarding worker failed: {e}"),
        }
    }

    debug!(expected, finished, delivered, "fan-in drained");
    drop(out);
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
