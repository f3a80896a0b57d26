// src/fetch/throttle.rs

use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

use super::FetchError;

/// Courtesy throttle between outbound fetches.
///
/// A single task owns the last-fetch timestamp; callers queue on a channel and
/// are released one at a time, at least `spacing` apart.
#[derive(Clone)]
pub struct Throttle {
    tx: mpsc::Sender<oneshot::Sender<()>>,
}

impl Throttle {
    /// Spawn the gate task. Must be called from within a tokio runtime.
    pub fn spawn(spacing: Duration) -> Self {
        let (tx, mut rx) = mpsc::channel::<oneshot::Sender<()>>(64);

        tokio::spawn(async move {
            let mut last: Option<Instant> = None;
            while let Some(reply) = rx.recv().await {
                if let Some(prev) = last {
                    let ready = prev + spacing;
                    if ready > Instant::now() {
                        trace!(wait_ms = (ready - Instant::now()).as_millis() as u64, "throttling");
                        sleep_until(ready).await;
                    }
                }
                last = Some(Instant::now());
                // caller may have gone away; its slot is spent either way
                let _ = reply.send(());
            }
            debug!("throttle closed");
        });

        Self { tx }
    }

    /// Wait for this caller's turn to fetch.
    pub async fn acquire(&self) -> Result<(), FetchError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(reply_tx)
            .await
            .map_err(|_| FetchError::ThrottleClosed)?;
        reply_rx.await.map_err(|_| FetchError::ThrottleClosed)
    }
}
