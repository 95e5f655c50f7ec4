//! Fan-out/fan-in rounds over independent remote queries.
//!
//! One aggregation round dispatches every query it is given on its own tokio
//! task and collects results over a channel sized to the round, so a send can
//! never block. Results carry the slot index they were dispatched under; the
//! caller scatters them back into its own pre-sized storage by that index and
//! never by looking the parent up again. Every query runs under the
//! configured per-query timeout. On the first failure the round cancels a
//! shared token, so in-flight workers abandon both their remote call and
//! their send instead of running to completion for a consumer that has
//! stopped caring.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::{MgmtError, Result};

/// Run one remote query under the per-query timeout.
pub async fn single<T, Fut>(query: Fut, timeout: Duration) -> Result<T>
where
    Fut: Future<Output = quarryfs_cluster::Result<T>>,
{
    match tokio::time::timeout(timeout, query).await {
        Ok(outcome) => outcome.map_err(MgmtError::from),
        Err(_) => Err(MgmtError::QueryTimeout {
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}

/// Dispatch every query concurrently and gather one result per slot.
///
/// Returns the gathered values in dispatch order. The first failure wins,
/// a query outliving `timeout` counting as a failure of that slot: it is
/// returned after all other workers have either reported or observed
/// cancellation, so no task outlives the round.
pub async fn gather<T, Fut>(queries: Vec<Fut>, timeout: Duration) -> Result<Vec<T>>
where
    T: Send + 'static,
    Fut: Future<Output = quarryfs_cluster::Result<T>> + Send + 'static,
{
    let total = queries.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let timeout_ms = timeout.as_millis() as u64;
    let (tx, mut rx) = mpsc::channel::<(usize, Result<T>)>(total);
    let token = CancellationToken::new();

    for (slot, query) in queries.into_iter().enumerate() {
        let tx = tx.clone();
        let token = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                outcome = tokio::time::timeout(timeout, query) => {
                    let outcome = match outcome {
                        Ok(result) => result.map_err(MgmtError::from),
                        Err(_) => Err(MgmtError::QueryTimeout { timeout_ms }),
                    };
                    let _ = tx.send((slot, outcome)).await;
                }
            }
        });
    }
    drop(tx);

    let mut slots: Vec<Option<T>> = Vec::with_capacity(total);
    slots.resize_with(total, || None);
    let mut first_err: Option<MgmtError> = None;
    let mut received = 0usize;

    // The loop ends when every worker has dropped its sender, either after
    // sending or after observing cancellation.
    while let Some((slot, outcome)) = rx.recv().await {
        match outcome {
            Ok(value) => {
                slots[slot] = Some(value);
                received += 1;
            }
            Err(err) => {
                if first_err.is_none() {
                    tracing::debug!(slot, error = %err, "fan-out round failed, cancelling in-flight queries");
                    token.cancel();
                    first_err = Some(err);
                }
            }
        }
    }

    if let Some(err) = first_err {
        return Err(err);
    }

    let gathered: Vec<T> = slots.into_iter().flatten().collect();
    if gathered.len() != total {
        return Err(MgmtError::Incomplete {
            expected: total,
            received,
        });
    }
    Ok(gathered)
}
