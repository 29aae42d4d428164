//! Optional upper bound on provider calls.

use std::future::Future;
use std::time::Duration;

use tokio::time::error::Elapsed;

/// Awaits `fut`, giving up after `limit` when one is set.
pub(crate) async fn within<F: Future>(limit: Option<Duration>, fut: F) -> Result<F::Output, Elapsed> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut).await,
        None => Ok(fut.await),
    }
}
