use std::future::Future;
use std::time::Duration;

use log::warn;

use crate::error::{JobkeeperError, Result};

pub const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Runs `op` until it succeeds or `max_attempts` failures have accumulated.
///
/// Attempts are separated by a short fixed delay and each failure is logged
/// with its attempt count. Exhaustion is reported as a distinct error so
/// callers can tell a worn-out retry loop from a single failure.
pub async fn with_retry<T, F, Fut>(max_attempts: u32, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if attempt >= max_attempts {
                    return Err(JobkeeperError::RetriesExhausted {
                        attempts: max_attempts,
                        source: Box::new(err),
                    });
                }
                warn!(
                    "Kubernetes API call failed ({err}), retrying in {}s ({attempt}/{max_attempts})...",
                    RETRY_DELAY.as_secs()
                );
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}
