//! Exponential backoff for traceability service requests.
//!
//! Only transport failures (connection refused, timeouts) are retried.
//! Any HTTP response, including a 4xx or 5xx, is returned to the caller
//! on the first attempt.

use std::time::Duration;

/// Delay before the first retry; doubles on each subsequent one.
const BASE_DELAY_MS: u64 = 200;

/// Send a request, retrying transport errors up to `max_retries` times.
///
/// `send` is called at most `max_retries + 1` times. Delays run
/// 200ms, 400ms, 800ms, ... between attempts.
pub(crate) async fn retry_send<F, Fut>(
    max_retries: u32,
    send: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        match send().await {
            Ok(resp) => return Ok(resp),
            Err(e) if attempt < max_retries => {
                let delay = backoff(attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries,
                    ?delay,
                    error = %e,
                    "traceability request failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS.saturating_mul(2u64.saturating_pow(attempt)))
}
