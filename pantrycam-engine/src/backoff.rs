use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Delay after failed attempt `attempt` (0-indexed): `2^attempt * base`.
pub fn delay_for_attempt(attempt: u32, base: Duration) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// Runs `op` up to `max_attempts` times with the default 1s base delay.
pub async fn execute<T, E, F, Fut>(op: F, max_attempts: u32) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    execute_with_base(op, max_attempts, DEFAULT_BASE_DELAY).await
}

/// Retries `op` with pure exponential backoff, no jitter.
///
/// The last attempt's error is returned unchanged. A `max_attempts` of 0 is
/// treated as 1. The delay between attempts cannot be cancelled.
pub async fn execute_with_base<T, E, F, Fut>(
    mut op: F,
    max_attempts: u32,
    base: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt + 1 >= max_attempts => return Err(e),
            Err(e) => {
                let delay = delay_for_attempt(attempt, base);
                log::warn!(
                    "attempt {}/{} failed: {e}; retrying in {}ms",
                    attempt + 1,
                    max_attempts,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[test]
    fn delays_double() {
        let base = DEFAULT_BASE_DELAY;
        assert_eq!(delay_for_attempt(0, base), Duration::from_millis(1000));
        assert_eq!(delay_for_attempt(1, base), Duration::from_millis(2000));
        assert_eq!(delay_for_attempt(2, base), Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn waits_exact_delays_between_attempts() {
        let start = Instant::now();
        let calls = Arc::new(std::sync::Mutex::new(Vec::new()));

        let seen = calls.clone();
        let res: Result<(), String> = execute(
            move || {
                let seen = seen.clone();
                async move {
                    seen.lock().unwrap().push(start.elapsed());
                    Err("down".to_string())
                }
            },
            4,
        )
        .await;

        assert_eq!(res, Err("down".to_string()));
        let calls = calls.lock().unwrap();
        let gaps: Vec<u128> = calls.windows(2).map(|w| (w[1] - w[0]).as_millis()).collect();
        assert_eq!(gaps, vec![1000, 2000, 4000]);
    }

    #[tokio::test(start_paused = true)]
    async fn never_exceeds_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let res: Result<(), String> = execute(
            move || {
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    Err(format!("failure {n}"))
                }
            },
            DEFAULT_MAX_ATTEMPTS,
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // The final error propagates unchanged.
        assert_eq!(res, Err("failure 2".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn returns_first_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let start = Instant::now();

        let res: Result<u32, String> = execute(
            move || {
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    if n < 2 { Err("flaky".into()) } else { Ok(n) }
                }
            },
            3,
        )
        .await;

        assert_eq!(res, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed().as_millis(), 3000);
    }

    #[tokio::test(start_paused = true)]
    async fn single_attempt_does_not_sleep() {
        let start = Instant::now();
        let res: Result<(), &str> = execute(|| async { Err("nope") }, 1).await;
        assert_eq!(res, Err("nope"));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
