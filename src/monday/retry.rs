//! Retry with capped exponential backoff.

use log::*;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// How often and how patiently a failed request is repeated.
///
/// The delay before retry `n` (counting from zero) is
/// `min(base_delay * 2^n, max_delay)`.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Policy that never retries.
    ///
    pub const fn none() -> Self {
        RetryPolicy {
            retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Policy that retries with the same delay every time.
    ///
    pub const fn fixed(retries: u32, delay: Duration) -> Self {
        RetryPolicy {
            retries,
            base_delay: delay,
            max_delay: delay,
        }
    }

    /// Returns the delay to wait after the failed attempt with the given
    /// zero-based index.
    ///
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Run the operation until it succeeds or the retries are used up,
    /// sleeping between attempts. Returns the last error on exhaustion.
    ///
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.retries => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        "{} failed (attempt {} of {}): {}. Retrying in {:?}...",
                        label,
                        attempt + 1,
                        self.retries + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!("{} failed after {} attempt(s): {}", label, attempt + 1, e);
                    return Err(e);
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            retries: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_delay_doubles_until_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(1), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(4000));
        assert_eq!(policy.delay_for(4), Duration::from_millis(16000));
        assert_eq!(policy.delay_for(5), Duration::from_millis(30000));
        assert_eq!(policy.delay_for(40), Duration::from_millis(30000));
    }

    #[test]
    fn test_fixed_policy_delay() {
        let policy = RetryPolicy::fixed(1, Duration::from_millis(1000));
        assert_eq!(policy.delay_for(0), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_run_retries_until_success() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::fixed(3, Duration::from_millis(1));
        let result: Result<u32, String> = policy
            .run("test", || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(format!("failure {}", n))
                } else {
                    Ok(n)
                }
            })
            .await;
        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_run_gives_up_after_retries() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::fixed(3, Duration::from_millis(1));
        let result: Result<(), String> = policy
            .run("test", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("down".to_string())
            })
            .await;
        assert_eq!(result, Err("down".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_none_policy_runs_once() {
        let calls = AtomicU32::new(0);
        let result: Result<(), String> = RetryPolicy::none()
            .run("test", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("down".to_string())
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
