//! Nonce generation for Kraken API authentication.
//!
//! Kraken requires a strictly increasing nonce for each authenticated request
//! made with the same API key. The nonce is written as the first form field of
//! every private request and covered by the signature.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing nonces for authenticated requests.
///
/// Each value must be greater than any value previously returned.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    fn next_nonce(&self) -> u64;
}

/// Time-based nonce: milliseconds since the UNIX epoch, bumped by one when
/// two requests land in the same millisecond.
#[derive(Debug, Default)]
pub struct IncreasingNonce {
    last: AtomicU64,
}

impl IncreasingNonce {
    /// Create a new increasing nonce provider.
    pub fn new() -> Self {
        Self::default()
    }

    fn now_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let now = Self::now_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }
}

/// Counter nonce starting at a fixed value.
///
/// Useful when a key's nonce window is managed externally, and for
/// reproducing signed requests byte for byte.
#[derive(Debug)]
pub struct CounterNonce {
    next: AtomicU64,
}

impl CounterNonce {
    /// Start counting at `start`.
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl NonceProvider for CounterNonce {
    fn next_nonce(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_nonce_strictly_increasing() {
        let provider = IncreasingNonce::new();

        let mut last = 0u64;
        for _ in 0..1000 {
            let nonce = provider.next_nonce();
            assert!(nonce > last, "Nonce must be strictly increasing");
            last = nonce;
        }
    }

    #[test]
    fn test_nonce_is_millisecond_scale() {
        let nonce = IncreasingNonce::new().next_nonce();
        // 2020-09-13 in milliseconds; a microsecond nonce would be 1000x larger.
        assert!(nonce > 1_600_000_000_000);
        assert!(nonce < 100_000_000_000_000);
    }

    #[test]
    fn test_nonce_unique_across_threads() {
        let provider = Arc::new(IncreasingNonce::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let p = provider.clone();
                thread::spawn(move || (0..1000).map(|_| p.next_nonce()).collect::<Vec<_>>())
            })
            .collect();

        let mut all_nonces = HashSet::new();
        for handle in handles {
            for nonce in handle.join().unwrap() {
                assert!(all_nonces.insert(nonce), "Nonce must be unique across threads");
            }
        }
    }

    #[test]
    fn test_counter_nonce() {
        let provider = CounterNonce::starting_at(1_700_000_000_000);
        assert_eq!(provider.next_nonce(), 1_700_000_000_000);
        assert_eq!(provider.next_nonce(), 1_700_000_000_001);
    }
}
