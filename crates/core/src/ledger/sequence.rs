//! Journal entry numbering.
//!
//! Numbers are strictly increasing. They may have gaps: a number drawn for a
//! write that then fails is not handed out again.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

use super::error::{LedgerError, LedgerResult};

/// Source of entry numbers.
#[async_trait]
pub trait EntrySequence: Send + Sync {
    /// Draws the next number.
    async fn next_value(&self) -> LedgerResult<u64>;
}

/// Process-local sequence backed by an atomic counter.
#[derive(Debug)]
pub struct AtomicEntrySequence {
    next: AtomicU64,
}

impl AtomicEntrySequence {
    /// Sequence whose first value is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Sequence whose first value is `first`.
    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for AtomicEntrySequence {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntrySequence for AtomicEntrySequence {
    async fn next_value(&self) -> LedgerResult<u64> {
        let mut current = self.next.load(Ordering::Acquire);
        loop {
            let following = current
                .checked_add(1)
                .ok_or_else(|| LedgerError::Storage("entry number sequence exhausted".to_string()))?;
            match self.next.compare_exchange_weak(
                current,
                following,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(current),
                Err(actual) => current = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_sequence_starts_at_one() {
        let seq = AtomicEntrySequence::new();
        assert_eq!(seq.next_value().await.unwrap(), 1);
        assert_eq!(seq.next_value().await.unwrap(), 2);
        assert_eq!(seq.next_value().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_sequence_exhaustion() {
        let seq = AtomicEntrySequence::starting_at(u64::MAX);
        assert!(matches!(seq.next_value().await, Err(LedgerError::Storage(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_draws_are_unique() {
        let seq = Arc::new(AtomicEntrySequence::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let seq = Arc::clone(&seq);
            handles.push(tokio::spawn(async move {
                let mut drawn = Vec::new();
                for _ in 0..100 {
                    drawn.push(seq.next_value().await.unwrap());
                }
                drawn
            }));
        }

        let mut all = HashSet::new();
        for handle in handles {
            let drawn = handle.await.unwrap();
            assert!(drawn.windows(2).all(|w| w[0] < w[1]));
            all.extend(drawn);
        }
        assert_eq!(all.len(), 800);
        assert_eq!(all.iter().max(), Some(&800));
    }
}
