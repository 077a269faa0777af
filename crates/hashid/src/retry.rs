//! Bounded search for a random identifier nobody in this process has seen.

use tracing::warn;

use crate::id::time_ordered_uuid;

/// Candidates examined before giving up.
pub const RETRY_LIMIT: usize = 1000;

/// Supplies candidate identifiers to [`allocate`].
pub trait CandidateSource: Send + Sync {
    fn next_candidate(&self) -> String;
}

/// Production source: UUIDv7 strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOrderedUuids;

impl CandidateSource for TimeOrderedUuids {
    fn next_candidate(&self) -> String {
        time_ordered_uuid()
    }
}

impl<F> CandidateSource for F
where
    F: Fn() -> String + Send + Sync,
{
    fn next_candidate(&self) -> String {
        self()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allocation {
    Fresh { id: String, attempts: usize },
    Exhausted { attempts: usize },
}

impl Allocation {
    pub fn attempts(&self) -> usize {
        match self {
            Allocation::Fresh { attempts, .. } | Allocation::Exhausted { attempts } => *attempts,
        }
    }
}

/// Draws up to `limit` candidates and returns the first one `is_taken` rejects.
pub fn allocate(
    source: &dyn CandidateSource,
    is_taken: impl Fn(&str) -> bool,
    limit: usize,
) -> Allocation {
    let mut attempts = 0;
    while attempts < limit {
        let candidate = source.next_candidate();
        attempts += 1;
        if !is_taken(&candidate) {
            return Allocation::Fresh {
                id: candidate,
                attempts,
            };
        }
        warn!(%candidate, attempts, "random id collided with an observed id");
    }
    Allocation::Exhausted { attempts }
}
