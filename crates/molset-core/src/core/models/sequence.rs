use super::ids::MoleculeId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

static GLOBAL_SEQUENCE: LazyLock<Arc<IdSequence>> = LazyLock::new(|| Arc::new(IdSequence::new()));

/// A monotonically increasing generator of [`MoleculeId`]s.
///
/// Every call to [`next_id`](Self::next_id) returns the current value and then advances
/// the counter by one. Values are never reset or reclaimed, so an identifier stays unique
/// even after the molecule carrying it has been dropped. The counter is atomic; sets
/// living on different threads may share one sequence through an `Arc`.
///
/// The last identifier handed out is `u64::MAX - 1`; asking for another one panics
/// instead of wrapping.
#[derive(Debug, Default)]
pub struct IdSequence {
    next: AtomicU64,
}

impl IdSequence {
    /// Creates a sequence whose first identifier is `0`.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a sequence whose first identifier is `first`.
    ///
    /// # Arguments
    ///
    /// * `first` - The value returned by the first call to [`next_id`](Self::next_id).
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Returns the process-wide sequence used by [`MoleculeSet::new`](super::set::MoleculeSet::new).
    ///
    /// It is created on first use, starts at `0`, and lives for the rest of the process.
    pub fn global() -> Arc<IdSequence> {
        Arc::clone(&GLOBAL_SEQUENCE)
    }

    /// Hands out the next identifier (post-increment).
    ///
    /// # Panics
    ///
    /// Panics once the counter would have to step past `u64::MAX`; the sequence never
    /// wraps around to hand out an identifier a second time.
    pub fn next_id(&self) -> MoleculeId {
        match self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| v.checked_add(1))
        {
            Ok(issued) => MoleculeId(issued),
            Err(_) => panic!("molecule identifier sequence exhausted"),
        }
    }

    /// The identifier the next call to [`next_id`](Self::next_id) would return.
    pub fn peek(&self) -> MoleculeId {
        MoleculeId(self.next.load(Ordering::Relaxed))
    }
}
