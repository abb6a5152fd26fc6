//! Global concurrency gate for filter fetches

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting gate bounding simultaneously in-flight filter fetches.
///
/// One gate is built per walk and cloned into every traversal branch; at most
/// `capacity` permits exist across the whole traversal. Waiting suspends only
/// the branch that called [`FetchGate::acquire`]. No fairness is guaranteed
/// among waiting branches.
#[derive(Clone)]
pub struct FetchGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl FetchGate {
    /// Creates a gate admitting at most `capacity` concurrent fetches.
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits for a free slot.
    ///
    /// The returned permit releases its slot when dropped, on every exit
    /// path. The semaphore is never closed, so acquisition cannot fail.
    pub async fn acquire(&self) -> OwnedSemaphorePermit {
        self.semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("fetch gate semaphore closed")
    }

    /// The fixed capacity this gate was built with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
