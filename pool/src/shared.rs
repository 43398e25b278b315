//! A pool behind one exclusive-access boundary, for multi-threaded hosts.

use crate::engine::StakingPool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle that serializes every call into the wrapped pool.
///
/// Pool operations never leave partial state behind when they fail, so a
/// lock poisoned by a panicking listener is recovered rather than propagated.
pub struct SharedPool<L, C> {
    inner: Arc<Mutex<StakingPool<L, C>>>,
}

impl<L, C> SharedPool<L, C> {
    pub fn new(pool: StakingPool<L, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// Exclusive access for the lifetime of the guard.
    pub fn lock(&self) -> MutexGuard<'_, StakingPool<L, C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access and return its result.
    pub fn with<R>(&self, f: impl FnOnce(&mut StakingPool<L, C>) -> R) -> R {
        f(&mut self.lock())
    }
}

impl<L, C> Clone for SharedPool<L, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
