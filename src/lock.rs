use std::sync::{Mutex, MutexGuard, PoisonError};

/// Test failures unwind through the stub on purpose, so a poisoned lock
/// still holds consistent state.
pub(crate) fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
