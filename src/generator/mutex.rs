//! Mutex type aliases, switching between `std::sync::Mutex` and
//! `parking_lot::Mutex` behind the `parking-lot` feature. Generalizes the
//! pattern so the rest of the generator module never branches on the
//! feature itself.

#[cfg(feature = "parking-lot")]
pub(crate) type Mutex<T> = parking_lot::Mutex<T>;
#[cfg(feature = "parking-lot")]
pub(crate) type MutexGuard<'a, T> = parking_lot::MutexGuard<'a, T>;

#[cfg(not(feature = "parking-lot"))]
pub(crate) type Mutex<T> = std::sync::Mutex<T>;
#[cfg(not(feature = "parking-lot"))]
pub(crate) type MutexGuard<'a, T> = std::sync::MutexGuard<'a, T>;

#[cfg(feature = "parking-lot")]
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock()
}

#[cfg(not(feature = "parking-lot"))]
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
