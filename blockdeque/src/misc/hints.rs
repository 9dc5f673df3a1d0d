/// Marks the surrounding path as cold. Used to wrap the error branches of operations whose
/// success is the common case.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) const fn _unlikely_elem<T>(elem: T) -> T {
  elem
}

/// A link or slot that the block chain invariants guarantee to exist was not found.
#[allow(clippy::panic, reason = "broken chain invariants are programming errors")]
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) const fn _unlikely_unreachable() -> ! {
  panic!("The block chain of a deque is corrupted, which is likely a programming error");
}
