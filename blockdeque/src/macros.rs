macro_rules! _debug {
  ($($tt:tt)+) => {
    #[cfg(feature = "tracing")]
    tracing::debug!($($tt)+);
  };
}

macro_rules! _trace {
  ($($tt:tt)+) => {
    #[cfg(feature = "tracing")]
    tracing::trace!($($tt)+);
  };
}

macro_rules! doc_empty_deque {
  () => {
    "Returns [`crate::collection::BlockDequeError::EmptyDeque`] if the queue has no elements."
  };
}

macro_rules! doc_out_of_bounds_idx {
  () => {
    "Returns [`crate::collection::BlockDequeError::OutOfBoundsIndex`] if `idx` does not point to \
     an existing element."
  };
}
