use crate::collection::BlockDequeError;
use core::fmt::{Debug, Display, Formatter};

/// Grouped individual errors
#[derive(Debug)]
pub enum Error {
  // External
  //
  /// A global `tracing` subscriber was already installed.
  #[cfg(feature = "_tracing-tree")]
  TryInitError(tracing_subscriber::util::TryInitError),

  // Internal
  //
  /// See [`BlockDequeError`].
  BlockDequeError(BlockDequeError),
}

impl Display for Error {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    <Self as Debug>::fmt(self, f)
  }
}

impl core::error::Error for Error {}

impl From<Error> for () {
  #[inline]
  fn from(_: Error) -> Self {}
}

#[cfg(feature = "_tracing-tree")]
impl From<tracing_subscriber::util::TryInitError> for Error {
  #[inline]
  fn from(from: tracing_subscriber::util::TryInitError) -> Self {
    Self::TryInitError(from)
  }
}

// Internal

impl From<BlockDequeError> for Error {
  #[inline]
  fn from(from: BlockDequeError) -> Self {
    Self::BlockDequeError(from)
  }
}
