use crate::{
  collection::block_deque::{BlockDeque, BlockDequeError, position::Position},
  misc::hints::_unlikely_elem,
};

/// [`Cursor`] that walks from the front to the back.
pub type ForwardCursor = Cursor<false>;
/// [`Cursor`] that walks from the back to the front.
pub type BackwardCursor = Cursor<true>;

/// Fail-fast iteration that doesn't hold a borrow of the deque between steps.
///
/// The shape of the deque and its number of structural modifications are recorded at creation
/// and compared with the current ones at each step. A cursor is meant to be used with the deque
/// that created it. Deques with a different shape are rejected like modified ones, deques that
/// only share the same shape are walked without panicking.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<const IS_BACK: bool> {
  position: Position,
  remaining: usize,
  snapshot: Snapshot,
}

impl<const IS_BACK: bool> Cursor<IS_BACK> {
  pub(crate) const fn new(position: Position, snapshot: Snapshot) -> Self {
    Self { position, remaining: snapshot.len, snapshot }
  }

  /// If there are elements left to visit. Modifications are not checked here.
  #[inline]
  pub const fn has_next(&self) -> bool {
    self.remaining > 0
  }

  /// Number of elements left to visit.
  #[inline]
  pub const fn remaining(&self) -> usize {
    self.remaining
  }

  /// Returns the next element, or `None` if every element was already visited.
  ///
  /// Returns [`BlockDequeError::MutatedDuringIteration`] if `deque` was structurally modified
  /// after the creation of this cursor. The cursor is exhausted afterwards.
  #[inline]
  pub fn next<'deque, T>(
    &mut self,
    deque: &'deque BlockDeque<T>,
  ) -> crate::Result<Option<&'deque T>> {
    if self.snapshot != deque.snapshot() {
      return self.mismatch();
    }
    if self.remaining == 0 {
      return Ok(None);
    }
    let arena = deque.arena();
    let Some(elem) = arena.checked_get(self.position) else {
      return self.mismatch();
    };
    self.remaining = self.remaining.wrapping_sub(1);
    if self.remaining > 0 {
      let is_valid = if IS_BACK {
        self.position.checked_retreat(arena)
      } else {
        self.position.checked_advance(arena)
      };
      if !is_valid {
        return self.mismatch();
      }
    }
    Ok(Some(elem))
  }

  fn mismatch<R>(&mut self) -> crate::Result<R> {
    self.remaining = 0;
    _unlikely_elem(Err(BlockDequeError::MutatedDuringIteration.into()))
  }
}

/// Structural fields of a deque at a given moment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot {
  pub(crate) left_block: usize,
  pub(crate) left_idx: usize,
  pub(crate) len: usize,
  pub(crate) right_block: usize,
  pub(crate) right_end: usize,
  pub(crate) state: u64,
}
