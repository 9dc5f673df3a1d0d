use crate::collection::block_deque::{arena::BlockArena, block::BLOCKLEN};

/// Physical location of an element: block index inside the arena and slot inside the block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Position {
  pub(crate) block: usize,
  pub(crate) offset: usize,
}

impl Position {
  pub(crate) const fn new(block: usize, offset: usize) -> Self {
    Self { block, offset }
  }

  /// Moves to the next slot, following `right_link` at the end of a block.
  ///
  /// Must only be called when an element exists after the current one.
  pub(crate) fn advance<T>(&mut self, arena: &BlockArena<T>) {
    self.offset = self.offset.wrapping_add(1);
    if self.offset == BLOCKLEN {
      self.block = arena.right_of(self.block);
      self.offset = 0;
    }
  }

  /// Moves to the previous slot, following `left_link` at the beginning of a block.
  ///
  /// Must only be called when an element exists before the current one.
  pub(crate) fn retreat<T>(&mut self, arena: &BlockArena<T>) {
    if self.offset == 0 {
      self.block = arena.left_of(self.block);
      self.offset = BLOCKLEN;
    }
    self.offset = self.offset.wrapping_sub(1);
  }

  /// Version of [`Self::advance`] that reports a missing link instead of panicking.
  pub(crate) fn checked_advance<T>(&mut self, arena: &BlockArena<T>) -> bool {
    let offset = self.offset.wrapping_add(1);
    if offset < BLOCKLEN {
      self.offset = offset;
      return true;
    }
    let Some(block) = arena.checked_link(self.block, true) else {
      return false;
    };
    *self = Self::new(block, 0);
    true
  }

  /// Version of [`Self::retreat`] that reports a missing link instead of panicking.
  pub(crate) fn checked_retreat<T>(&mut self, arena: &BlockArena<T>) -> bool {
    if let Some(offset) = self.offset.checked_sub(1) {
      self.offset = offset;
      return true;
    }
    let Some(block) = arena.checked_link(self.block, false) else {
      return false;
    };
    *self = Self::new(block, BLOCKLEN.wrapping_sub(1));
    true
  }
}
