use crate::{
  collection::block_deque::{
    block::{BLOCKLEN, Block, MAXFREEBLOCKS},
    position::Position,
  },
  misc::hints::_unlikely_unreachable,
};
use alloc::{boxed::Box, vec::Vec};
use arrayvec::ArrayVec;
use core::mem;

/// Owner of all the blocks of a deque.
///
/// Blocks live in `slots` and refer to their neighbours through slot indices. `slots` only holds
/// blocks that are in use, a released block is swapped with the last one, which is then relinked
/// under its new index. Vacated blocks are parked in `free` while there is room.
pub(crate) struct BlockArena<T> {
  free: ArrayVec<Box<Block<T>>, MAXFREEBLOCKS>,
  slots: Vec<Box<Block<T>>>,
}

impl<T> BlockArena<T> {
  pub(crate) const fn new() -> Self {
    Self { free: ArrayVec::new_const(), slots: Vec::new() }
  }

  pub(crate) fn block(&self, idx: usize) -> &Block<T> {
    match self.slots.get(idx) {
      Some(elem) => elem,
      None => _unlikely_unreachable(),
    }
  }

  pub(crate) fn block_mut(&mut self, idx: usize) -> &mut Block<T> {
    match self.slots.get_mut(idx) {
      Some(elem) => elem,
      None => _unlikely_unreachable(),
    }
  }

  /// Number of blocks that are currently in use.
  #[cfg(any(feature = "tracing", kani, test))]
  pub(crate) fn blocks_len(&self) -> usize {
    self.slots.len()
  }

  /// Drops every element of the block.
  pub(crate) fn clear_block(&mut self, idx: usize) {
    self.block_mut(idx).data.fill_with(|| None);
  }

  /// Mutable slices of the live slots, ordered from the left end to the right end.
  pub(crate) fn chain_slices_mut(
    &mut self,
    (left_block, left_idx): (usize, usize),
    (right_block, right_end): (usize, usize),
  ) -> Vec<&mut [Option<T>]> {
    let mut chain = Vec::new();
    let mut curr = Some(left_block);
    while let Some(idx) = curr {
      chain.push(idx);
      curr = if idx == right_block { None } else { self.block(idx).right_link };
    }
    let mut blocks: Vec<Option<&mut Block<T>>> =
      self.slots.iter_mut().map(|elem| Some(&mut **elem)).collect();
    let mut rslt = Vec::with_capacity(chain.len());
    for idx in chain {
      let Some(block) = blocks.get_mut(idx).and_then(Option::take) else {
        _unlikely_unreachable();
      };
      let begin = if idx == left_block { left_idx } else { 0 };
      let end = if idx == right_block { right_end } else { BLOCKLEN };
      match block.data.get_mut(begin..end) {
        Some(elem) => rslt.push(elem),
        None => _unlikely_unreachable(),
      }
    }
    rslt
  }

  /// Like [`Self::block`] followed by a link lookup, without panicking on unknown indices.
  pub(crate) fn checked_link(&self, idx: usize, is_right: bool) -> Option<usize> {
    let block = self.slots.get(idx)?;
    if is_right { block.right_link } else { block.left_link }
  }

  /// Like [`Self::get`], without panicking on unknown indices.
  pub(crate) fn checked_get(&self, pos: Position) -> Option<&T> {
    self.slots.get(pos.block)?.data.get(pos.offset)?.as_ref()
  }

  /// Takes a block from the pool or allocates a new one. The returned block has no links.
  pub(crate) fn new_block(&mut self) -> usize {
    let block = if let Some(elem) = self.free.pop() {
      _trace!(free_blocks = self.free.len(), "Reusing a pooled block");
      elem
    } else {
      _trace!(blocks = self.blocks_len(), "Allocating a new block");
      Box::new(Block::new())
    };
    let idx = self.slots.len();
    self.slots.push(block);
    idx
  }

  /// Releases a block that no other block links to anymore, keeping it for reuse if the pool has
  /// room.
  ///
  /// The last block takes the place of the released one. In that case the previous and the new
  /// index of the moved block are returned so that outer references can be updated.
  pub(crate) fn free_block(&mut self, idx: usize) -> Option<(usize, usize)> {
    if idx >= self.slots.len() {
      _unlikely_unreachable();
    }
    let last = self.slots.len().wrapping_sub(1);
    let mut block = self.slots.swap_remove(idx);
    block.left_link = None;
    block.right_link = None;
    if self.free.try_push(block).is_ok() {
      _trace!(free_blocks = self.free.len(), "Recycling a vacated block");
    } else {
      _trace!("Releasing a vacated block");
    }
    if idx == last {
      return None;
    }
    let moved = self.block(idx);
    let (left_link, right_link) = (moved.left_link, moved.right_link);
    if let Some(left) = left_link {
      self.block_mut(left).right_link = Some(idx);
    }
    if let Some(right) = right_link {
      self.block_mut(right).left_link = Some(idx);
    }
    Some((last, idx))
  }

  /// Index of the block at the left of `idx`, which must exist.
  pub(crate) fn left_of(&self, idx: usize) -> usize {
    match self.block(idx).left_link {
      Some(elem) => elem,
      None => _unlikely_unreachable(),
    }
  }

  /// Index of the block at the right of `idx`, which must exist.
  pub(crate) fn right_of(&self, idx: usize) -> usize {
    match self.block(idx).right_link {
      Some(elem) => elem,
      None => _unlikely_unreachable(),
    }
  }

  /// Number of blocks waiting in the pool.
  #[cfg(any(kani, test))]
  pub(crate) fn free_blocks_len(&self) -> usize {
    self.free.len()
  }

  pub(crate) fn get(&self, pos: Position) -> Option<&T> {
    self.block(pos.block).data.get(pos.offset)?.as_ref()
  }

  pub(crate) fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
    self.block_mut(pos.block).data.get_mut(pos.offset)?.as_mut()
  }

  /// Links `left` and `right` as neighbours.
  pub(crate) fn link(&mut self, left: usize, right: usize) {
    self.block_mut(left).right_link = Some(right);
    self.block_mut(right).left_link = Some(left);
  }

  /// Writes `elem` into `pos`, returning the previous content.
  pub(crate) fn put(&mut self, pos: Position, elem: Option<T>) -> Option<T> {
    match self.block_mut(pos.block).data.get_mut(pos.offset) {
      Some(slot) => mem::replace(slot, elem),
      None => _unlikely_unreachable(),
    }
  }

  pub(crate) fn swap(&mut self, a: Position, b: Position) {
    let a_elem = self.take(a);
    let b_elem = self.take(b);
    let _ = self.put(a, b_elem);
    let _ = self.put(b, a_elem);
  }

  pub(crate) fn take(&mut self, pos: Position) -> Option<T> {
    self.block_mut(pos.block).data.get_mut(pos.offset)?.take()
  }

  /// Moves `len` consecutive slots. Neither range can cross a block boundary.
  pub(crate) fn transfer(&mut self, from: Position, to: Position, len: usize) {
    for shift in 0..len {
      let elem = self.take(Position::new(from.block, from.offset.wrapping_add(shift)));
      let _ = self.put(Position::new(to.block, to.offset.wrapping_add(shift)), elem);
    }
  }
}
