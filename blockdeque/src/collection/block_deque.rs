// 1. Layout
//
// Elements live inside fixed-size blocks that are linked in both directions. Every block between
// the two ends is full, only the leftmost and the rightmost blocks can have vacant slots.
//
//    left_block                                            right_block
// |   |   | A | B |  <->  | C | D | E | F |  <->  | G | H |   |   |
//         |                                               |
//         |--> left_idx                                   |--> right_end
//
// `left_idx` is inclusive and `right_end` is exclusive, which means that an empty deque is a
// single block where both indices are equal.
//
// 2. Empty instances
//
// Popping the last element never releases the last block. Indices are moved back to the centre so
// that the next pushes, from any side, don't need an allocation.
//
// |   |   |   |   |   |   |   |   |
//                 |
//                 |--> left_idx == right_end
//
// 3. Blocks
//
// Vacated blocks go to a bounded pool before being released, which keeps alternating pushes and
// pops at the same boundary cheap.

#[cfg(feature = "arbitrary")]
mod arbitrary;
mod arena;
mod block;
mod cursor;
mod iter;
#[cfg(kani)]
mod kani;
mod position;
#[cfg(all(feature = "_proptest", test))]
mod _proptest;
mod rotate;
#[cfg(test)]
mod tests;

use crate::misc::hints::{_unlikely_elem, _unlikely_unreachable};
use arena::BlockArena;
pub use block::{BLOCKLEN, MAXFREEBLOCKS};
use block::{BLOCK_MASK, EMPTY_IDX};
use core::{
  cmp::Ordering,
  fmt::{Debug, Display, Formatter},
  hash::{Hash, Hasher},
  ops::{Bound, Index, IndexMut, RangeBounds},
};
pub use cursor::{BackwardCursor, Cursor, ForwardCursor};
use cursor::Snapshot;
pub use iter::{IntoIter, Iter, IterMut};
use position::Position;

/// Errors of [`BlockDeque`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BlockDequeError {
  /// The queue has no elements.
  EmptyDeque,
  /// An element can't be inserted into a queue that already reached its maximum length.
  FullDeque,
  /// A cursor observed a structural modification that happened after its creation.
  MutatedDuringIteration,
  /// The provided index does not point to valid internal data
  OutOfBoundsIndex {
    /// Received index
    idx: usize,
    /// Number of elements
    len: usize,
  },
  /// No element is equal to the provided value.
  ValueNotFound,
}

impl Display for BlockDequeError {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    <Self as Debug>::fmt(self, f)
  }
}

impl core::error::Error for BlockDequeError {}

/// A double-ended queue implemented with a chain of fixed-size blocks.
///
/// Pushes and pops at both ends are constant-time and never move existing elements. An optional
/// maximum length turns the queue into a bounded buffer where each push that overflows evicts an
/// element from the opposite end.
pub struct BlockDeque<T> {
  arena: BlockArena<T>,
  left_block: usize,
  left_idx: usize,
  len: usize,
  maxlen: Option<usize>,
  right_block: usize,
  right_end: usize,
  state: u64,
}

impl<T> BlockDeque<T> {
  /// Creates a new empty and unbounded instance.
  #[inline]
  pub fn new() -> Self {
    Self::with_maxlen_opt(None)
  }

  /// Creates a new empty instance that will hold at most `maxlen` elements.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::with_maxlen(2);
  /// queue.push_back(1);
  /// queue.push_back(2);
  /// queue.push_back(3);
  /// assert_eq!(queue, [2, 3]);
  /// ```
  #[inline]
  pub fn with_maxlen(maxlen: usize) -> Self {
    Self::with_maxlen_opt(Some(maxlen))
  }

  /// Creates a new instance bounded by `maxlen` and filled with the elements of `ii`. Only the
  /// last `maxlen` elements are retained.
  ///
  /// ```rust
  /// let queue = blockdeque::collection::BlockDeque::with_maxlen_from_iter(4, 1..7);
  /// assert_eq!(queue, [3, 4, 5, 6]);
  /// ```
  #[inline]
  pub fn with_maxlen_from_iter(maxlen: usize, ii: impl IntoIterator<Item = T>) -> Self {
    let mut this = Self::with_maxlen(maxlen);
    this.extend_back(ii);
    this
  }

  /// Returns the last element.
  #[inline]
  pub fn back(&self) -> Option<&T> {
    if self.len == 0 {
      return None;
    }
    self.arena.get(self.last_position())
  }

  /// Mutable version of [`Self::back`].
  #[inline]
  pub fn back_mut(&mut self) -> Option<&mut T> {
    if self.len == 0 {
      return None;
    }
    let pos = self.last_position();
    self.arena.get_mut(pos)
  }

  /// Removes all elements and releases every block except one.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::from([1, 2, 3]);
  /// queue.clear();
  /// assert!(queue.is_empty());
  /// ```
  #[inline]
  pub fn clear(&mut self) {
    if self.len == 0 {
      return;
    }
    _debug!(len = self.len, "Clearing deque");
    while self.right_block != self.left_block {
      let vacated = self.right_block;
      self.right_block = self.arena.left_of(vacated);
      self.arena.block_mut(self.right_block).right_link = None;
      self.arena.clear_block(vacated);
      self.release_block(vacated, &mut None);
    }
    self.arena.clear_block(self.left_block);
    self.recenter();
    self.len = 0;
    self.bump_state();
  }

  /// If the queue has at least one element equal to `elem`.
  #[inline]
  pub fn contains(&self, elem: &T) -> bool
  where
    T: PartialEq,
  {
    self.iter().any(|local| local == elem)
  }

  /// Number of elements equal to `elem`.
  ///
  /// ```rust
  /// let queue = blockdeque::collection::BlockDeque::from([1, 2, 1, 3, 1]);
  /// assert_eq!(queue.count(&1), 3);
  /// ```
  #[inline]
  pub fn count(&self, elem: &T) -> usize
  where
    T: PartialEq,
  {
    self.iter().filter(|local| *local == elem).count()
  }

  /// Front-to-back cursor that detects structural modifications made after its creation.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::from([1, 2]);
  /// let mut cursor = queue.cursor();
  /// assert_eq!(cursor.next(&queue).unwrap(), Some(&1));
  /// queue.push_back(3);
  /// assert!(cursor.next(&queue).is_err());
  /// ```
  #[inline]
  pub fn cursor(&self) -> ForwardCursor {
    Cursor::new(self.first_position(), self.snapshot())
  }

  /// Back-to-front version of [`Self::cursor`].
  #[inline]
  pub fn cursor_rev(&self) -> BackwardCursor {
    Cursor::new(self.last_position(), self.snapshot())
  }

  /// Appends all elements of `ii` to the back of the queue, one by one. A bounded queue only
  /// retains the last `maxlen` elements.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::new();
  /// queue.extend_back([1, 2, 3]);
  /// assert_eq!(queue, [1, 2, 3]);
  /// ```
  #[inline]
  pub fn extend_back(&mut self, ii: impl IntoIterator<Item = T>) {
    let iter = ii.into_iter();
    if self.maxlen == Some(0) {
      iter.for_each(drop);
      return;
    }
    if self.len == 0 {
      self.left_idx = 1;
      self.right_end = 1;
    }
    for elem in iter {
      self.push_back(elem);
    }
  }

  /// Prepends all elements of `ii` to the front of the queue, one by one, which means that they
  /// end up in reverse order.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::from([4]);
  /// queue.extend_front([3, 2, 1]);
  /// assert_eq!(queue, [1, 2, 3, 4]);
  /// ```
  #[inline]
  pub fn extend_front(&mut self, ii: impl IntoIterator<Item = T>) {
    let iter = ii.into_iter();
    if self.maxlen == Some(0) {
      iter.for_each(drop);
      return;
    }
    if self.len == 0 {
      self.left_idx = BLOCKLEN - 1;
      self.right_end = BLOCKLEN - 1;
    }
    for elem in iter {
      self.push_front(elem);
    }
  }

  /// Returns the first element.
  #[inline]
  pub fn front(&self) -> Option<&T> {
    if self.len == 0 {
      return None;
    }
    self.arena.get(self.first_position())
  }

  /// Mutable version of [`Self::front`].
  #[inline]
  pub fn front_mut(&mut self) -> Option<&mut T> {
    if self.len == 0 {
      return None;
    }
    let pos = self.first_position();
    self.arena.get_mut(pos)
  }

  /// Returns a reference to an element given an index counted from the front.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::new();
  /// queue.push_back(1);
  /// queue.push_back(3);
  /// assert_eq!(queue.get(1), Some(&3));
  /// assert_eq!(queue.get(2), None);
  /// ```
  #[inline]
  pub fn get(&self, idx: usize) -> Option<&T> {
    if idx >= self.len {
      return None;
    }
    self.arena.get(self.locate(idx))
  }

  /// Mutable version of [`Self::get`].
  #[inline]
  pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
    if idx >= self.len {
      return None;
    }
    let pos = self.locate(idx);
    self.arena.get_mut(pos)
  }

  /// Index of the first element equal to `elem` that is located inside `range`. The range is
  /// clamped to the current length.
  ///
  /// ```rust
  /// let queue = blockdeque::collection::BlockDeque::from([1, 2, 1, 2]);
  /// assert_eq!(queue.index_of(&2, ..), Some(1));
  /// assert_eq!(queue.index_of(&2, 2..), Some(3));
  /// assert_eq!(queue.index_of(&2, 2..3), None);
  /// ```
  #[inline]
  pub fn index_of<R>(&self, elem: &T, range: R) -> Option<usize>
  where
    R: RangeBounds<usize>,
    T: PartialEq,
  {
    let (start, stop) = self.clamp_range(&range);
    if start >= stop {
      return None;
    }
    let mut idx = start;
    let mut pos = self.locate(start);
    loop {
      if self.arena.get(pos) == Some(elem) {
        return Some(idx);
      }
      idx = idx.wrapping_add(1);
      if idx >= stop {
        return None;
      }
      pos.advance(&self.arena);
    }
  }

  /// Inserts `elem` so that it ends up at index `idx`. Elements of the shorter side are shifted.
  ///
  /// Returns [`BlockDequeError::FullDeque`] if the queue is at its maximum length.
  #[doc = doc_out_of_bounds_idx!()]
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::from([1, 2, 4]);
  /// queue.insert(2, 3).unwrap();
  /// assert_eq!(queue, [1, 2, 3, 4]);
  /// ```
  #[inline]
  pub fn insert(&mut self, idx: usize, elem: T) -> crate::Result<()> {
    let len = self.len;
    if self.maxlen == Some(len) {
      return _unlikely_elem(Err(BlockDequeError::FullDeque.into()));
    }
    if idx > len {
      return _unlikely_elem(Err(BlockDequeError::OutOfBoundsIndex { idx, len }.into()));
    }
    if idx <= len.wrapping_sub(idx) {
      self.push_front(elem);
      let mut pos = self.first_position();
      for _ in 0..idx {
        let mut next = pos;
        next.advance(&self.arena);
        self.arena.swap(pos, next);
        pos = next;
      }
    } else {
      self.push_back(elem);
      let mut pos = self.last_position();
      for _ in idx..len {
        let mut prev = pos;
        prev.retreat(&self.arena);
        self.arena.swap(pos, prev);
        pos = prev;
      }
    }
    Ok(())
  }

  /// If the queue has a maximum length and reached it.
  #[inline]
  pub fn is_full(&self) -> bool {
    self.maxlen == Some(self.len)
  }

  /// Returns `true` if the queue contains no elements.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Returns a front-to-back iterator.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::new();
  /// queue.push_back(1);
  /// queue.push_front(3);
  /// let mut iter = queue.iter();
  /// assert_eq!(iter.next(), Some(&3));
  /// assert_eq!(iter.next(), Some(&1));
  /// assert_eq!(iter.next(), None);
  /// ```
  #[inline]
  pub fn iter(&self) -> Iter<'_, T> {
    Iter::new(&self.arena, self.first_position(), self.last_position(), self.len)
  }

  /// Mutable version of [`Self::iter`].
  #[inline]
  pub fn iter_mut(&mut self) -> IterMut<'_, T> {
    let slices = self
      .arena
      .chain_slices_mut((self.left_block, self.left_idx), (self.right_block, self.right_end));
    IterMut::new(slices, self.len)
  }

  /// Index of the last element equal to `elem` that is located inside `range`. The range is
  /// clamped to the current length.
  ///
  /// ```rust
  /// let queue = blockdeque::collection::BlockDeque::from([1, 2, 1, 2]);
  /// assert_eq!(queue.last_index_of(&1, ..), Some(2));
  /// assert_eq!(queue.last_index_of(&1, ..2), Some(0));
  /// ```
  #[inline]
  pub fn last_index_of<R>(&self, elem: &T, range: R) -> Option<usize>
  where
    R: RangeBounds<usize>,
    T: PartialEq,
  {
    let (start, stop) = self.clamp_range(&range);
    if start >= stop {
      return None;
    }
    let mut idx = stop.wrapping_sub(1);
    let mut pos = self.locate(idx);
    loop {
      if self.arena.get(pos) == Some(elem) {
        return Some(idx);
      }
      if idx == start {
        return None;
      }
      idx = idx.wrapping_sub(1);
      pos.retreat(&self.arena);
    }
  }

  /// Returns the number of elements.
  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  /// Maximum number of elements, if any.
  #[inline]
  pub fn maxlen(&self) -> Option<usize> {
    self.maxlen
  }

  /// Appends an element to the back and reports whether it was retained, which only fails to
  /// happen when the maximum length is zero.
  #[inline]
  pub fn offer_back(&mut self, elem: T) -> bool {
    let retained = self.maxlen != Some(0);
    self.push_back(elem);
    retained
  }

  /// Prepends an element to the front and reports whether it was retained, which only fails to
  /// happen when the maximum length is zero.
  #[inline]
  pub fn offer_front(&mut self, elem: T) -> bool {
    let retained = self.maxlen != Some(0);
    self.push_front(elem);
    retained
  }

  /// Removes the last element from the queue and returns it, or `None` if it is empty.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::from([1, 3]);
  /// assert_eq!(queue.pop_back(), Some(3));
  /// assert_eq!(queue, [1]);
  /// ```
  #[inline]
  pub fn pop_back(&mut self) -> Option<T> {
    if self.len == 0 {
      return None;
    }
    self.pop_back_slot()
  }

  /// Removes the first element and returns it, or `None` if the queue is empty.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::from([1, 3]);
  /// assert_eq!(queue.pop_front(), Some(1));
  /// assert_eq!(queue, [3]);
  /// ```
  #[inline]
  pub fn pop_front(&mut self) -> Option<T> {
    if self.len == 0 {
      return None;
    }
    self.pop_front_slot()
  }

  /// Appends an element to the back of the queue. If the maximum length is exceeded, the first
  /// element is evicted.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::new();
  /// queue.push_back(1);
  /// queue.push_back(3);
  /// assert_eq!(queue, [1, 3]);
  /// ```
  #[inline]
  pub fn push_back(&mut self, elem: T) {
    if self.right_end == BLOCKLEN {
      let block = self.arena.new_block();
      self.arena.link(self.right_block, block);
      self.right_block = block;
      self.right_end = 0;
    }
    let _prev = self.arena.put(Position::new(self.right_block, self.right_end), Some(elem));
    self.right_end = self.right_end.wrapping_add(1);
    self.len = self.len.wrapping_add(1);
    if self.exceeds_maxlen() {
      let _evicted = self.pop_front_slot();
    } else {
      self.bump_state();
    }
  }

  /// Prepends an element to the front of the queue. If the maximum length is exceeded, the last
  /// element is evicted.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::new();
  /// queue.push_front(1);
  /// queue.push_front(3);
  /// assert_eq!(queue, [3, 1]);
  /// ```
  #[inline]
  pub fn push_front(&mut self, elem: T) {
    if self.left_idx == 0 {
      let block = self.arena.new_block();
      self.arena.link(block, self.left_block);
      self.left_block = block;
      self.left_idx = BLOCKLEN;
    }
    self.left_idx = self.left_idx.wrapping_sub(1);
    let _prev = self.arena.put(Position::new(self.left_block, self.left_idx), Some(elem));
    self.len = self.len.wrapping_add(1);
    if self.exceeds_maxlen() {
      let _evicted = self.pop_back_slot();
    } else {
      self.bump_state();
    }
  }

  /// Removes and returns the element located at `idx`. Elements of the shorter side are shifted
  /// and ties shift the front side.
  ///
  #[doc = doc_out_of_bounds_idx!()]
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::from([1, 2, 3, 4, 5, 6]);
  /// assert_eq!(queue.remove(2).unwrap(), 3);
  /// assert_eq!(queue, [1, 2, 4, 5, 6]);
  /// ```
  #[inline]
  pub fn remove(&mut self, idx: usize) -> crate::Result<T> {
    let len = self.len;
    if idx >= len {
      return _unlikely_elem(Err(BlockDequeError::OutOfBoundsIndex { idx, len }.into()));
    }
    let mut hole = self.locate(idx);
    let Some(elem) = self.arena.take(hole) else {
      _unlikely_unreachable();
    };
    let after = len.wrapping_sub(idx).wrapping_sub(1);
    if idx <= after {
      for _ in 0..idx {
        let mut src = hole;
        src.retreat(&self.arena);
        self.arena.transfer(src, hole, 1);
        hole = src;
      }
      let _hole = self.pop_front_slot();
    } else {
      for _ in 0..after {
        let mut src = hole;
        src.advance(&self.arena);
        self.arena.transfer(src, hole, 1);
        hole = src;
      }
      let _hole = self.pop_back_slot();
    }
    Ok(elem)
  }

  /// Removes the first element equal to `elem`.
  ///
  /// Returns [`BlockDequeError::ValueNotFound`] if there is no such element.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::from([1, 4, 2, 4]);
  /// assert_eq!(queue.remove_first_occurrence(&4).unwrap(), 4);
  /// assert_eq!(queue, [1, 2, 4]);
  /// ```
  #[inline]
  pub fn remove_first_occurrence(&mut self, elem: &T) -> crate::Result<T>
  where
    T: PartialEq,
  {
    let Some(idx) = self.index_of(elem, ..) else {
      return _unlikely_elem(Err(BlockDequeError::ValueNotFound.into()));
    };
    self.remove(idx)
  }

  /// Removes the last element equal to `elem`.
  ///
  /// Returns [`BlockDequeError::ValueNotFound`] if there is no such element.
  #[inline]
  pub fn remove_last_occurrence(&mut self, elem: &T) -> crate::Result<T>
  where
    T: PartialEq,
  {
    let Some(idx) = self.last_index_of(elem, ..) else {
      return _unlikely_elem(Err(BlockDequeError::ValueNotFound.into()));
    };
    self.remove(idx)
  }

  /// Replaces the element located at `idx`, returning the previous one.
  ///
  #[doc = doc_out_of_bounds_idx!()]
  #[inline]
  pub fn set(&mut self, idx: usize, elem: T) -> crate::Result<T> {
    let len = self.len;
    if idx >= len {
      return _unlikely_elem(Err(BlockDequeError::OutOfBoundsIndex { idx, len }.into()));
    }
    let pos = self.locate(idx);
    match self.arena.put(pos, Some(elem)) {
      Some(prev) => Ok(prev),
      None => _unlikely_unreachable(),
    }
  }

  /// Shortens the queue, keeping the first `new_len` elements.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::from([1, 2, 3]);
  /// queue.truncate_back(1);
  /// assert_eq!(queue, [1]);
  /// ```
  #[inline]
  pub fn truncate_back(&mut self, new_len: usize) {
    let diff = self.len.saturating_sub(new_len);
    if diff == 0 {
      return;
    }
    _debug!(diff, new_len, "Truncating back");
    for _ in 0..diff {
      let _elem = self.pop_back_slot();
    }
  }

  /// Shortens the queue, keeping the last `new_len` elements.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::from([1, 2, 3]);
  /// queue.truncate_front(1);
  /// assert_eq!(queue, [3]);
  /// ```
  #[inline]
  pub fn truncate_front(&mut self, new_len: usize) {
    let diff = self.len.saturating_sub(new_len);
    if diff == 0 {
      return;
    }
    _debug!(diff, new_len, "Truncating front");
    for _ in 0..diff {
      let _elem = self.pop_front_slot();
    }
  }

  /// Fallible version of [`Self::back`].
  ///
  #[doc = doc_empty_deque!()]
  #[inline]
  pub fn try_back(&self) -> crate::Result<&T> {
    match self.back() {
      Some(elem) => Ok(elem),
      None => _unlikely_elem(Err(BlockDequeError::EmptyDeque.into())),
    }
  }

  /// Fallible version of [`Self::front`].
  ///
  #[doc = doc_empty_deque!()]
  #[inline]
  pub fn try_front(&self) -> crate::Result<&T> {
    match self.front() {
      Some(elem) => Ok(elem),
      None => _unlikely_elem(Err(BlockDequeError::EmptyDeque.into())),
    }
  }

  /// Fallible version of [`Self::pop_back`].
  ///
  #[doc = doc_empty_deque!()]
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::<u8>::new();
  /// assert!(queue.try_pop_back().is_err());
  /// ```
  #[inline]
  pub fn try_pop_back(&mut self) -> crate::Result<T> {
    match self.pop_back() {
      Some(elem) => Ok(elem),
      None => _unlikely_elem(Err(BlockDequeError::EmptyDeque.into())),
    }
  }

  /// Fallible version of [`Self::pop_front`].
  ///
  #[doc = doc_empty_deque!()]
  #[inline]
  pub fn try_pop_front(&mut self) -> crate::Result<T> {
    match self.pop_front() {
      Some(elem) => Ok(elem),
      None => _unlikely_elem(Err(BlockDequeError::EmptyDeque.into())),
    }
  }

  #[cfg(any(kani, test))]
  pub(crate) fn blocks_len(&self) -> usize {
    self.arena.blocks_len()
  }

  #[cfg(any(kani, test))]
  pub(crate) fn free_blocks_len(&self) -> usize {
    self.arena.free_blocks_len()
  }

  #[cfg(test)]
  pub(crate) const fn left_idx(&self) -> usize {
    self.left_idx
  }

  #[cfg(test)]
  pub(crate) const fn right_end(&self) -> usize {
    self.right_end
  }

  #[cfg(test)]
  pub(crate) fn left_block_data(&self) -> &[Option<T>] {
    &self.arena.block(self.left_block).data
  }

  pub(crate) const fn arena(&self) -> &BlockArena<T> {
    &self.arena
  }

  pub(crate) const fn snapshot(&self) -> Snapshot {
    Snapshot {
      left_block: self.left_block,
      left_idx: self.left_idx,
      len: self.len,
      right_block: self.right_block,
      right_end: self.right_end,
      state: self.state,
    }
  }

  const fn bump_state(&mut self) {
    self.state = self.state.wrapping_add(1);
  }

  fn clamp_range<R>(&self, range: &R) -> (usize, usize)
  where
    R: RangeBounds<usize>,
  {
    let start = match range.start_bound() {
      Bound::Included(elem) => *elem,
      Bound::Excluded(elem) => elem.saturating_add(1),
      Bound::Unbounded => 0,
    };
    let stop = match range.end_bound() {
      Bound::Included(elem) => elem.saturating_add(1),
      Bound::Excluded(elem) => *elem,
      Bound::Unbounded => self.len,
    }
    .min(self.len);
    (start.min(stop), stop)
  }

  fn exceeds_maxlen(&self) -> bool {
    self.maxlen.is_some_and(|maxlen| self.len > maxlen)
  }

  const fn first_position(&self) -> Position {
    Position::new(self.left_block, self.left_idx)
  }

  const fn last_position(&self) -> Position {
    Position::new(self.right_block, self.right_end.wrapping_sub(1))
  }

  // Walks from the closest end. `idx` must be lesser than `len`.
  fn locate(&self, idx: usize) -> Position {
    let last = self.len.wrapping_sub(1);
    if idx == 0 {
      return self.first_position();
    }
    if idx == last {
      return self.last_position();
    }
    let abs = self.left_idx.wrapping_add(idx);
    let offset = abs & BLOCK_MASK;
    let jumps = abs / BLOCKLEN;
    let mut block;
    if idx < self.len >> 1 {
      block = self.left_block;
      for _ in 0..jumps {
        block = self.arena.right_of(block);
      }
    } else {
      block = self.right_block;
      let total = self.left_idx.wrapping_add(last) / BLOCKLEN;
      for _ in 0..total.wrapping_sub(jumps) {
        block = self.arena.left_of(block);
      }
    }
    Position::new(block, offset)
  }

  // `len` must be greater than zero.
  fn pop_back_slot(&mut self) -> Option<T> {
    self.right_end = self.right_end.wrapping_sub(1);
    let elem = self.arena.take(Position::new(self.right_block, self.right_end));
    self.len = self.len.wrapping_sub(1);
    self.bump_state();
    if self.right_end == 0 {
      if self.len == 0 {
        self.recenter();
      } else {
        let vacated = self.right_block;
        self.right_block = self.arena.left_of(vacated);
        self.right_end = BLOCKLEN;
        self.arena.block_mut(self.right_block).right_link = None;
        self.release_block(vacated, &mut None);
      }
    }
    elem
  }

  // `len` must be greater than zero.
  fn pop_front_slot(&mut self) -> Option<T> {
    let elem = self.arena.take(Position::new(self.left_block, self.left_idx));
    self.left_idx = self.left_idx.wrapping_add(1);
    self.len = self.len.wrapping_sub(1);
    self.bump_state();
    if self.left_idx == BLOCKLEN {
      if self.len == 0 {
        self.recenter();
      } else {
        let vacated = self.left_block;
        self.left_block = self.arena.right_of(vacated);
        self.left_idx = 0;
        self.arena.block_mut(self.left_block).left_link = None;
        self.release_block(vacated, &mut None);
      }
    }
    elem
  }

  // `idx` must already be unlinked from the chain. Indices that refer to the block moved by the
  // arena, including `spare`, are updated.
  fn release_block(&mut self, idx: usize, spare: &mut Option<usize>) {
    let Some((from, to)) = self.arena.free_block(idx) else {
      return;
    };
    for elem in [&mut self.left_block, &mut self.right_block] {
      if *elem == from {
        *elem = to;
      }
    }
    if *spare == Some(from) {
      *spare = Some(to);
    }
  }

  const fn recenter(&mut self) {
    self.left_idx = EMPTY_IDX;
    self.right_end = EMPTY_IDX;
  }

  fn with_maxlen_opt(maxlen: Option<usize>) -> Self {
    let mut arena = BlockArena::new();
    let block = arena.new_block();
    Self {
      arena,
      left_block: block,
      left_idx: EMPTY_IDX,
      len: 0,
      maxlen,
      right_block: block,
      right_end: EMPTY_IDX,
      state: 0,
    }
  }
}

impl<T> Clone for BlockDeque<T>
where
  T: Clone,
{
  #[inline]
  fn clone(&self) -> Self {
    let mut instance = Self::with_maxlen_opt(self.maxlen);
    instance.extend_back(self.iter().cloned());
    instance
  }
}

impl<T> Debug for BlockDeque<T>
where
  T: Debug,
{
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

impl<T> Default for BlockDeque<T> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Eq for BlockDeque<T> where T: Eq {}

impl<T> Extend<T> for BlockDeque<T> {
  #[inline]
  fn extend<I>(&mut self, iter: I)
  where
    I: IntoIterator<Item = T>,
  {
    self.extend_back(iter);
  }
}

impl<'any, T> Extend<&'any T> for BlockDeque<T>
where
  T: Copy + 'any,
{
  #[inline]
  fn extend<I>(&mut self, iter: I)
  where
    I: IntoIterator<Item = &'any T>,
  {
    self.extend_back(iter.into_iter().copied());
  }
}

impl<T, const N: usize> From<[T; N]> for BlockDeque<T> {
  #[inline]
  fn from(from: [T; N]) -> Self {
    let mut this = Self::new();
    this.extend_back(from);
    this
  }
}

impl<T> FromIterator<T> for BlockDeque<T> {
  #[inline]
  fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = T>,
  {
    let mut this = Self::new();
    this.extend_back(iter);
    this
  }
}

impl<T> Hash for BlockDeque<T>
where
  T: Hash,
{
  #[inline]
  fn hash<H>(&self, state: &mut H)
  where
    H: Hasher,
  {
    state.write_usize(self.len);
    for elem in self {
      elem.hash(state);
    }
  }
}

impl<T> Index<usize> for BlockDeque<T> {
  type Output = T;

  #[inline]
  fn index(&self, idx: usize) -> &Self::Output {
    match self.get(idx) {
      Some(elem) => elem,
      None => out_of_bounds(idx, self.len),
    }
  }
}

impl<T> IndexMut<usize> for BlockDeque<T> {
  #[inline]
  fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
    let len = self.len;
    match self.get_mut(idx) {
      Some(elem) => elem,
      None => out_of_bounds(idx, len),
    }
  }
}

impl<T> IntoIterator for BlockDeque<T> {
  type IntoIter = IntoIter<T>;
  type Item = T;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    IntoIter::new(self)
  }
}

impl<'any, T> IntoIterator for &'any BlockDeque<T> {
  type IntoIter = Iter<'any, T>;
  type Item = &'any T;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<'any, T> IntoIterator for &'any mut BlockDeque<T> {
  type IntoIter = IterMut<'any, T>;
  type Item = &'any mut T;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter_mut()
  }
}

impl<T> Ord for BlockDeque<T>
where
  T: Ord,
{
  #[inline]
  fn cmp(&self, other: &Self) -> Ordering {
    self.iter().cmp(other.iter())
  }
}

impl<T> PartialEq for BlockDeque<T>
where
  T: PartialEq,
{
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.len == other.len && self.iter().eq(other.iter())
  }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for BlockDeque<T>
where
  T: PartialEq<U>,
{
  #[inline]
  fn eq(&self, other: &[U; N]) -> bool {
    self.len == N && self.iter().zip(other).all(|(a, b)| a == b)
  }
}

impl<T> PartialOrd for BlockDeque<T>
where
  T: PartialOrd,
{
  #[inline]
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    self.iter().partial_cmp(other.iter())
  }
}

#[allow(clippy::panic, reason = "`Index` can't report failures in any other way")]
#[cold]
#[inline(never)]
#[track_caller]
fn out_of_bounds(idx: usize, len: usize) -> ! {
  panic!("index {idx} is out of bounds for a deque of length {len}");
}

#[cfg(all(feature = "_bench", test))]
mod bench {
  use crate::{bench::_data, collection::BlockDeque};
  use alloc::collections::VecDeque;

  #[bench]
  fn get_middle(b: &mut test::Bencher) {
    let deque = _data(4096);
    b.iter(|| {
      let _elem = test::black_box(deque.get(2048));
    });
  }

  #[bench]
  fn push_pop_back(b: &mut test::Bencher) {
    let mut deque = BlockDeque::new();
    b.iter(|| {
      for elem in 0..128u8 {
        deque.push_back(elem);
      }
      for _ in 0..128 {
        let _elem = test::black_box(deque.pop_back());
      }
    });
  }

  #[bench]
  fn push_pop_back_vec_deque(b: &mut test::Bencher) {
    let mut deque = VecDeque::new();
    b.iter(|| {
      for elem in 0..128u8 {
        deque.push_back(elem);
      }
      for _ in 0..128 {
        let _elem = test::black_box(deque.pop_back());
      }
    });
  }

  #[bench]
  fn rotate(b: &mut test::Bencher) {
    let mut deque = _data(4096);
    b.iter(|| {
      deque.rotate(1000);
      deque.rotate(-1000);
    });
  }

  #[bench]
  fn rotate_vec_deque(b: &mut test::Bencher) {
    let mut deque: VecDeque<u8> = _data(4096).into_iter().collect();
    b.iter(|| {
      deque.rotate_right(1000);
      deque.rotate_left(1000);
    });
  }
}
