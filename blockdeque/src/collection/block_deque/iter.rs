use crate::collection::block_deque::{BlockDeque, arena::BlockArena, position::Position};
use alloc::vec;
use core::iter::{Flatten, FusedIterator};

/// Immutable iterator over the elements of a [`BlockDeque`].
pub struct Iter<'any, T> {
  arena: &'any BlockArena<T>,
  back: Position,
  front: Position,
  remaining: usize,
}

impl<'any, T> Iter<'any, T> {
  pub(crate) const fn new(
    arena: &'any BlockArena<T>,
    front: Position,
    back: Position,
    remaining: usize,
  ) -> Self {
    Self { arena, back, front, remaining }
  }
}

impl<T> Clone for Iter<'_, T> {
  #[inline]
  fn clone(&self) -> Self {
    Self { arena: self.arena, back: self.back, front: self.front, remaining: self.remaining }
  }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
  #[inline]
  fn next_back(&mut self) -> Option<Self::Item> {
    if self.remaining == 0 {
      return None;
    }
    let elem = self.arena.get(self.back);
    self.remaining = self.remaining.wrapping_sub(1);
    if self.remaining > 0 {
      self.back.retreat(self.arena);
    }
    elem
  }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'any, T> Iterator for Iter<'any, T> {
  type Item = &'any T;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.remaining == 0 {
      return None;
    }
    let elem = self.arena.get(self.front);
    self.remaining = self.remaining.wrapping_sub(1);
    if self.remaining > 0 {
      self.front.advance(self.arena);
    }
    elem
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

/// Mutable iterator over the elements of a [`BlockDeque`].
pub struct IterMut<'any, T> {
  inner: Flatten<vec::IntoIter<&'any mut [Option<T>]>>,
  remaining: usize,
}

impl<'any, T> IterMut<'any, T> {
  pub(crate) fn new(slices: vec::Vec<&'any mut [Option<T>]>, remaining: usize) -> Self {
    Self { inner: slices.into_iter().flatten(), remaining }
  }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
  #[inline]
  fn next_back(&mut self) -> Option<Self::Item> {
    let elem = self.inner.next_back()?.as_mut();
    self.remaining = self.remaining.wrapping_sub(1);
    elem
  }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<'any, T> Iterator for IterMut<'any, T> {
  type Item = &'any mut T;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let elem = self.inner.next()?.as_mut();
    self.remaining = self.remaining.wrapping_sub(1);
    elem
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

/// Owned iterator over the elements of a [`BlockDeque`].
pub struct IntoIter<T> {
  deque: BlockDeque<T>,
}

impl<T> IntoIter<T> {
  pub(crate) const fn new(deque: BlockDeque<T>) -> Self {
    Self { deque }
  }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
  #[inline]
  fn next_back(&mut self) -> Option<Self::Item> {
    self.deque.pop_back()
  }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Iterator for IntoIter<T> {
  type Item = T;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    self.deque.pop_front()
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    let len = self.deque.len();
    (len, Some(len))
  }
}
