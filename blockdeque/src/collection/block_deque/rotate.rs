use crate::collection::block_deque::{BlockDeque, block::BLOCKLEN, position::Position};

impl<T> BlockDeque<T> {
  /// Reverses the order of the elements in place.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::from([1, 2, 3]);
  /// queue.reverse();
  /// assert_eq!(queue, [3, 2, 1]);
  /// ```
  #[inline]
  pub fn reverse(&mut self) {
    if self.len <= 1 {
      return;
    }
    let mut front = self.first_position();
    let mut back = self.last_position();
    for _ in 0..self.len >> 1 {
      self.arena.swap(front, back);
      front.advance(&self.arena);
      back.retreat(&self.arena);
    }
    self.bump_state();
  }

  /// Rotates the queue `n` steps to the right, which means that the last `n` elements are moved
  /// to the front. Negative values rotate to the left.
  ///
  /// Only `min(|n|, len - |n|)` elements are moved, block by block.
  ///
  /// ```rust
  /// let mut queue = blockdeque::collection::BlockDeque::from([1, 2, 3, 4, 5, 6]);
  /// queue.rotate(2);
  /// assert_eq!(queue, [5, 6, 1, 2, 3, 4]);
  /// queue.rotate(-4);
  /// assert_eq!(queue, [3, 4, 5, 6, 1, 2]);
  /// ```
  #[inline]
  pub fn rotate(&mut self, n: isize) {
    if self.len <= 1 {
      return;
    }
    let len = isize::try_from(self.len).unwrap_or(isize::MAX);
    let half = len >> 1;
    let mut steps = n;
    if steps > half || steps < -half {
      steps = steps.rem_euclid(len);
      if steps > half {
        steps = steps.wrapping_sub(len);
      }
    }
    if steps == 0 {
      return;
    }
    _debug!(n, steps, "Rotating deque");
    let mut spare = None;
    while steps > 0 {
      if self.left_idx == 0 {
        let block = match spare.take() {
          Some(elem) => elem,
          None => self.arena.new_block(),
        };
        self.arena.link(block, self.left_block);
        self.left_block = block;
        self.left_idx = BLOCKLEN;
      }
      let moved = steps.unsigned_abs().min(self.right_end).min(self.left_idx);
      self.right_end = self.right_end.wrapping_sub(moved);
      self.left_idx = self.left_idx.wrapping_sub(moved);
      self.arena.transfer(
        Position::new(self.right_block, self.right_end),
        Position::new(self.left_block, self.left_idx),
        moved,
      );
      steps = steps.wrapping_sub_unsigned(moved);
      if self.right_end == 0 {
        let vacated = self.right_block;
        self.right_block = self.arena.left_of(vacated);
        self.right_end = BLOCKLEN;
        self.arena.block_mut(self.right_block).right_link = None;
        self.arena.block_mut(vacated).left_link = None;
        self.keep_spare(vacated, &mut spare);
      }
    }
    while steps < 0 {
      if self.right_end == BLOCKLEN {
        let block = match spare.take() {
          Some(elem) => elem,
          None => self.arena.new_block(),
        };
        self.arena.link(self.right_block, block);
        self.right_block = block;
        self.right_end = 0;
      }
      let moved = steps
        .unsigned_abs()
        .min(BLOCKLEN.wrapping_sub(self.left_idx))
        .min(BLOCKLEN.wrapping_sub(self.right_end));
      self.arena.transfer(
        Position::new(self.left_block, self.left_idx),
        Position::new(self.right_block, self.right_end),
        moved,
      );
      self.left_idx = self.left_idx.wrapping_add(moved);
      self.right_end = self.right_end.wrapping_add(moved);
      steps = steps.wrapping_add_unsigned(moved);
      if self.left_idx == BLOCKLEN {
        let vacated = self.left_block;
        self.left_block = self.arena.right_of(vacated);
        self.left_idx = 0;
        self.arena.block_mut(self.left_block).left_link = None;
        self.arena.block_mut(vacated).right_link = None;
        self.keep_spare(vacated, &mut spare);
      }
    }
    if let Some(block) = spare {
      self.release_block(block, &mut None);
    }
    self.bump_state();
  }

  // At most one unlinked block is carried between iterations.
  fn keep_spare(&mut self, vacated: usize, spare: &mut Option<usize>) {
    if spare.is_none() {
      *spare = Some(vacated);
    } else {
      self.release_block(vacated, spare);
    }
  }
}
