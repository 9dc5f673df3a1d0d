use crate::collection::{BlockDeque, MAXFREEBLOCKS};
use alloc::collections::VecDeque;

#[kani::proof]
fn queue() {
  let bytes = kani::vec::any_vec::<u8, 128>();
  let mut queue = BlockDeque::new();
  let mut vec_deque = VecDeque::new();

  for byte in bytes.iter().copied() {
    queue.push_front(byte);
    vec_deque.push_front(byte);
  }
  assert_eq!(queue.len(), vec_deque.len());
  for _ in 0..(bytes.len() / 2) {
    assert_eq!(queue.front(), vec_deque.front());
    assert_eq!(queue.get(0), vec_deque.get(0));
    assert_eq!(queue.pop_back(), vec_deque.pop_back());
    assert_eq!(queue.back(), vec_deque.back());
    assert_eq!(queue.pop_front(), vec_deque.pop_front());
  }
  loop {
    if queue.is_empty() {
      break;
    }
    assert_eq!(queue.get(0), vec_deque.get(0));
    assert_eq!(queue.pop_back(), vec_deque.pop_back());
    if queue.is_empty() {
      break;
    }
    assert_eq!(queue.get(0), vec_deque.get(0));
    assert_eq!(queue.pop_front(), vec_deque.pop_front());
  }
  assert_eq!((queue.len(), vec_deque.len()), (0, 0));
  assert_eq!(queue.blocks_len(), 1);
  assert!(queue.free_blocks_len() <= MAXFREEBLOCKS);
}

#[kani::proof]
fn rotate() {
  let bytes = kani::vec::any_vec::<u8, 96>();
  let n: i8 = kani::any();
  let mut queue: BlockDeque<u8> = bytes.iter().copied().collect();
  let mut vec_deque: VecDeque<u8> = bytes.iter().copied().collect();
  queue.rotate(n.into());
  if let Ok(len @ 1..) = isize::try_from(vec_deque.len()) {
    vec_deque.rotate_right(isize::from(n).rem_euclid(len).unsigned_abs());
  }
  assert!(queue.iter().eq(vec_deque.iter()));
}
