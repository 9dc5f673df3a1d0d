use crate::{
  Error,
  collection::{BLOCKLEN, BlockDeque, BlockDequeError, MAXFREEBLOCKS},
};
use alloc::{collections::VecDeque, format, vec::Vec};
use core::hash::{BuildHasher, Hash, Hasher};
use std::hash::RandomState;

#[test]
fn bounded_deque_evicts_from_the_opposite_end() {
  #[cfg(feature = "_tracing-tree")]
  let _rslt = crate::misc::tracing_tree_init(None);

  let mut bq = BlockDeque::with_maxlen(3);
  bq.push_back(1);
  bq.push_back(2);
  bq.push_back(3);
  assert_eq!(bq, [1, 2, 3]);
  bq.push_back(4);
  assert_eq!(bq, [2, 3, 4]);
  assert_eq!(bq.len(), 3);
  bq.rotate(1);
  assert_eq!(bq, [4, 2, 3]);
  assert_eq!(bq.pop_front(), Some(4));
  assert_eq!(bq, [2, 3]);
  assert_eq!(bq.get(0), Some(&2));

  bq.push_front(1);
  bq.push_front(0);
  assert_eq!(bq, [0, 1, 2]);
  assert!(bq.is_full());
}

#[test]
fn bounded_deque_retains_the_last_elements_of_bulk_insertions() {
  let mut bq = BlockDeque::with_maxlen_from_iter(4, 1..7);
  assert_eq!(bq, [3, 4, 5, 6]);
  bq.extend_front([2, 1]);
  assert_eq!(bq, [1, 2, 3, 4]);
  assert_eq!(bq.maxlen(), Some(4));
}

// | . | . | . | . | . | . | ... | . | . |: New - (left_idx=32, right_end=32)
// | . | 1 | 2 | 3 | 4 | 5 | 6 | ... | . |: Extend back - (left_idx=1, right_end=7)
// | 35 | 1 | 2 | 3 | 4 | 5 | 6 | ... | . |: Push front - (left_idx=0, right_end=7)
// | ... | 45 | 40 | <-> | 35 | 1 | ... |: Push front twice - (left_idx=62, right_end=7)
// | 35 | 1 | 2 | 3 | 4 | 5 | . | ... | . |: Pop front twice, pop back - (left_idx=0, right_end=6)
#[test]
fn block_layout() {
  let mut bq = BlockDeque::new();
  assert_eq!((bq.left_idx(), bq.right_end()), (BLOCKLEN / 2, BLOCKLEN / 2));

  bq.extend_back([1, 2, 3, 4, 5, 6]);
  assert_eq!((bq.left_idx(), bq.right_end()), (1, 7));
  assert_eq!(&bq.left_block_data()[..8], &[None, Some(1), Some(2), Some(3), Some(4), Some(5), Some(6), None]);

  bq.push_front(35);
  assert_eq!((bq.left_idx(), bq.blocks_len()), (0, 1));
  assert_eq!(bq.left_block_data()[0], Some(35));

  bq.push_front(40);
  assert_eq!((bq.left_idx(), bq.blocks_len()), (BLOCKLEN - 1, 2));
  bq.push_front(45);
  assert_eq!(bq.left_idx(), BLOCKLEN - 2);
  assert_eq!(&bq.left_block_data()[BLOCKLEN - 2..], &[Some(45), Some(40)]);
  assert_eq!(bq, [45, 40, 35, 1, 2, 3, 4, 5, 6]);

  assert_eq!(bq.pop_front(), Some(45));
  assert_eq!(bq.pop_front(), Some(40));
  assert_eq!(bq.pop_back(), Some(6));
  assert_eq!((bq.left_idx(), bq.right_end(), bq.blocks_len()), (0, 6, 1));
  assert_eq!(&bq.left_block_data()[..7], &[Some(35), Some(1), Some(2), Some(3), Some(4), Some(5), None]);
  assert!(bq.left_block_data()[7..].iter().all(Option::is_none));
}

#[test]
fn clear() {
  let mut bq: BlockDeque<u32> = (0..1000).collect();
  assert!(bq.blocks_len() > 1);
  bq.clear();
  assert!(bq.is_empty());
  assert_eq!(bq.blocks_len(), 1);
  assert_eq!((bq.left_idx(), bq.right_end()), (BLOCKLEN / 2, BLOCKLEN / 2));
  assert_eq!(bq.iter().next(), None);
  bq.push_back(7);
  bq.push_front(6);
  assert_eq!(bq, [6, 7]);
}

#[test]
fn clone_keeps_maxlen() {
  let bq = BlockDeque::with_maxlen_from_iter(2, [1, 2]);
  let mut cloned = bq.clone();
  assert_eq!(cloned.maxlen(), Some(2));
  cloned.push_back(3);
  assert_eq!(cloned, [2, 3]);
  assert_eq!(bq, [1, 2]);
}

#[test]
fn comparisons() {
  let a = BlockDeque::from([1, 2, 3]);
  let b = BlockDeque::from([1, 2, 4]);
  let c = BlockDeque::from([1, 2]);
  assert!(a < b);
  assert!(c < a);
  assert_ne!(a, c);
  assert_eq!(a, BlockDeque::with_maxlen_from_iter(10, [1, 2, 3]));
  assert_eq!(format!("{a:?}"), "[1, 2, 3]");
}

#[test]
fn count_and_contains() {
  let bq = BlockDeque::from([1, 2, 1, 3, 1]);
  assert_eq!(bq.count(&1), 3);
  assert_eq!(bq.count(&4), 0);
  assert!(bq.contains(&3));
  assert!(!bq.contains(&4));
}

#[test]
fn cursor_fails_after_structural_modifications() {
  let mut bq = BlockDeque::from([1, 2, 3]);
  let mut cursor = bq.cursor();
  assert_eq!(cursor.next(&bq).unwrap(), Some(&1));
  bq.push_back(4);
  assert!(cursor.has_next());
  assert!(matches!(
    cursor.next(&bq),
    Err(Error::BlockDequeError(BlockDequeError::MutatedDuringIteration))
  ));
  assert!(!cursor.has_next());

  let mut cursor = bq.cursor();
  let _elem = bq.pop_front();
  assert!(cursor.next(&bq).is_err());

  let mut cursor = bq.cursor();
  bq.rotate(1);
  assert!(cursor.next(&bq).is_err());

  let mut cursor = bq.cursor();
  bq.clear();
  assert!(cursor.next(&bq).is_err());
}

#[test]
fn cursor_is_not_affected_by_reads() {
  let mut bq = BlockDeque::from([1, 2, 3]);
  let mut cursor = bq.cursor_rev();
  assert_eq!(cursor.next(&bq).unwrap(), Some(&3));
  let _elem = bq.get(1);
  let _count = bq.iter().count();
  assert!(bq.contains(&2));
  bq.set(1, 20).unwrap();
  for elem in bq.iter_mut() {
    *elem *= 10;
  }
  bq[0] = 1;
  *bq.back_mut().unwrap() = 3;
  assert_eq!(cursor.remaining(), 2);
  assert_eq!(cursor.next(&bq).unwrap(), Some(&200));
  assert_eq!(cursor.next(&bq).unwrap(), Some(&1));
  assert!(!cursor.has_next());
  assert_eq!(cursor.next(&bq).unwrap(), None);
}

// a: | . | 1 | 2 | 3 | . | ... |: (left_idx=1, right_end=4)
// b: | ... | 3 | 2 | 1 | . | ... |: (left_idx=EMPTY_IDX-3, right_end=EMPTY_IDX)
// Same number of structural modifications, different shapes.
#[test]
fn cursor_rejects_a_deque_with_another_shape() {
  let a = BlockDeque::from([1, 2, 3]);
  let mut b = BlockDeque::new();
  b.push_front(1);
  b.push_front(2);
  b.push_front(3);
  let mut cursor = a.cursor();
  assert!(matches!(
    cursor.next(&b),
    Err(Error::BlockDequeError(BlockDequeError::MutatedDuringIteration))
  ));
  assert!(!cursor.has_next());
  assert_eq!(cursor.next(&a).unwrap(), None);
}

#[test]
fn cursor_never_panics_on_a_deque_with_fewer_blocks() {
  let long: BlockDeque<usize> = (0..BLOCKLEN * 4).collect();
  let short: BlockDeque<usize> = (0..BLOCKLEN).collect();
  let mut cursor = long.cursor();
  for idx in 0..BLOCKLEN * 3 {
    assert_eq!(cursor.next(&long).unwrap(), Some(&idx));
  }
  assert!(cursor.next(&short).is_err());
  assert_eq!(cursor.remaining(), 0);
  let mut cursor = long.cursor_rev();
  assert!(cursor.next(&short).is_err());
  assert!(!cursor.has_next());
}

#[test]
fn cursor_walks_many_blocks() {
  let bq: BlockDeque<usize> = (0..300).collect();
  let mut cursor = bq.cursor();
  let mut idx = 0;
  while let Some(elem) = cursor.next(&bq).unwrap() {
    assert_eq!(*elem, idx);
    idx += 1;
  }
  assert_eq!(idx, 300);
  let mut cursor = bq.cursor_rev();
  while let Some(elem) = cursor.next(&bq).unwrap() {
    idx -= 1;
    assert_eq!(*elem, idx);
  }
  assert_eq!(idx, 0);
}

#[test]
fn empty_deque_errors() {
  let mut bq = BlockDeque::<u8>::new();
  assert_eq!(bq.pop_back(), None);
  assert_eq!(bq.pop_front(), None);
  assert_eq!(bq.back(), None);
  assert_eq!(bq.front_mut(), None);
  assert!(matches!(bq.try_pop_back(), Err(Error::BlockDequeError(BlockDequeError::EmptyDeque))));
  assert!(matches!(bq.try_pop_front(), Err(Error::BlockDequeError(BlockDequeError::EmptyDeque))));
  assert!(matches!(bq.try_back(), Err(Error::BlockDequeError(BlockDequeError::EmptyDeque))));
  assert!(matches!(bq.try_front(), Err(Error::BlockDequeError(BlockDequeError::EmptyDeque))));
}

#[test]
fn extend_front_reverses_order() {
  let mut bq = BlockDeque::new();
  bq.extend_front([1, 2, 3]);
  assert_eq!(bq, [3, 2, 1]);
  assert_eq!(bq.right_end(), BLOCKLEN - 1);
  bq.extend_back([4, 5]);
  assert_eq!(bq, [3, 2, 1, 4, 5]);
  bq.extend(&[6, 7]);
  assert_eq!(bq, [3, 2, 1, 4, 5, 6, 7]);
}

#[test]
fn free_blocks_are_bounded() {
  let mut bq = BlockDeque::new();
  for elem in 0..BLOCKLEN * 40 {
    bq.push_back(elem);
  }
  assert_eq!(bq.blocks_len(), 41);
  while bq.pop_front().is_some() {
    assert!(bq.free_blocks_len() <= MAXFREEBLOCKS);
  }
  assert_eq!(bq.blocks_len(), 1);
  assert_eq!(bq.free_blocks_len(), MAXFREEBLOCKS);

  for elem in 0..BLOCKLEN * 3 {
    bq.push_back(elem);
  }
  assert_eq!(bq.blocks_len(), 4);
  assert_eq!(bq.free_blocks_len(), MAXFREEBLOCKS - 3);
}

#[test]
fn blocks_are_compacted_after_clear() {
  let mut bq: BlockDeque<u8> = BlockDeque::new();
  for _ in 0..BLOCKLEN * 5000 {
    bq.push_back(1);
  }
  assert_eq!(bq.blocks_len(), 5001);
  bq.clear();
  assert_eq!(bq.blocks_len(), 1);
  bq.push_back(2);
  assert_eq!(bq.blocks_len(), 1);
  let mut iter = bq.iter_mut();
  assert_eq!(iter.next(), Some(&mut 2));
  assert_eq!(iter.next(), None);
}

// Blocks released from the middle of the slab move the last block into the freed slot, the chain
// must stay in order for every kind of release.
#[test]
fn blocks_are_compacted_after_mixed_releases() {
  let mut bq = BlockDeque::new();
  let mut model = VecDeque::new();
  for round in 0..6usize {
    for elem in 0..BLOCKLEN * 3 + round {
      bq.push_back(elem);
      model.push_back(elem);
      bq.push_front(elem);
      model.push_front(elem);
    }
    for _ in 0..BLOCKLEN * 2 + 7 {
      assert_eq!(bq.pop_front(), model.pop_front());
      assert_eq!(bq.pop_back(), model.pop_back());
    }
    let n = isize::try_from(BLOCKLEN * 2 + round).unwrap();
    bq.rotate(n);
    model.rotate_right(usize::try_from(n).unwrap() % model.len());
    bq.rotate(-n - 5);
    model.rotate_left((usize::try_from(n).unwrap() + 5) % model.len());
    bq.truncate_front(bq.len() / 2);
    while model.len() > bq.len() {
      let _ = model.pop_front();
    }
    for elem in bq.iter_mut() {
      *elem += 1;
    }
    for elem in model.iter_mut() {
      *elem += 1;
    }
    assert!(bq.iter().eq(model.iter()), "{round}");
    assert!(bq.iter().rev().eq(model.iter().rev()), "{round}");
    assert!(bq.blocks_len() <= bq.len() / BLOCKLEN + 2, "{round}");
  }
}

#[test]
fn hash_is_consistent_with_eq() {
  fn hash(bq: &BlockDeque<i32>, state: &RandomState) -> u64 {
    let mut hasher = state.build_hasher();
    bq.hash(&mut hasher);
    hasher.finish()
  }

  let state = RandomState::new();
  let mut a = BlockDeque::from([2, 3]);
  a.push_front(1);
  let b = BlockDeque::from([1, 2, 3]);
  assert_eq!(hash(&a, &state), hash(&b, &state));
}

#[test]
fn index_of_ranges() {
  let bq: BlockDeque<usize> = (0..200).map(|elem| elem % 100).collect();
  assert_eq!(bq.index_of(&5, ..), Some(5));
  assert_eq!(bq.index_of(&5, 6..), Some(105));
  assert_eq!(bq.index_of(&5, 6..105), None);
  assert_eq!(bq.index_of(&5, 6..=105), Some(105));
  assert_eq!(bq.index_of(&5, 150..1000), None);
  assert_eq!(bq.index_of(&5, 300..), None);
  assert_eq!(bq.last_index_of(&5, ..), Some(105));
  assert_eq!(bq.last_index_of(&5, ..105), Some(5));
  assert_eq!(bq.last_index_of(&5, 6..105), None);
  assert_eq!(bq.last_index_of(&99, ..), Some(199));
}

#[test]
fn indexed_access_across_blocks() {
  let mut bq = BlockDeque::new();
  for elem in 0..500u32 {
    bq.push_front(elem);
  }
  for idx in 0..500 {
    assert_eq!(bq.get(idx), Some(&(499 - u32::try_from(idx).unwrap())));
  }
  assert_eq!(bq.get(500), None);
  bq[250] = 1000;
  assert_eq!(bq[250], 1000);
  assert_eq!(bq.set(251, 2000).unwrap(), 248);
  assert_eq!(bq[251], 2000);
  assert!(matches!(
    bq.set(500, 0),
    Err(Error::BlockDequeError(BlockDequeError::OutOfBoundsIndex { idx: 500, len: 500 }))
  ));
  *bq.back_mut().unwrap() = 9;
  assert_eq!(bq.back(), Some(&9));
}

#[test]
#[should_panic = "index 3 is out of bounds for a deque of length 3"]
fn index_panics_out_of_bounds() {
  let bq = BlockDeque::from([1, 2, 3]);
  let _elem = bq[3];
}

#[test]
fn insert() {
  let mut bq = BlockDeque::from([1, 2, 4]);
  bq.insert(2, 3).unwrap();
  assert_eq!(bq, [1, 2, 3, 4]);
  bq.insert(0, 0).unwrap();
  bq.insert(5, 5).unwrap();
  assert_eq!(bq, [0, 1, 2, 3, 4, 5]);
  assert!(matches!(
    bq.insert(7, 7),
    Err(Error::BlockDequeError(BlockDequeError::OutOfBoundsIndex { idx: 7, len: 6 }))
  ));

  let mut bounded = BlockDeque::with_maxlen_from_iter(2, [1, 2]);
  assert!(matches!(bounded.insert(1, 3), Err(Error::BlockDequeError(BlockDequeError::FullDeque))));
  assert_eq!(bounded, [1, 2]);
}

#[test]
fn insert_across_blocks() {
  let mut bq: BlockDeque<usize> = (0..300).collect();
  let mut model: VecDeque<usize> = (0..300).collect();
  for (idx, elem) in [(0, 1000), (150, 1001), (64, 1002), (250, 1003), (303, 1004)] {
    bq.insert(idx, elem).unwrap();
    model.insert(idx, elem);
  }
  assert!(bq.iter().eq(model.iter()));
}

#[test]
fn iterators() {
  let mut bq: BlockDeque<u32> = (0..200).collect();
  assert_eq!(bq.iter().len(), 200);
  assert!(bq.iter().rev().copied().eq((0..200).rev()));
  for elem in bq.iter_mut() {
    *elem += 10;
  }
  assert!(bq.iter().copied().eq(10..210));
  let mut iter = bq.iter_mut();
  assert_eq!(iter.next_back(), Some(&mut 209));
  assert_eq!(iter.next(), Some(&mut 10));
  assert_eq!(iter.len(), 198);

  let mut into_iter = bq.into_iter();
  assert_eq!(into_iter.next(), Some(10));
  assert_eq!(into_iter.next_back(), Some(209));
  assert_eq!(into_iter.len(), 198);
  assert_eq!(into_iter.collect::<Vec<_>>().len(), 198);
}

#[test]
fn maxlen_zero_never_retains() {
  let mut bq = BlockDeque::with_maxlen(0);
  assert!(!bq.offer_back(1));
  assert!(!bq.offer_front(2));
  bq.extend_back([3, 4]);
  assert!(bq.is_empty());
  assert!(bq.is_full());

  let mut unbounded = BlockDeque::new();
  assert!(unbounded.offer_back(1));
  assert!(unbounded.offer_front(0));
  assert_eq!(unbounded, [0, 1]);
}

#[test]
fn remove_by_index() {
  let mut bq = BlockDeque::from([1, 2, 3, 4, 5, 6]);
  assert_eq!(bq.remove(2).unwrap(), 3);
  assert_eq!(bq, [1, 2, 4, 5, 6]);
  assert_eq!(bq.remove(0).unwrap(), 1);
  assert_eq!(bq.remove(3).unwrap(), 6);
  assert_eq!(bq, [2, 4, 5]);
  assert!(matches!(
    bq.remove(3),
    Err(Error::BlockDequeError(BlockDequeError::OutOfBoundsIndex { idx: 3, len: 3 }))
  ));
}

#[test]
fn remove_across_blocks() {
  let mut bq: BlockDeque<usize> = (0..400).collect();
  let mut model: VecDeque<usize> = (0..400).collect();
  for idx in [0, 398, 64, 300, 128, 200, 63, 1] {
    assert_eq!(bq.remove(idx).ok(), model.remove(idx));
  }
  assert!(matches!(
    bq.remove(392),
    Err(Error::BlockDequeError(BlockDequeError::OutOfBoundsIndex { idx: 392, len: 392 }))
  ));
  assert!(bq.iter().eq(model.iter()));
}

// | . | 1 | 2 | 3 | 4 | 5 | . |: (left_idx=1, right_end=6)
// | . | . | 1 | 2 | 4 | 5 | . |: Remove the middle element, the front side moves
// | . | . | 1 | 2 | 4 | . | . |: Remove the last element, the back side moves
#[test]
fn remove_moves_the_shorter_side() {
  let mut bq = BlockDeque::from([1, 2, 3, 4, 5]);
  assert_eq!((bq.left_idx(), bq.right_end()), (1, 6));
  assert_eq!(bq.remove(2).unwrap(), 3);
  assert_eq!((bq.left_idx(), bq.right_end()), (2, 6));
  assert_eq!(bq.remove(3).unwrap(), 5);
  assert_eq!((bq.left_idx(), bq.right_end()), (2, 5));
  assert_eq!(bq, [1, 2, 4]);
}

#[test]
fn remove_by_value() {
  let mut bq = BlockDeque::from([1, 2, 3, 4, 5, 6]);
  assert_eq!(bq.remove_first_occurrence(&4).unwrap(), 4);
  assert_eq!(bq, [1, 2, 3, 5, 6]);
  assert!(matches!(
    bq.remove_first_occurrence(&4),
    Err(Error::BlockDequeError(BlockDequeError::ValueNotFound))
  ));

  let mut bq = BlockDeque::from([1, 2, 1, 2]);
  assert_eq!(bq.remove_last_occurrence(&1).unwrap(), 1);
  assert_eq!(bq, [1, 2, 2]);
  assert!(bq.remove_last_occurrence(&3).is_err());
}

#[test]
fn reverse() {
  let mut bq = BlockDeque::from([1, 2, 3, 4, 5, 6]);
  bq.reverse();
  assert_eq!(bq, [6, 5, 4, 3, 2, 1]);

  let mut bq: BlockDeque<u16> = (0..333).collect();
  bq.reverse();
  assert!(bq.iter().copied().eq((0..333).rev()));

  let mut single = BlockDeque::from([1]);
  let mut cursor = single.cursor();
  single.reverse();
  assert_eq!(cursor.next(&single).unwrap(), Some(&1));
}

#[test]
fn rotate() {
  let mut bq = BlockDeque::from([1, 2, 3, 4, 5, 6]);
  bq.rotate(2);
  assert_eq!(bq, [5, 6, 1, 2, 3, 4]);
  bq.rotate(-4);
  assert_eq!(bq, [3, 4, 5, 6, 1, 2]);
  bq.rotate(6);
  assert_eq!(bq, [3, 4, 5, 6, 1, 2]);
  bq.rotate(0);
  assert_eq!(bq, [3, 4, 5, 6, 1, 2]);
  bq.rotate(-13);
  assert_eq!(bq, [4, 5, 6, 1, 2, 3]);
}

#[test]
fn rotate_across_blocks() {
  let len = 300;
  let mut bq: BlockDeque<usize> = (0..len).collect();
  let mut model: VecDeque<usize> = (0..len).collect();
  for n in [1, 63, 64, 65, 150, -1, -64, -200, 299, 300, 1000, -1000, isize::MIN, isize::MAX] {
    bq.rotate(n);
    let shift = usize::try_from(n.rem_euclid(300)).unwrap();
    model.rotate_right(shift);
    assert!(bq.iter().eq(model.iter()), "{n}");
    assert!(bq.blocks_len() <= len / BLOCKLEN + 2);
    assert_eq!(bq.get(len - 1), model.back());
  }
}

#[test]
fn rotate_round_trip() {
  for len in [2, 63, 64, 65, 130] {
    let original: BlockDeque<usize> = (0..len).collect();
    for n in [1, 31, 32, 33, 64, 100] {
      let mut bq = original.clone();
      bq.rotate(n);
      bq.rotate(-n);
      assert_eq!(bq, original);
    }
  }
}

#[test]
fn truncate() {
  let mut bq: BlockDeque<u32> = (0..300).collect();
  bq.truncate_back(200);
  assert_eq!(bq.len(), 200);
  assert_eq!(bq.back(), Some(&199));
  bq.truncate_front(100);
  assert_eq!(bq.front(), Some(&100));
  bq.truncate_front(1000);
  assert_eq!(bq.len(), 100);
  bq.truncate_back(0);
  assert!(bq.is_empty());
  assert_eq!(bq.blocks_len(), 1);
}
