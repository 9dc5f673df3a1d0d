use crate::collection::BlockDeque;
use alloc::{collections::VecDeque, vec::Vec};

#[derive(Debug, test_strategy::Arbitrary)]
enum Op {
  Clear,
  ExtendBack(Vec<u8>),
  ExtendFront(Vec<u8>),
  Insert(u16, u8),
  PopBack,
  PopFront,
  PushBack(u8),
  PushFront(u8),
  Remove(u16),
  RemoveFirstOccurrence(u8),
  RemoveLastOccurrence(u8),
  Reverse,
  Rotate(i16),
  Set(u16, u8),
  TruncateBack(u16),
  TruncateFront(u16),
}

#[test_strategy::proptest]
fn bounded_deque(#[strategy(0u8..16)] maxlen: u8, pushes: Vec<(bool, u8)>) {
  let maxlen = usize::from(maxlen);
  let mut bq = BlockDeque::with_maxlen(maxlen);
  let mut model = VecDeque::new();
  for (is_back, elem) in pushes {
    if is_back {
      bq.push_back(elem);
      model.push_back(elem);
      if model.len() > maxlen {
        let _ = model.pop_front();
      }
    } else {
      bq.push_front(elem);
      model.push_front(elem);
      if model.len() > maxlen {
        let _ = model.pop_back();
      }
    }
    assert!(bq.len() <= maxlen);
  }
  assert!(bq.iter().eq(model.iter()));
}

#[test_strategy::proptest]
fn operations(ops: Vec<Op>) {
  let mut bq = BlockDeque::new();
  let mut model = VecDeque::new();
  for op in ops {
    let len = model.len();
    match op {
      Op::Clear => {
        bq.clear();
        model.clear();
      }
      Op::ExtendBack(elems) => {
        bq.extend_back(elems.iter().copied());
        model.extend(elems);
      }
      Op::ExtendFront(elems) => {
        bq.extend_front(elems.iter().copied());
        for elem in elems {
          model.push_front(elem);
        }
      }
      Op::Insert(idx, elem) => {
        let idx = usize::from(idx) % len.wrapping_add(1);
        bq.insert(idx, elem).unwrap();
        model.insert(idx, elem);
      }
      Op::PopBack => assert_eq!(bq.pop_back(), model.pop_back()),
      Op::PopFront => assert_eq!(bq.pop_front(), model.pop_front()),
      Op::PushBack(elem) => {
        bq.push_back(elem);
        model.push_back(elem);
      }
      Op::PushFront(elem) => {
        bq.push_front(elem);
        model.push_front(elem);
      }
      Op::Remove(idx) => {
        let idx = if len == 0 { usize::from(idx) } else { usize::from(idx) % len };
        assert_eq!(bq.remove(idx).ok(), model.remove(idx));
      }
      Op::RemoveFirstOccurrence(elem) => {
        let idx_opt = model.iter().position(|local| *local == elem);
        let rslt = bq.remove_first_occurrence(&elem).ok();
        assert_eq!(rslt, idx_opt.and_then(|idx| model.remove(idx)));
      }
      Op::RemoveLastOccurrence(elem) => {
        let idx_opt = model.iter().rposition(|local| *local == elem);
        let rslt = bq.remove_last_occurrence(&elem).ok();
        assert_eq!(rslt, idx_opt.and_then(|idx| model.remove(idx)));
      }
      Op::Reverse => {
        bq.reverse();
        model.make_contiguous().reverse();
      }
      Op::Rotate(n) => {
        bq.rotate(n.into());
        if let Some(len_i) = isize::try_from(len).ok().filter(|elem| *elem > 0) {
          model.rotate_right(isize::from(n).rem_euclid(len_i).unsigned_abs());
        }
      }
      Op::Set(idx, elem) => {
        if len > 0 {
          let idx = usize::from(idx) % len;
          let prev = model.get_mut(idx).map(|local| core::mem::replace(local, elem));
          assert_eq!(bq.set(idx, elem).ok(), prev);
        } else {
          assert!(bq.set(idx.into(), elem).is_err());
        }
      }
      Op::TruncateBack(new_len) => {
        bq.truncate_back(new_len.into());
        model.truncate(new_len.into());
      }
      Op::TruncateFront(new_len) => {
        bq.truncate_front(new_len.into());
        let _ = model.drain(..len.saturating_sub(new_len.into()));
      }
    }
    assert_eq!(bq.len(), model.len());
    assert_eq!(bq.front(), model.front());
    assert_eq!(bq.back(), model.back());
  }
  assert!(bq.iter().eq(model.iter()));
  assert!(bq.iter().rev().eq(model.iter().rev()));
  for (idx, elem) in model.iter().enumerate() {
    assert_eq!(bq.get(idx), Some(elem));
  }
}

#[test_strategy::proptest]
fn rotate_round_trip(data: Vec<u8>, n: i16) {
  let original: BlockDeque<u8> = data.into_iter().collect();
  let mut bq = original.clone();
  bq.rotate(n.into());
  bq.rotate(-isize::from(n));
  assert_eq!(bq, original);
}
