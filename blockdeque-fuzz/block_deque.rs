//! Block deque

#![allow(
  // Does not matter
  clippy::unwrap_used
)]
#![no_main]

use blockdeque::collection::BlockDeque;

libfuzzer_sys::fuzz_target!(|data: (BlockDeque<u8>, Vec<(u8, u8, i16)>)| {
  let (mut deque, ops) = data;
  let maxlen = deque.maxlen();
  for (op, elem, n) in ops {
    let len = deque.len();
    let idx = usize::from(elem);
    match op % 10 {
      0 => deque.push_back(elem),
      1 => deque.push_front(elem),
      2 => {
        let _elem = deque.pop_back();
      }
      3 => {
        let _elem = deque.pop_front();
      }
      4 => deque.rotate(n.into()),
      5 => deque.reverse(),
      6 => {
        let _rslt = deque.remove(idx);
      }
      7 => {
        let _rslt = deque.insert(idx, elem);
      }
      8 => {
        let _rslt = deque.remove_first_occurrence(&elem);
      }
      _ => deque.truncate_front(idx),
    }
    assert!(deque.len() <= len.wrapping_add(1));
    if let Some(elem) = maxlen {
      assert!(deque.len() <= elem);
    }
    assert_eq!(deque.iter().count(), deque.len());
    assert!(deque.iter().rev().eq(deque.iter().collect::<Vec<_>>().into_iter().rev()));
  }
  let mut cursor = deque.cursor();
  let mut visited = 0;
  while cursor.next(&deque).unwrap().is_some() {
    visited += 1;
  }
  assert_eq!(visited, deque.len());
});
