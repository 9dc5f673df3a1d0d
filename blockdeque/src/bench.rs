use crate::collection::BlockDeque;

pub(crate) fn _data(len: usize) -> BlockDeque<u8> {
  (0..len)
    .map(|el| {
      let n = el % usize::from(u8::MAX);
      n.try_into().unwrap()
    })
    .collect()
}
