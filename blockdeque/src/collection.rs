//! Collection types

mod block_deque;

pub use block_deque::{
  BLOCKLEN, BackwardCursor, BlockDeque, BlockDequeError, Cursor, ForwardCursor, IntoIter, Iter,
  IterMut, MAXFREEBLOCKS,
};
