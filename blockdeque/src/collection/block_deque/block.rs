/// Number of element slots of each block.
///
/// Larger numbers reduce the number of allocations, give faster indexing and rotation and reduce
/// the link to data overhead ratio. A power of two turns the divisions of the index arithmetic
/// into shifts and masks.
pub const BLOCKLEN: usize = 64;
/// Maximum number of vacated blocks kept around for reuse.
pub const MAXFREEBLOCKS: usize = 16;

/// Centre of a block. Empty deques start here so that both ends can grow without allocating.
pub(crate) const CENTER: usize = (BLOCKLEN - 1) / 2;
pub(crate) const BLOCK_MASK: usize = BLOCKLEN - 1;
/// Slot where the first element of an empty deque goes, from either end.
pub(crate) const EMPTY_IDX: usize = CENTER + 1;

const _: () = {
  assert!(BLOCKLEN >= 2 && BLOCKLEN.is_power_of_two());
};

/// Fixed-capacity segment of the chain.
///
/// Slots outside the live range of the deque are always `None`.
pub(crate) struct Block<T> {
  pub(crate) data: [Option<T>; BLOCKLEN],
  pub(crate) left_link: Option<usize>,
  pub(crate) right_link: Option<usize>,
}

impl<T> Block<T> {
  pub(crate) fn new() -> Self {
    Self { data: core::array::from_fn(|_| None), left_link: None, right_link: None }
  }
}
