use crate::collection::BlockDeque;
use arbitrary::{Arbitrary, Unstructured};

impl<'any, T> Arbitrary<'any> for BlockDeque<T>
where
  T: Arbitrary<'any>,
{
  #[inline]
  fn arbitrary(u: &mut Unstructured<'any>) -> arbitrary::Result<Self> {
    let mut this = match u.arbitrary::<Option<u8>>()? {
      Some(maxlen) => Self::with_maxlen(maxlen.into()),
      None => Self::new(),
    };
    for elem in u.arbitrary_iter::<T>()? {
      this.push_back(elem?);
    }
    Ok(this)
  }
}
