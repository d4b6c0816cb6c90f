use tracing::trace;
use crate::LazySeq;
use crate::error::{Error,Result};

/// Resolve a possibly negative index against a known length.
/// Negative indexes count from the end.
pub(crate) fn resolve_index(index: isize, len: usize) -> Option<usize> {
  if index >= 0 {
    let i = index as usize;
    if i < len { Some(i) } else { None }
  } else {
    len.checked_sub(index.unsigned_abs())
  }
}

impl<T: Clone + 'static> LazySeq<T> {

  /// Get the element at the given index.
  ///
  /// A non-negative index produces elements only up to and including the
  /// requested one. A negative index counts from the end, which requires
  /// producing the whole sequence.
  pub fn get(&self, index: isize) -> Result<T> {
    if !self.is_cached() {
      if index >= 0 {
        self.fill_to(index as usize + 1)
      } else {
        trace!(index, "negative index: forcing full consumption");
        self.fill_all()
      }
    }

    let len = self.cached_len();
    resolve_index(index, len)
      .and_then(|i| self.cached_at(i))
      .ok_or(Error::IndexOutOfRange { index, len })
  }

  /// The first element, producing at most one new element.
  pub fn first(&self) -> Option<T> { self.get(0).ok() }

  /// The last element. Forces the whole sequence.
  pub fn last(&self) -> Option<T> { self.get(-1).ok() }
}
