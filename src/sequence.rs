use std::collections::VecDeque;
use std::rc::Rc;

/// Sequences whose elements are all known up front.
/// Such sources never need a cache: they are their own cache.
pub trait Sequence {
  type Item : Clone;

  /// Length of this sequence
  fn length(&self) -> usize;

  /// Get the element at a certain index.
  /// Assert: `i < length()`.
  fn index(&self, i: usize) -> Self::Item;
}

impl<T: Clone> Sequence for Vec<T> {
  type Item = T;
  fn length(&self) -> usize { self.len() }
  fn index(&self, i: usize) -> T { self[i].clone() }
}

impl<T: Clone> Sequence for VecDeque<T> {
  type Item = T;
  fn length(&self) -> usize { self.len() }
  fn index(&self, i: usize) -> T { self[i].clone() }
}

impl<T: Clone> Sequence for Box<[T]> {
  type Item = T;
  fn length(&self) -> usize { self.len() }
  fn index(&self, i: usize) -> T { self[i].clone() }
}

impl<T: Clone> Sequence for Rc<[T]> {
  type Item = T;
  fn length(&self) -> usize { self.len() }
  fn index(&self, i: usize) -> T { self[i].clone() }
}

impl<const N: usize, T: Clone> Sequence for [T; N] {
  type Item = T;
  fn length(&self) -> usize { N }
  fn index(&self, i: usize) -> T { self[i].clone() }
}

/// Ranges behave like sequences of integers.
macro_rules! RangeSequence {
  ( $($t:ty),* ) => { $(
    impl Sequence for std::ops::Range<$t> {
      type Item = $t;

      fn length(&self) -> usize {
        if self.end <= self.start { return 0 }
        (self.end as i128 - self.start as i128) as usize
      }

      fn index(&self, i: usize) -> $t {
        assert!(i < self.length());
        (self.start as i128 + i as i128) as $t
      }
    }
    )*
  }
}

RangeSequence! { u8, u16, u32, u64, usize, i8, i16, i32, i64, isize }


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_basics() {
    let x = vec![1,2,3];
    assert_eq!(x.length(), 3);
    assert_eq!(Sequence::index(&x, 2), 3);

    let d: VecDeque<u8> = (0 .. 4).collect();
    assert_eq!(d.length(), 4);
    assert_eq!(Sequence::index(&d, 0), 0);

    let a = ['a','b'];
    assert_eq!(a.length(), 2);
    assert_eq!(Sequence::index(&a, 1), 'b');
  }

  #[test]
  fn test_ranges() {
    assert_eq!((0_i64 .. 7).length(), 7);
    assert_eq!((3_u8 .. 7).index(2), 5);
    assert_eq!((-3_i32 .. 2).index(0), -3);
    assert_eq!((5_usize .. 2).length(), 0);
    assert_eq!((-100_i8 .. 100).length(), 200);
    assert_eq!((-100_i8 .. 100).index(199), 99);
  }
}
