use std::cell::Cell;
use std::rc::Rc;
use proptest::prelude::*;
use proptest::test_runner::*;
use crate::Slice;

/// A producer that records how many elements it has given out.
pub struct Counted<I> {
  it:     I,
  pulled: Rc<Cell<usize>>
}

impl<I> Counted<I> {
  pub fn new<S>(src: S) -> (Self, Rc<Cell<usize>>)
    where S: IntoIterator<IntoIter = I> {
    let pulled = Rc::new(Cell::new(0));
    (Counted { it: src.into_iter(), pulled: pulled.clone() }, pulled)
  }
}

impl<I: Iterator> Iterator for Counted<I> {
  type Item = I::Item;
  fn next(&mut self) -> Option<Self::Item> {
    let x = self.it.next()?;
    self.pulled.set(self.pulled.get() + 1);
    Some(x)
  }
}



/// Check a property for sequences of every length up to a small bound.
/// The property returns `None` to reject an input.
pub fn do_test<S: Strategy>
    ( s: fn(usize)   -> S
    , p: fn(S::Value) -> Option<bool>
    ) {
  for len in 0 .. 12 {
    let mut cfg: Config = <_>::default();
    cfg.failure_persistence = None;
    let mut runner = TestRunner::new(cfg);
    let strategy = s(len);
    runner.run(&strategy, |arg| {
      match p(arg) {
        Some(result) =>
          if result { Ok(()) }
          else {
            Err(TestCaseError::Fail("unexpected result".into()))
          },
        None => Err(TestCaseError::Reject("invalid input".into()))
      }
    }).unwrap()
  }
}

fn bound(len: usize) -> impl Strategy<Value = isize> {
  let n = len as isize;
  prop_oneof![ 8 => -n - 2 ..= n + 2
             , 1 => Just(isize::MIN)
             , 1 => Just(isize::MAX)
             ]
}

/// A vector of the given length and an index that may be out of range.
pub fn vec_and_index(len: usize) -> impl Strategy<Value = (Vec<u8>, isize)> {
  (proptest::collection::vec(any::<u8>(), len), bound(len))
}

/// A vector of the given length and slice bounds with a non-zero step.
pub fn vec_and_slice(len: usize) -> impl Strategy<Value = (Vec<u8>, Slice)> {
  let step = prop_oneof![ Just(None)
                        , (-3_isize ..= -1).prop_map(Some)
                        , (1_isize ..= 3).prop_map(Some)
                        , Just(Some(isize::MAX))
                        , Just(Some(isize::MIN))
                        , Just(Some(isize::MIN + 1))
                        ];
  ( proptest::collection::vec(any::<u8>(), len)
  , proptest::option::of(bound(len))
  , proptest::option::of(bound(len))
  , step
  ).prop_map(|(v, start, stop, step)| (v, Slice::new(start, stop, step)))
}

/// Which of `n` sequences to read, and at which index.
pub fn schedule(n: usize) -> impl Strategy<Value = Vec<(usize, isize)>> {
  proptest::collection::vec((0 .. n, -10_isize .. 20), 0 .. 12)
}
