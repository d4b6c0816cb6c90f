// Memoizing sequences over single-pass producers

use std::any::Any;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug,trace};
use crate::error::{Error,Result};
use crate::sequence::Sequence;

/// A restartable, memoizing view of a source of elements.
///
/// Elements are pulled from the source only when an operation needs them
/// and every pulled element is remembered, so the source runs at most once
/// per element no matter how many times the sequence is traversed.
///
/// Cloning a `LazySeq` clones the handle: both handles refer to the same
/// cache and cursor. Use [`LazySeq::layer`] to stack a new instance on top
/// of an existing one.
pub struct LazySeq<T>(Rc<RefCell<State<T>>>);

impl<T> Clone for LazySeq<T> {
  fn clone(&self) -> Self { LazySeq(Rc::clone(&self.0)) }
}

struct State<T> {
  source:    Source<T>,

  /// Every element produced so far, in order. Unused for materialized
  /// sources, which are their own cache.
  cache:     Vec<T>,

  /// Set once the whole content is known.
  is_cached: bool,
}

/// Where the elements come from. Decided once, at construction.
enum Source<T> {
  Materialized(Rc<dyn Sequence<Item = T>>),
  Producer(Producer<T>),
}

/// A single-pass cursor.
enum Producer<T> {
  /// An arbitrary one-shot iterator.
  External(Box<dyn Iterator<Item = T>>),

  /// Another lazy sequence. Pulling from it runs a full pass over it,
  /// which replays its cache before advancing the shared root producer.
  Parent(LazySeq<T>),
}

impl<T: Clone + 'static> LazySeq<T> {

  fn with_source(source: Source<T>) -> Self {
    let is_cached = matches!(source, Source::Materialized(_));
    LazySeq(Rc::new(RefCell::new(State {
      source, cache: Vec::new(), is_cached
    })))
  }

  /// A fully known sequence. The sequence is kept as is and acts as
  /// the cache, so no production ever happens.
  pub fn materialized<S>(xs: S) -> Self
    where S: Sequence<Item = T> + 'static {
    Self::shared(Rc::new(xs))
  }

  /// Like [`LazySeq::materialized`], but aliases a sequence that is
  /// already shared.
  pub fn shared(xs: Rc<dyn Sequence<Item = T>>) -> Self {
    Self::with_source(Source::Materialized(xs))
  }

  /// Memoize a single-pass producer. Nothing is pulled until needed.
  pub fn from_producer<I>(producer: I) -> Self
    where I: IntoIterator<Item = T>, I::IntoIter: 'static {
    let it: Box<dyn Iterator<Item = T>> = Box::new(producer.into_iter().fuse());
    Self::with_source(Source::Producer(Producer::External(it)))
  }

  /// A new instance stacked on top of `parent`. The new instance has its
  /// own cache, but all elements it sees come through `parent`, so the
  /// root producer is still advanced only once per element.
  pub fn layer(parent: &LazySeq<T>) -> Self {
    Self::with_source(Source::Producer(Producer::Parent(parent.clone())))
  }

  /// Classify a dynamically typed source.
  ///
  /// Recognized sources are `LazySeq<T>` (layered over), the in-memory
  /// sequences `Vec<T>`, `VecDeque<T>`, `Box<[T]>` and `Rc<[T]>`, and
  /// boxed iterators `Box<dyn Iterator<Item = T>>`. Anything else is
  /// rejected here rather than on first use.
  pub fn from_dyn(source: Box<dyn Any>) -> Result<Self> {
    Self::classify(source)
      .map_err(|_| Error::InvalidSource { type_name: "Box<dyn Any>" })
  }

  /// Like [`LazySeq::from_dyn`] for a statically known source type, which
  /// is reported by name when rejected. Values that are already a
  /// `Box<dyn Any>` should go through `from_dyn`.
  pub fn from_any<S: Any>(source: S) -> Result<Self> {
    Self::classify(Box::new(source))
      .map_err(|_| Error::InvalidSource { type_name: std::any::type_name::<S>() })
  }

  fn classify(source: Box<dyn Any>) -> std::result::Result<Self, Box<dyn Any>> {
    let mut source = source;

    macro_rules! classify {
      ( $( $t:ty => $mk:expr ),* ) => { $(
        source = match source.downcast::<$t>() {
                   Ok(x)  => return Ok($mk(*x)),
                   Err(s) => s
                 };
      )* }
    }

    classify! {
      LazySeq<T>                   => |p: LazySeq<T>| Self::layer(&p),
      Vec<T>                       => Self::materialized,
      VecDeque<T>                  => Self::materialized,
      Box<[T]>                     => Self::materialized,
      Rc<[T]>                      => Self::materialized,
      Box<dyn Iterator<Item = T>>  => Self::from_producer
    }

    Err(source)
  }


  /// Is the whole content known.
  pub fn is_cached(&self) -> bool { self.0.borrow().is_cached }

  /// Is this instance layered over another lazy sequence.
  pub fn is_clone(&self) -> bool {
    matches!(self.0.borrow().source, Source::Producer(Producer::Parent(_)))
  }

  /// The number of elements known so far. Never forces production.
  pub fn cached_len(&self) -> usize { self.0.borrow().cached_len() }

  /// A snapshot of the elements known so far. Never forces production.
  pub fn cached(&self) -> Vec<T> {
    let st = self.0.borrow();
    (0 .. st.cached_len()).filter_map(|i| st.cached_at(i)).collect()
  }

  /// Force the whole sequence and return its elements.
  pub fn to_vec(&self) -> Vec<T> {
    self.fill_all();
    self.cached()
  }

  /// The number of elements.
  /// Forces production of the whole sequence if it is not cached yet.
  pub fn len(&self) -> usize {
    if !self.is_cached() {
      trace!("len: forcing full consumption");
      self.fill_all();
    }
    self.cached_len()
  }

  /// Does the sequence have at least one element.
  /// Produces at most one new element.
  pub fn is_nonempty(&self) -> bool { self.iter().next().is_some() }

  pub fn is_empty(&self) -> bool { !self.is_nonempty() }


  // ---------------------------------------------------------------------------
  // Operations used by passes over the sequence.

  /// The element at cache position `i`, if already known.
  pub(crate) fn cached_at(&self, i: usize) -> Option<T> {
    self.0.borrow().cached_at(i)
  }

  /// The parent of a layered instance.
  pub(crate) fn parent(&self) -> Option<LazySeq<T>> {
    match &self.0.borrow().source {
      Source::Producer(Producer::Parent(p)) => Some(p.clone()),
      _ => None
    }
  }

  /// Advance the external producer. Nothing is pulled once the sequence
  /// is cached.
  pub(crate) fn pull_external(&self) -> Option<T> {
    let mut st = self.0.borrow_mut();
    if st.is_cached { return None }
    match &mut st.source {
      Source::Producer(Producer::External(it)) => it.next(),
      _ => None
    }
  }

  pub(crate) fn push(&self, x: T) { self.0.borrow_mut().cache.push(x) }

  pub(crate) fn mark_cached(&self) {
    let mut st = self.0.borrow_mut();
    if !st.is_cached {
      st.is_cached = true;
      debug!(len = st.cache.len(), "producer exhausted, sequence fully cached");
    }
  }

  /// Produce elements until at least `n` are known, or the source ends.
  pub(crate) fn fill_to(&self, n: usize) {
    let have = self.cached_len();
    if have >= n { return }
    let mut pass = self.iter_from(have);
    let _ = pass.nth(n - have - 1);
  }

  /// Produce every remaining element.
  pub(crate) fn fill_all(&self) {
    if self.is_cached() { return }
    self.iter().for_each(drop)
  }
}

impl<T: Clone + 'static> From<Vec<T>> for LazySeq<T> {
  fn from(xs: Vec<T>) -> Self { Self::materialized(xs) }
}

impl<T: Clone + 'static> TryFrom<Box<dyn Any>> for LazySeq<T> {
  type Error = Error;
  fn try_from(source: Box<dyn Any>) -> Result<Self> { Self::from_dyn(source) }
}

impl<T: Clone> State<T> {
  fn cached_len(&self) -> usize {
    match &self.source {
      Source::Materialized(xs) => xs.length(),
      Source::Producer(_)      => self.cache.len()
    }
  }

  fn cached_at(&self, i: usize) -> Option<T> {
    match &self.source {
      Source::Materialized(xs) =>
        if i < xs.length() { Some(xs.index(i)) } else { None },
      Source::Producer(_) => self.cache.get(i).cloned()
    }
  }
}
