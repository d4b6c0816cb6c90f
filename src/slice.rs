use std::ops::{Range,RangeFrom,RangeFull,RangeTo};
use tracing::trace;
use crate::LazySeq;
use crate::error::{Error,Result};

/// Bounds for slicing a sequence.
/// Any bound may be missing and any bound may be negative. Negative
/// `start` and `stop` count from the end, a negative `step` walks
/// the sequence backwards.
#[derive(Clone,Copy,Debug,Default,PartialEq,Eq)]
pub struct Slice {
  pub start: Option<isize>,
  pub stop:  Option<isize>,
  pub step:  Option<isize>
}

impl Slice {
  pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>)
    -> Self {
    Slice { start, stop, step }
  }

  /// The same bounds, taking every `step`-th element.
  pub fn step_by(self, step: isize) -> Self {
    Slice { step: Some(step), ..self }
  }

  fn checked_step(&self) -> Result<isize> {
    match self.step {
      Some(0) => Err(Error::ZeroStep),
      Some(s) => Ok(s),
      None    => Ok(1)
    }
  }

  /// Can the slice be taken without knowing where the sequence ends.
  fn is_forward(&self) -> bool {
    [self.start, self.stop, self.step].iter().all(|b| b.map_or(true, |x| x >= 0))
  }

  /// The positions selected from a sequence of the given length,
  /// in the order they are selected.
  pub fn indices(&self, len: usize) -> Result<Indices> {
    let step = self.checked_step()?;
    let len  = len as isize;

    // Clamp a bound the way sequence slicing does.
    let adjust = |bound: isize| {
      if bound < 0 {
        let b = bound + len;
        if b < 0 { if step < 0 { -1 } else { 0 } } else { b }
      } else if bound >= len {
        if step < 0 { len - 1 } else { len }
      } else { bound }
    };

    let (start, stop) =
      if step < 0 {
        (self.start.map_or(len - 1, adjust), self.stop.map_or(-1, adjust))
      } else {
        (self.start.map_or(0, adjust), self.stop.map_or(len, adjust))
      };

    Ok(Indices { next: start, stop, step })
  }
}

impl From<RangeFull> for Slice {
  fn from(_: RangeFull) -> Self { Slice::default() }
}

impl From<Range<isize>> for Slice {
  fn from(r: Range<isize>) -> Self { Slice::new(Some(r.start), Some(r.end), None) }
}

impl From<RangeFrom<isize>> for Slice {
  fn from(r: RangeFrom<isize>) -> Self { Slice::new(Some(r.start), None, None) }
}

impl From<RangeTo<isize>> for Slice {
  fn from(r: RangeTo<isize>) -> Self { Slice::new(None, Some(r.end), None) }
}

/// Positions selected by a [`Slice`].
#[derive(Clone,Debug)]
pub struct Indices {
  next: isize,
  stop: isize,
  step: isize
}

impl Iterator for Indices {
  type Item = usize;
  fn next(&mut self) -> Option<usize> {
    let more = if self.step < 0 { self.next > self.stop }
               else { self.next < self.stop };
    if !more { return None }
    let i = self.next;
    // Past the representable range means past the end of the slice.
    self.next = self.next.checked_add(self.step).unwrap_or(self.stop);
    Some(i as usize)
  }
}


impl<T: Clone + 'static> LazySeq<T> {

  /// Slice the sequence.
  ///
  /// When the sequence is not cached yet and all bounds are non-negative
  /// the result is a new lazy sequence that produces nothing until it is
  /// used. Otherwise as much of this sequence as the bounds require is
  /// produced and the result is fully cached.
  /// Bounds past the end are clamped, they never fail.
  pub fn slice(&self, bounds: impl Into<Slice>) -> Result<LazySeq<T>> {
    let bounds = bounds.into();
    let step   = bounds.checked_step()?;

    if !self.is_cached() {
      if bounds.is_forward() {
        return Ok(self.slice_view(&bounds, step as usize))
      }

      match forcing_bound(&bounds, step) {
        Some(n) => self.fill_to(n),
        None    => {
          trace!(?bounds, "negative slice: forcing full consumption");
          self.fill_all()
        }
      }
    }

    let picked: Vec<T> = bounds.indices(self.cached_len())?
                               .filter_map(|i| self.cached_at(i))
                               .collect();
    Ok(LazySeq::materialized(picked))
  }

  /// A lazy slice with non-negative bounds.
  fn slice_view(&self, bounds: &Slice, step: usize) -> LazySeq<T> {
    let start = bounds.start.unwrap_or(0) as usize;
    let pass  = self.iter().skip(start);
    match bounds.stop {
      Some(stop) => {
        let n = (stop as usize).saturating_sub(start);
        LazySeq::from_producer(pass.take(n).step_by(step))
      }
      None => LazySeq::from_producer(pass.step_by(step))
    }
  }
}

/// How many elements must be known before a slice with some negative
/// bound can be taken. `None` means the whole sequence is needed.
///
/// Only a backward slice whose explicit `start` and `stop` are both
/// non-negative can be resolved early: it reads positions up to `start`.
/// Any other negative bound is relative to the end of the sequence.
fn forcing_bound(bounds: &Slice, step: isize) -> Option<usize> {
  if step > 0 { return None }
  match (bounds.start, bounds.stop) {
    (Some(start), None)       if start >= 0              => Some(start as usize + 1),
    (Some(start), Some(stop)) if start >= 0 && stop >= 0 => Some(start as usize + 1),
    _ => None
  }
}
