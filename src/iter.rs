use tracing::trace;
use crate::LazySeq;

impl<T: Clone + 'static> LazySeq<T> {

  /// Start a new pass over the sequence.
  ///
  /// A pass first replays the elements that are already known and then
  /// continues with the source. Passes are not independent: they share the
  /// cache and the producer's cursor, so elements pulled by one pass are
  /// visible to the others through the cache.
  pub fn iter(&self) -> Iter<T> { self.iter_from(0) }

  /// A pass that starts at cache position `pos`.
  /// Assert: `pos <= cached_len()`.
  pub(crate) fn iter_from(&self, pos: usize) -> Iter<T> {
    Iter { seq: self.clone(), pos, phase: Phase::Replay }
  }
}

impl<'a, T: Clone + 'static> IntoIterator for &'a LazySeq<T> {
  type Item = T;
  type IntoIter = Iter<T>;
  fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// A single pass over a [`LazySeq`].
pub struct Iter<T> {
  seq:   LazySeq<T>,

  /// Cache position of the next element of this pass.
  /// Never larger than the cache.
  pos:   usize,
  phase: Phase<T>
}

enum Phase<T> {
  /// Nothing pulled by this pass yet.
  Replay,

  /// This pass has reached the end of the cache at least once.
  /// `upstream` is a pass over the parent, for layered sequences.
  Pull { upstream: Option<Box<Iter<T>>> },

  Done
}

impl<T: Clone + 'static> Iterator for Iter<T> {
  type Item = T;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      // Other passes may have grown or finished the cache in the meantime.
      if let Some(x) = self.seq.cached_at(self.pos) {
        self.pos += 1;
        return Some(x)
      }
      if self.seq.is_cached() { self.phase = Phase::Done }

      match &mut self.phase {

        Phase::Replay => {
          let upstream = self.seq.parent().map(|p| Box::new(p.iter_from(self.pos)));
          trace!(cache_from = self.pos, clone = upstream.is_some(),
                 "pass: replay done, pulling");
          self.phase = Phase::Pull { upstream };
        }

        Phase::Pull { upstream } => {
          let item = match upstream {
                       Some(parent) => {
                         // The parent's element at our position is the one
                         // we are missing.
                         parent.pos = self.pos;
                         parent.next()
                       }
                       None => self.seq.pull_external()
                     };
          match item {
            Some(x) => {
              self.seq.push(x.clone());
              self.pos += 1;
              return Some(x)
            }
            None => {
              self.seq.mark_cached();
              self.phase = Phase::Done;
            }
          }
        }

        Phase::Done => return None
      }
    }
  }
}
