use std::fmt;
use crate::LazySeq;

/// Sequences are shown with whatever is cached at the moment.
/// Formatting never produces new elements.
macro_rules! LazySeqFormatter {
  ( $($trait:ident),*) => { $(
    impl<T: fmt::$trait + Clone + 'static> fmt::$trait for LazySeq<T> {
      fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,"<lazy [")?;
        let known = self.cached();
        let mut xs = known.iter();
        if let Some(x) = xs.next() { fmt::$trait::fmt(x,f)? }
        for x in xs {
          write!(f,", ")?;
          fmt::$trait::fmt(x,f)?;
        }
        write!(f,"]>")
      }
    }
    )*
  }
}

LazySeqFormatter! { Display, Debug, Binary, LowerHex, UpperHex }
