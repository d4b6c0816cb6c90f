pub mod error;
pub mod sequence;
pub mod core;
pub mod iter;
pub mod index;
pub mod slice;
pub mod display;

#[cfg(test)]
pub mod proptest;

pub use crate::core::LazySeq;
pub use crate::error::{Error,Result};
pub use crate::iter::Iter;
pub use crate::sequence::Sequence;
pub use crate::slice::{Slice,Indices};
