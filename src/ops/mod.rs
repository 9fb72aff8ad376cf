//! Transformation decorators. Every struct here wraps exactly one
//! upstream [`Sequence`](crate::sequence::Sequence) (two for `zip`, a
//! queue for `concat`), implements the pull contract, and closes its
//! upstream from `release`.

pub mod buffered;
pub mod concat;
pub mod distinct;
pub mod filter;
pub mod grouped;
pub mod map;
pub mod skip;
pub mod sliding;
pub mod sorted;
pub mod take;
pub mod zip;
