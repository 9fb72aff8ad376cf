//! # Lazy Sequence Engine
//!
//! Single-pass, pull-based sequences with deterministic resource release.
//!
//! ## Core idea
//! Elements are pulled on demand through a chain of decorators, each the
//! sole owner of its upstream. A sequence can be entered by exactly one
//! consuming operation; whichever pull exhausts it releases its resources
//! (file handles, spill files) on the spot, and `close` is always safe to
//! call again.
//!
//! ```no_run
//! use seq_engine::{source, Result};
//!
//! fn main() -> Result<()> {
//!     let doubled = source::of([3, 8, 5, 6, 7, 9, 1, 15])
//!         .take_while(|x| *x >= 3)?
//!         .map(|x| x * 2)?
//!         .collect_vec()?;
//!     assert_eq!(doubled, vec![6, 16, 10, 12, 14, 18]);
//!     Ok(())
//! }
//! ```

pub mod buffer;
pub mod error;
pub mod ops;
pub mod sequence;
pub mod sort;
pub mod source;

// Public re-exports for the top-level API
pub use buffer::{BoundedBuffer, OverflowPolicy};
pub use error::{Error, Result};
pub use ops::buffered::Buffered;
pub use sequence::{Lookahead, NullableSource, PullSource, Sequence, SequenceIter};
pub use sort::ExternalSort;
pub use source::{Record, RecordWriter};
