//! Source factories: every way a [`Sequence`] comes into existence.
//!
//! In-memory collections, integer ranges, generator functions, and the
//! file-backed sources in the submodules (text lines, characters, token
//! scanning, binary records).

pub mod file;
pub mod record;
pub mod token;

use std::iter::Peekable;
use std::mem;

use crate::error::{Error, Result};
use crate::ops;
use crate::sequence::{NullableSource, PullSource, Sequence};

pub use file::{chars, chars_of, lines};
pub use record::{from_records, Record, RecordWriter};
pub use token::{tokens, tokens_of_file, tokens_of_str};

/// Sequence over a fixed array of elements.
pub fn of<T: 'static, const N: usize>(items: [T; N]) -> Sequence<T> {
    from_vec(items.into())
}

/// Sequence over a vector, in order.
pub fn from_vec<T: 'static>(items: Vec<T>) -> Sequence<T> {
    from_iter(items.into_iter())
}

/// Adapt any standard iterator into a sequence.
pub fn from_iter<T: 'static, I>(iter: I) -> Sequence<T>
where
    I: Iterator<Item = T> + 'static,
{
    Sequence::from_pull(IterSource {
        iter: iter.peekable(),
    })
}

pub fn empty<T: 'static>() -> Sequence<T> {
    from_vec(Vec::new())
}

pub fn singleton<T: 'static>(item: T) -> Sequence<T> {
    from_vec(vec![item])
}

/// Unbounded ascending counter starting at `from`. Ends just before the
/// value would overflow.
pub fn counter(from: i64) -> Sequence<i64> {
    Sequence::from_nullable(Counter { next: Some(from) })
}

/// Half-open integer range `[from, to)`. An empty range is invalid.
pub fn range(from: i64, to: i64) -> Result<Sequence<i64>> {
    if to <= from {
        return Err(Error::InvalidArgument(format!(
            "empty range: [{from}, {to})"
        )));
    }
    Ok(Sequence::from_pull(Range {
        next: from,
        end: to,
        done: false,
    }))
}

/// Closed integer range `[from, until]`.
pub fn closed_range(from: i64, until: i64) -> Result<Sequence<i64>> {
    if until < from {
        return Err(Error::InvalidArgument(format!(
            "empty range: [{from}, {until}]"
        )));
    }
    Ok(Sequence::from_pull(ClosedRange {
        next: Some(from),
        until,
    }))
}

/// Infinite sequence `seed, op(seed), op(op(seed)), ...`.
pub fn iterate<T: Clone + 'static>(
    seed: T,
    op: impl FnMut(&T) -> T + 'static,
) -> Sequence<T> {
    Sequence::from_pull(Iterate {
        current: seed,
        op,
    })
}

/// Lift nested vectors into a sequence of sequences.
pub fn from_nested<T: 'static>(nested: Vec<Vec<T>>) -> Sequence<Sequence<T>> {
    from_iter(nested.into_iter().map(from_vec))
}

/// Concatenate any number of sequences in order.
pub fn concat_all<T: 'static>(sequences: Vec<Sequence<T>>) -> Sequence<T> {
    Sequence::from_pull(ops::concat::Concat::new(sequences))
}

struct IterSource<I: Iterator> {
    iter: Peekable<I>,
}

impl<I: Iterator> PullSource for IterSource<I> {
    type Item = I::Item;

    fn probe(&mut self) -> Result<bool> {
        Ok(self.iter.peek().is_some())
    }

    fn pull(&mut self) -> Result<I::Item> {
        self.iter.next().ok_or(Error::Exhausted)
    }
}

struct Counter {
    next: Option<i64>,
}

impl NullableSource for Counter {
    type Item = i64;

    fn next_or_end(&mut self) -> Result<Option<i64>> {
        match self.next {
            None => Ok(None),
            Some(value) => {
                self.next = value.checked_add(1);
                Ok(Some(value))
            }
        }
    }
}

struct Range {
    next: i64,
    end: i64,
    done: bool,
}

impl PullSource for Range {
    type Item = i64;

    fn probe(&mut self) -> Result<bool> {
        Ok(!self.done && self.next < self.end)
    }

    fn pull(&mut self) -> Result<i64> {
        if self.done || self.next >= self.end {
            return Err(Error::Exhausted);
        }
        let value = self.next;
        match self.next.checked_add(1) {
            Some(next) => self.next = next,
            None => self.done = true,
        }
        Ok(value)
    }
}

struct ClosedRange {
    next: Option<i64>,
    until: i64,
}

impl PullSource for ClosedRange {
    type Item = i64;

    fn probe(&mut self) -> Result<bool> {
        Ok(matches!(self.next, Some(n) if n <= self.until))
    }

    fn pull(&mut self) -> Result<i64> {
        match self.next {
            Some(n) if n <= self.until => {
                self.next = n.checked_add(1);
                Ok(n)
            }
            _ => Err(Error::Exhausted),
        }
    }
}

struct Iterate<T, F> {
    current: T,
    op: F,
}

impl<T: Clone, F: FnMut(&T) -> T> PullSource for Iterate<T, F> {
    type Item = T;

    fn probe(&mut self) -> Result<bool> {
        Ok(true)
    }

    fn pull(&mut self) -> Result<T> {
        let next = (self.op)(&self.current);
        Ok(mem::replace(&mut self.current, next))
    }
}
