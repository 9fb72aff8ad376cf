use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::sequence::{Lookahead, PullSource, Sequence};
use crate::source;

/// Consecutive fixed-size chunks. The final chunk may be shorter when the
/// upstream ends first. Each chunk is materialized eagerly; chunks are
/// produced lazily one at a time.
pub struct Batch<T: 'static> {
    inner: Sequence<T>,
    size: usize,
}

impl<T: 'static> Batch<T> {
    pub(crate) fn new(inner: Sequence<T>, size: usize) -> Self {
        Batch { inner, size }
    }
}

impl<T: 'static> PullSource for Batch<T> {
    type Item = Sequence<T>;

    fn probe(&mut self) -> Result<bool> {
        self.inner.has_next()
    }

    fn pull(&mut self) -> Result<Sequence<T>> {
        if !self.inner.has_next()? {
            return Err(Error::Exhausted);
        }
        let mut chunk = Vec::with_capacity(self.size);
        while chunk.len() < self.size && self.inner.has_next()? {
            chunk.push(self.inner.next()?);
        }
        Ok(source::from_vec(chunk))
    }

    fn release(&mut self) -> Result<()> {
        self.inner.close()
    }
}

/// Groups consecutive comparator-equal elements.
///
/// Requires the upstream to already be sorted under the comparator: an
/// element comparing below its group's representative fails with
/// [`Error::Unsorted`]. The final group is flushed when the upstream ends.
pub struct GroupByOrder<T: 'static, F> {
    inner: Lookahead<T>,
    cmp: F,
}

impl<T: 'static, F> GroupByOrder<T, F> {
    pub(crate) fn new(inner: Sequence<T>, cmp: F) -> Self {
        GroupByOrder {
            inner: Lookahead::new(inner),
            cmp,
        }
    }
}

impl<T: 'static, F: FnMut(&T, &T) -> Ordering> PullSource for GroupByOrder<T, F> {
    type Item = Sequence<T>;

    fn probe(&mut self) -> Result<bool> {
        self.inner.has_next()
    }

    fn pull(&mut self) -> Result<Sequence<T>> {
        let first = match self.inner.next()? {
            Some(item) => item,
            None => return Err(Error::Exhausted),
        };
        let mut group = vec![first];
        loop {
            let belongs = match self.inner.peek()? {
                None => break,
                Some(item) => match (self.cmp)(item, &group[0]) {
                    Ordering::Equal => true,
                    Ordering::Greater => false,
                    Ordering::Less => {
                        return Err(Error::Unsorted(
                            "element compares below its group".into(),
                        ));
                    }
                },
            };
            if !belongs {
                break;
            }
            match self.inner.next()? {
                Some(item) => group.push(item),
                None => break,
            }
        }
        Ok(source::from_vec(group))
    }

    fn release(&mut self) -> Result<()> {
        self.inner.close()
    }
}
