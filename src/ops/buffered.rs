use crate::buffer::{BoundedBuffer, OverflowPolicy};
use crate::error::{Error, Result};
use crate::sequence::{PullSource, Sequence};

/// Prefetching wrapper: pulls up to `size` elements from the upstream
/// ahead of consumption.
///
/// The buffer refills only when it has fully drained, so the upstream is
/// pulled in bursts of up to `size`. When a refill drains the upstream,
/// the upstream releases its resources immediately — possibly well before
/// the buffered elements are consumed.
pub struct Buffered<T: 'static> {
    inner: Sequence<T>,
    buf: BoundedBuffer<T>,
}

impl<T: 'static> Buffered<T> {
    pub(crate) fn new(inner: Sequence<T>, size: usize) -> Self {
        Buffered {
            inner,
            buf: BoundedBuffer::new(size, OverflowPolicy::Reject),
        }
    }

    fn fill_if_empty(&mut self) -> Result<()> {
        if !self.buf.is_empty() {
            return Ok(());
        }
        while !self.buf.is_full() && self.inner.has_next()? {
            self.buf.push_back(self.inner.next()?);
        }
        Ok(())
    }

    /// Inspect the next element without consuming it. Triggers a refill if
    /// the buffer is empty.
    pub fn peek(&mut self) -> Result<Option<&T>> {
        self.fill_if_empty()?;
        Ok(self.buf.peek_front())
    }

    pub fn has_next(&mut self) -> Result<bool> {
        Ok(!self.buf.is_empty() || self.inner.has_next()?)
    }

    pub fn next(&mut self) -> Result<T> {
        self.fill_if_empty()?;
        self.buf.pop_front().ok_or(Error::Exhausted)
    }

    /// Convert back into a sequence, keeping the prefetch behavior.
    pub fn into_seq(self) -> Sequence<T> {
        Sequence::from_pull(self)
    }
}

impl<T: 'static> PullSource for Buffered<T> {
    type Item = T;

    fn probe(&mut self) -> Result<bool> {
        self.has_next()
    }

    fn pull(&mut self) -> Result<T> {
        Buffered::next(self)
    }

    fn release(&mut self) -> Result<()> {
        self.inner.close()
    }
}
