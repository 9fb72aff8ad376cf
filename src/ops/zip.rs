use crate::error::Result;
use crate::sequence::{PullSource, Sequence};

/// Positional pairing. Ends as soon as either side ends — the longer
/// side's surplus is never pulled.
pub struct Zip<A: 'static, B: 'static> {
    left: Sequence<A>,
    right: Sequence<B>,
}

impl<A: 'static, B: 'static> Zip<A, B> {
    pub(crate) fn new(left: Sequence<A>, right: Sequence<B>) -> Self {
        Zip { left, right }
    }
}

impl<A: 'static, B: 'static> PullSource for Zip<A, B> {
    type Item = (A, B);

    fn probe(&mut self) -> Result<bool> {
        Ok(self.left.has_next()? && self.right.has_next()?)
    }

    fn pull(&mut self) -> Result<(A, B)> {
        let left = self.left.next()?;
        let right = self.right.next()?;
        Ok((left, right))
    }

    fn release(&mut self) -> Result<()> {
        let left = self.left.close();
        let right = self.right.close();
        left.and(right)
    }
}

/// Pairs each element with its zero-based position.
pub struct Enumerate<T: 'static> {
    inner: Sequence<T>,
    index: u64,
}

impl<T: 'static> Enumerate<T> {
    pub(crate) fn new(inner: Sequence<T>) -> Self {
        Enumerate { inner, index: 0 }
    }
}

impl<T: 'static> PullSource for Enumerate<T> {
    type Item = (u64, T);

    fn probe(&mut self) -> Result<bool> {
        self.inner.has_next()
    }

    fn pull(&mut self) -> Result<(u64, T)> {
        let item = self.inner.next()?;
        let index = self.index;
        self.index += 1;
        Ok((index, item))
    }

    fn release(&mut self) -> Result<()> {
        self.inner.close()
    }
}
