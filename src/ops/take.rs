use crate::error::Result;
use crate::sequence::{NullableSource, Sequence};

/// Countdown prefix: at most `n` elements pass through.
pub struct TakeN<T: 'static> {
    inner: Sequence<T>,
    remaining: u64,
}

impl<T: 'static> TakeN<T> {
    pub(crate) fn new(inner: Sequence<T>, n: u64) -> Self {
        TakeN {
            inner,
            remaining: n,
        }
    }
}

impl<T: 'static> NullableSource for TakeN<T> {
    type Item = T;

    fn next_or_end(&mut self) -> Result<Option<T>> {
        if self.remaining == 0 || !self.inner.has_next()? {
            return Ok(None);
        }
        self.remaining -= 1;
        Ok(Some(self.inner.next()?))
    }

    fn release(&mut self) -> Result<()> {
        self.inner.close()
    }
}

/// Predicate-bounded prefix shared by `take_while` (exclusive stop) and
/// `take_until` (inclusive stop). Once `accept` fails, the boundary
/// element is emitted or not depending on `inclusive`, and the latch
/// stays tripped for good.
pub struct TakeLatch<T: 'static, P> {
    inner: Sequence<T>,
    accept: P,
    taking: bool,
    inclusive: bool,
}

impl<T: 'static, P: FnMut(&T) -> bool> TakeLatch<T, P> {
    pub(crate) fn take_while(inner: Sequence<T>, accept: P) -> Self {
        TakeLatch {
            inner,
            accept,
            taking: true,
            inclusive: false,
        }
    }
}

impl<T: 'static> TakeLatch<T, Box<dyn FnMut(&T) -> bool>> {
    pub(crate) fn take_until(
        inner: Sequence<T>,
        mut stop: impl FnMut(&T) -> bool + 'static,
    ) -> Self {
        TakeLatch {
            inner,
            accept: Box::new(move |item: &T| !stop(item)),
            taking: true,
            inclusive: true,
        }
    }
}

impl<T: 'static, P: FnMut(&T) -> bool> NullableSource for TakeLatch<T, P> {
    type Item = T;

    fn next_or_end(&mut self) -> Result<Option<T>> {
        if !self.taking || !self.inner.has_next()? {
            return Ok(None);
        }
        let item = self.inner.next()?;
        self.taking = (self.accept)(&item);
        if self.taking || self.inclusive {
            Ok(Some(item))
        } else {
            Ok(None)
        }
    }

    fn release(&mut self) -> Result<()> {
        self.inner.close()
    }
}
