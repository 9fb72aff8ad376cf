use crate::error::Result;
use crate::sequence::{NullableSource, Sequence};

/// Prefix-dropping latch shared by `skip(n)`, `skip_while` and
/// `skip_until`.
///
/// The drop predicate is evaluated once per element until the first
/// "keep" decision; after that every element passes through unchanged,
/// even if the predicate would later flip back. This one-shot behavior is
/// deliberate, not an optimization shortcut.
pub struct SkipLatch<T: 'static, P> {
    inner: Sequence<T>,
    drop: P,
    done_dropping: bool,
}

impl<T: 'static, P: FnMut(&T) -> bool> SkipLatch<T, P> {
    pub(crate) fn new(inner: Sequence<T>, drop: P) -> Self {
        SkipLatch {
            inner,
            drop,
            done_dropping: false,
        }
    }
}

impl<T: 'static, P: FnMut(&T) -> bool> NullableSource for SkipLatch<T, P> {
    type Item = T;

    fn next_or_end(&mut self) -> Result<Option<T>> {
        if self.done_dropping {
            return if self.inner.has_next()? {
                Ok(Some(self.inner.next()?))
            } else {
                Ok(None)
            };
        }
        while self.inner.has_next()? {
            let item = self.inner.next()?;
            if !(self.drop)(&item) {
                self.done_dropping = true;
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    fn release(&mut self) -> Result<()> {
        self.inner.close()
    }
}
