use crate::error::Result;
use crate::sequence::Sequence;

/// Non-consuming peek over a sequence.
///
/// Holds at most one buffered element. `peek` pulls from the upstream
/// lazily and only once; `next` returns the buffered element if present,
/// otherwise pulls fresh. Purely a view — ownership of the upstream and
/// its resources stays a single chain: closing the lookahead closes the
/// wrapped sequence.
pub struct Lookahead<T: 'static> {
    inner: Sequence<T>,
    peeked: Option<T>,
}

impl<T: 'static> Lookahead<T> {
    pub fn new(inner: Sequence<T>) -> Self {
        Lookahead {
            inner,
            peeked: None,
        }
    }

    /// Inspect the next element without consuming it. `None` once the
    /// upstream is exhausted.
    pub fn peek(&mut self) -> Result<Option<&T>> {
        if self.peeked.is_none() && self.inner.has_next()? {
            self.peeked = Some(self.inner.next()?);
        }
        Ok(self.peeked.as_ref())
    }

    /// Consume the next element, buffered or fresh. `None` once exhausted.
    pub fn next(&mut self) -> Result<Option<T>> {
        if let Some(item) = self.peeked.take() {
            return Ok(Some(item));
        }
        if self.inner.has_next()? {
            Ok(Some(self.inner.next()?))
        } else {
            Ok(None)
        }
    }

    pub fn has_next(&mut self) -> Result<bool> {
        Ok(self.peeked.is_some() || self.inner.has_next()?)
    }

    pub fn close(&mut self) -> Result<()> {
        self.peeked = None;
        self.inner.close()
    }
}
