use crate::error::{Error, Result};
use crate::sequence::{Lookahead, PullSource, Sequence};

/// Predicate-based selection. Needs lookahead: the probe must advance
/// past non-matching elements without consuming the next match.
pub struct Filter<T: 'static, P> {
    inner: Lookahead<T>,
    pred: P,
}

impl<T: 'static, P> Filter<T, P> {
    pub(crate) fn new(inner: Sequence<T>, pred: P) -> Self {
        Filter {
            inner: Lookahead::new(inner),
            pred,
        }
    }
}

impl<T: 'static, P: FnMut(&T) -> bool> PullSource for Filter<T, P> {
    type Item = T;

    fn probe(&mut self) -> Result<bool> {
        loop {
            let keep = match self.inner.peek()? {
                Some(item) => (self.pred)(item),
                None => return Ok(false),
            };
            if keep {
                return Ok(true);
            }
            self.inner.next()?;
        }
    }

    fn pull(&mut self) -> Result<T> {
        if !self.probe()? {
            return Err(Error::Exhausted);
        }
        self.inner.next()?.ok_or(Error::Exhausted)
    }

    fn release(&mut self) -> Result<()> {
        self.inner.close()
    }
}
