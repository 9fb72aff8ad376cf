use crate::error::{Error, Result};
use crate::sequence::{PullSource, Sequence};

/// Element-wise transformation.
pub struct Map<T: 'static, F> {
    inner: Sequence<T>,
    f: F,
}

impl<T: 'static, F> Map<T, F> {
    pub(crate) fn new(inner: Sequence<T>, f: F) -> Self {
        Map { inner, f }
    }
}

impl<T: 'static, U, F: FnMut(T) -> U> PullSource for Map<T, F> {
    type Item = U;

    fn probe(&mut self) -> Result<bool> {
        self.inner.has_next()
    }

    fn pull(&mut self) -> Result<U> {
        let item = self.inner.next()?;
        Ok((self.f)(item))
    }

    fn release(&mut self) -> Result<()> {
        self.inner.close()
    }
}

/// Expansion of each element into a sub-sequence, concatenated lazily.
pub struct FlatMap<T: 'static, U: 'static, F> {
    inner: Sequence<T>,
    f: F,
    current: Option<Sequence<U>>,
}

impl<T: 'static, U: 'static, F> FlatMap<T, U, F> {
    pub(crate) fn new(inner: Sequence<T>, f: F) -> Self {
        FlatMap {
            inner,
            f,
            current: None,
        }
    }
}

impl<T: 'static, U: 'static, F: FnMut(T) -> Sequence<U>> PullSource for FlatMap<T, U, F> {
    type Item = U;

    fn probe(&mut self) -> Result<bool> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if current.has_next()? {
                    return Ok(true);
                }
                // empty or drained expansion: close it and move on
                if let Some(mut done) = self.current.take() {
                    done.close()?;
                }
            }
            if !self.inner.has_next()? {
                return Ok(false);
            }
            let item = self.inner.next()?;
            self.current = Some((self.f)(item));
        }
    }

    fn pull(&mut self) -> Result<U> {
        if !self.probe()? {
            return Err(Error::Exhausted);
        }
        match self.current.as_mut() {
            Some(current) => current.next(),
            None => Err(Error::Exhausted),
        }
    }

    fn release(&mut self) -> Result<()> {
        let mut first_err = None;
        if let Some(mut current) = self.current.take() {
            if let Err(e) = current.close() {
                first_err = Some(e);
            }
        }
        if let Err(e) = self.inner.close() {
            if first_err.is_none() {
                first_err = Some(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
