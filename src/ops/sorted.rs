use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::sequence::{PullSource, Sequence};

/// The one operator that forfeits the streaming guarantee.
///
/// Construction pulls nothing; the first pull drains the entire upstream
/// into memory, sorts it (stable), and replays. Memory is proportional to
/// the upstream length.
pub struct Sorted<T: 'static, F> {
    inner: Sequence<T>,
    cmp: F,
    materialized: Option<std::vec::IntoIter<T>>,
}

impl<T: 'static, F> Sorted<T, F> {
    pub(crate) fn new(inner: Sequence<T>, cmp: F) -> Self {
        Sorted {
            inner,
            cmp,
            materialized: None,
        }
    }
}

impl<T: 'static, F: FnMut(&T, &T) -> Ordering> Sorted<T, F> {
    fn materialize(&mut self) -> Result<()> {
        let mut items = Vec::new();
        while self.inner.has_next()? {
            items.push(self.inner.next()?);
        }
        items.sort_by(|a, b| (self.cmp)(a, b));
        self.materialized = Some(items.into_iter());
        Ok(())
    }
}

impl<T: 'static, F: FnMut(&T, &T) -> Ordering> PullSource for Sorted<T, F> {
    type Item = T;

    fn probe(&mut self) -> Result<bool> {
        match &self.materialized {
            Some(items) => Ok(items.len() > 0),
            None => self.inner.has_next(),
        }
    }

    fn pull(&mut self) -> Result<T> {
        if self.materialized.is_none() {
            self.materialize()?;
        }
        match self.materialized.as_mut() {
            Some(items) => items.next().ok_or(Error::Exhausted),
            None => Err(Error::Exhausted),
        }
    }

    fn release(&mut self) -> Result<()> {
        self.materialized = None;
        self.inner.close()
    }
}
