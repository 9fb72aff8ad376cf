use std::collections::HashSet;
use std::hash::Hash;

use xxhash_rust::xxh3::Xxh3Builder;

use crate::error::Result;
use crate::sequence::{NullableSource, Sequence};

/// Set-backed single-pass deduplication. Equal elements beyond the first
/// are skipped; first-occurrence order is preserved.
pub struct Distinct<T: 'static> {
    inner: Sequence<T>,
    seen: HashSet<T, Xxh3Builder>,
}

impl<T: Eq + Hash + Clone + 'static> Distinct<T> {
    pub(crate) fn new(inner: Sequence<T>) -> Self {
        Distinct {
            inner,
            seen: HashSet::with_hasher(Xxh3Builder::new()),
        }
    }
}

impl<T: Eq + Hash + Clone + 'static> NullableSource for Distinct<T> {
    type Item = T;

    fn next_or_end(&mut self) -> Result<Option<T>> {
        while self.inner.has_next()? {
            let item = self.inner.next()?;
            if self.seen.insert(item.clone()) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    fn release(&mut self) -> Result<()> {
        self.inner.close()
    }
}
