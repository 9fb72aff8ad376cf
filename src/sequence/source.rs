use crate::error::{Error, Result};

/// The pull contract every concrete source implements.
///
/// A source is the protected half of a [`Sequence`](super::Sequence): the
/// sequence owns the lifecycle (used/closed/released, consumed count) and
/// delegates the actual element production to its source. Decorators are
/// sources too — each one owns exactly one upstream `Sequence` and closes
/// it from `release`.
pub trait PullSource {
    type Item;

    /// Is another element available? Must be side-effect free with respect
    /// to emitted elements (advancing past filtered-out input is fine).
    fn probe(&mut self) -> Result<bool>;

    /// Produce the next element. Only called after `probe` returned true.
    fn pull(&mut self) -> Result<Self::Item>;

    /// Release underlying resources. Called at most once per source.
    fn release(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Single-call contract for sources whose natural termination signal is
/// "no value" rather than a separate probe — token scanners, record
/// readers, anything that has to run off the end of its input to know it
/// is done.
///
/// `None` means end-of-data. The [`Nullable`] adapter derives the
/// probe/pull pair from it and releases resources the moment `None` is
/// observed, which collapses two independently fragile methods into one
/// safer contract for source authors.
pub trait NullableSource {
    type Item;

    fn next_or_end(&mut self) -> Result<Option<Self::Item>>;

    fn release(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Adapter turning a [`NullableSource`] into a [`PullSource`].
///
/// Holds at most one fetched-ahead element; `probe` pulls from the
/// underlying source only when the slot is empty.
pub(crate) struct Nullable<S: NullableSource> {
    src: S,
    fetched: Option<S::Item>,
    done: bool,
    released: bool,
}

impl<S: NullableSource> Nullable<S> {
    pub(crate) fn new(src: S) -> Self {
        Nullable {
            src,
            fetched: None,
            done: false,
            released: false,
        }
    }
}

impl<S: NullableSource> PullSource for Nullable<S> {
    type Item = S::Item;

    fn probe(&mut self) -> Result<bool> {
        if self.fetched.is_some() {
            return Ok(true);
        }
        if self.done {
            return Ok(false);
        }
        match self.src.next_or_end()? {
            Some(item) => {
                self.fetched = Some(item);
                Ok(true)
            }
            None => {
                // end-of-data: release right away, not on some later close
                self.done = true;
                self.release()?;
                Ok(false)
            }
        }
    }

    fn pull(&mut self) -> Result<Self::Item> {
        if self.fetched.is_none() {
            self.probe()?;
        }
        self.fetched.take().ok_or(Error::Exhausted)
    }

    fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.src.release()
    }
}
