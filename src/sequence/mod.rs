pub mod lookahead;
pub mod source;

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::ops;
use crate::ops::buffered::Buffered;

pub use lookahead::Lookahead;
pub use source::{NullableSource, PullSource};

/// A single-pass, pull-based producer of elements with an explicit
/// lifecycle and resource-release guarantees.
///
/// A sequence is obtained from a factory (see [`crate::source`]), chained
/// through transformation operators, and driven to completion exactly once
/// via `next`/`has_next`, a fold, or materialization. Each operator takes
/// `self` by value: a decorator is the sole owner of its upstream, so
/// closing the outermost sequence closes the whole chain.
///
/// The central invariant: the pull that exhausts a sequence releases its
/// resources immediately. Draining a file-backed sequence without ever
/// calling `close` does not leak the file handle.
pub struct Sequence<T: 'static> {
    src: Box<dyn PullSource<Item = T>>,
    closed: bool,
    used: bool,
    released: bool,
    consumed: u64,
    on_close: Option<Box<dyn FnOnce(u64)>>,
}

impl<T: 'static> Sequence<T> {
    /// Build a sequence from any probe/pull source.
    pub fn from_pull(src: impl PullSource<Item = T> + 'static) -> Self {
        Sequence {
            src: Box::new(src),
            closed: false,
            used: false,
            released: false,
            consumed: 0,
            on_close: None,
        }
    }

    /// Build a sequence from a single-call source (`None` = end-of-data).
    pub fn from_nullable(src: impl NullableSource<Item = T> + 'static) -> Self {
        Self::from_pull(source::Nullable::new(src))
    }

    /// Register a hook invoked exactly once on close with the number of
    /// elements this sequence produced.
    pub fn on_close(mut self, hook: impl FnOnce(u64) + 'static) -> Self {
        self.on_close = Some(Box::new(hook));
        self
    }

    // ------------------------------------------------------------------
    // Core pull protocol
    // ------------------------------------------------------------------

    /// False once closed or resources released; otherwise delegates to the
    /// source probe. Never fails for state reasons.
    pub fn has_next(&mut self) -> Result<bool> {
        if self.closed || self.released {
            return Ok(false);
        }
        self.src.probe()
    }

    /// Produce the next element.
    ///
    /// Fails with [`Error::Closed`] after `close`, with
    /// [`Error::Exhausted`] when no element is available. If this pull
    /// exhausts the sequence, resources are released before returning.
    pub fn next(&mut self) -> Result<T> {
        if self.closed {
            return Err(Error::Closed);
        }
        if !self.has_next()? {
            return Err(Error::Exhausted);
        }
        let item = self.src.pull()?;
        if !self.has_next()? {
            self.release_resources()?;
        }
        self.consumed += 1;
        Ok(item)
    }

    /// Close the sequence. Idempotent: resources are released exactly
    /// once. The on-close hook runs with the final consumed count even if
    /// release fails, in which case the release error still propagates.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        let released = self.release_resources();
        self.closed = true;
        if let Some(hook) = self.on_close.take() {
            hook(self.consumed);
        }
        released
    }

    fn release_resources(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.src.release()
    }

    fn ensure_live(&self) -> Result<()> {
        if self.closed {
            return Err(Error::Closed);
        }
        if self.used {
            return Err(Error::Consumed);
        }
        Ok(())
    }

    /// Mark the sequence as entered by a consuming entry point. A second
    /// entry fails.
    pub(crate) fn begin(&mut self) -> Result<()> {
        self.ensure_live()?;
        self.used = true;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Transformation operators — each consumes self and validates state,
    // so a closed husk cannot be re-branched.
    // ------------------------------------------------------------------

    pub fn map<U: 'static>(
        self,
        f: impl FnMut(T) -> U + 'static,
    ) -> Result<Sequence<U>> {
        self.ensure_live()?;
        Ok(Sequence::from_pull(ops::map::Map::new(self, f)))
    }

    /// Expand each element into a sub-sequence and concatenate lazily.
    /// Empty sub-sequences contribute nothing.
    pub fn flat_map<U: 'static>(
        self,
        f: impl FnMut(T) -> Sequence<U> + 'static,
    ) -> Result<Sequence<U>> {
        self.ensure_live()?;
        Ok(Sequence::from_pull(ops::map::FlatMap::new(self, f)))
    }

    pub fn filter(self, pred: impl FnMut(&T) -> bool + 'static) -> Result<Sequence<T>> {
        self.ensure_live()?;
        Ok(Sequence::from_pull(ops::filter::Filter::new(self, pred)))
    }

    /// At most the first `n` elements.
    pub fn take(self, n: u64) -> Result<Sequence<T>> {
        self.ensure_live()?;
        Ok(Sequence::from_nullable(ops::take::TakeN::new(self, n)))
    }

    /// Elements while the predicate holds; the first failing element is
    /// not emitted and ends the sequence.
    pub fn take_while(self, pred: impl FnMut(&T) -> bool + 'static) -> Result<Sequence<T>> {
        self.ensure_live()?;
        Ok(Sequence::from_nullable(ops::take::TakeLatch::take_while(
            self, pred,
        )))
    }

    /// Elements up to and including the first one satisfying the
    /// predicate — the inclusive counterpart of `take_while`.
    pub fn take_until(self, pred: impl FnMut(&T) -> bool + 'static) -> Result<Sequence<T>> {
        self.ensure_live()?;
        Ok(Sequence::from_nullable(ops::take::TakeLatch::take_until(
            self, pred,
        )))
    }

    /// Everything after the first `n` elements.
    pub fn skip(self, n: u64) -> Result<Sequence<T>> {
        self.ensure_live()?;
        let mut remaining = n;
        Ok(Sequence::from_nullable(ops::skip::SkipLatch::new(
            self,
            move |_: &T| {
                if remaining > 0 {
                    remaining -= 1;
                    true
                } else {
                    false
                }
            },
        )))
    }

    /// Drop elements while the predicate holds. One-shot latch: the
    /// predicate is never re-evaluated after the first keep decision.
    pub fn skip_while(self, pred: impl FnMut(&T) -> bool + 'static) -> Result<Sequence<T>> {
        self.ensure_live()?;
        Ok(Sequence::from_nullable(ops::skip::SkipLatch::new(self, pred)))
    }

    /// Drop elements until the predicate first holds; the triggering
    /// element is kept. Same one-shot latch as `skip_while`.
    pub fn skip_until(
        self,
        mut pred: impl FnMut(&T) -> bool + 'static,
    ) -> Result<Sequence<T>> {
        self.ensure_live()?;
        Ok(Sequence::from_nullable(ops::skip::SkipLatch::new(
            self,
            move |item: &T| !pred(item),
        )))
    }

    /// Deduplicate by equality, keeping first occurrences in order.
    /// Memory grows with the number of distinct elements seen.
    pub fn distinct(self) -> Result<Sequence<T>>
    where
        T: Eq + Hash + Clone,
    {
        self.ensure_live()?;
        Ok(Sequence::from_nullable(ops::distinct::Distinct::new(self)))
    }

    /// This sequence followed by `other`. Each upstream is closed as soon
    /// as it exhausts.
    pub fn concat(self, other: Sequence<T>) -> Result<Sequence<T>> {
        self.ensure_live()?;
        other.ensure_live()?;
        Ok(Sequence::from_pull(ops::concat::Concat::new(vec![
            self, other,
        ])))
    }

    /// Pair elements positionally; ends as soon as either side ends.
    pub fn zip<U: 'static>(self, other: Sequence<U>) -> Result<Sequence<(T, U)>> {
        self.ensure_live()?;
        other.ensure_live()?;
        Ok(Sequence::from_pull(ops::zip::Zip::new(self, other)))
    }

    pub fn zip_with_index(self) -> Result<Sequence<(u64, T)>> {
        self.ensure_live()?;
        Ok(Sequence::from_pull(ops::zip::Enumerate::new(self)))
    }

    /// Sort by natural order. **Not lazy**: the first pull drains the
    /// entire upstream into memory, sorts it (stable), and replays it.
    /// Construction itself pulls nothing.
    pub fn sorted(self) -> Result<Sequence<T>>
    where
        T: Ord,
    {
        self.sorted_by(T::cmp)
    }

    /// Sort by an explicit comparator. Same eager-on-first-pull contract
    /// as [`Sequence::sorted`].
    pub fn sorted_by(
        self,
        cmp: impl FnMut(&T, &T) -> Ordering + 'static,
    ) -> Result<Sequence<T>> {
        self.ensure_live()?;
        Ok(Sequence::from_pull(ops::sorted::Sorted::new(self, cmp)))
    }

    /// Consecutive fixed-size chunks; the final chunk may be shorter.
    pub fn grouped(self, size: usize) -> Result<Sequence<Sequence<T>>> {
        self.ensure_live()?;
        if size == 0 {
            return Err(Error::InvalidArgument("group size must be positive".into()));
        }
        Ok(Sequence::from_pull(ops::grouped::Batch::new(self, size)))
    }

    /// Group consecutive comparator-equal elements. The upstream must
    /// already be sorted under `cmp`; an element comparing below its group
    /// fails with [`Error::Unsorted`].
    pub fn grouped_by(
        self,
        cmp: impl FnMut(&T, &T) -> Ordering + 'static,
    ) -> Result<Sequence<Sequence<T>>> {
        self.ensure_live()?;
        Ok(Sequence::from_pull(ops::grouped::GroupByOrder::new(self, cmp)))
    }

    /// Overlapping windows of up to `window` elements stepping by `step`.
    /// A final shorter window is emitted exactly once when the upstream
    /// runs out mid-window.
    pub fn sliding(self, window: usize, step: usize) -> Result<Sequence<Sequence<T>>>
    where
        T: Clone,
    {
        self.ensure_live()?;
        if window == 0 {
            return Err(Error::InvalidArgument("window must be positive".into()));
        }
        if step == 0 {
            return Err(Error::InvalidArgument("step must be positive".into()));
        }
        Ok(Sequence::from_pull(ops::sliding::Sliding::new(
            self, window, step,
        )))
    }

    /// Prefetch up to `size` elements ahead of consumption. The returned
    /// [`Buffered`] exposes `peek` and converts back into a sequence.
    pub fn buffered(self, size: usize) -> Result<Buffered<T>> {
        self.ensure_live()?;
        if size == 0 {
            return Err(Error::InvalidArgument("buffer size must be positive".into()));
        }
        Ok(Buffered::new(self, size))
    }

    /// Wrap in a [`Lookahead`] for non-consuming peeks.
    pub fn lookahead(self) -> Result<Lookahead<T>> {
        self.ensure_live()?;
        Ok(Lookahead::new(self))
    }

    // ------------------------------------------------------------------
    // Consuming entry points
    // ------------------------------------------------------------------

    /// Consume into a standard iterator yielding `Result<T>`.
    pub fn into_iter(mut self) -> Result<SequenceIter<T>> {
        self.begin()?;
        Ok(SequenceIter { seq: self })
    }

    pub fn collect_vec(&mut self) -> Result<Vec<T>> {
        self.begin()?;
        let mut out = Vec::new();
        while self.has_next()? {
            out.push(self.next()?);
        }
        Ok(out)
    }

    pub fn collect_set(&mut self) -> Result<HashSet<T>>
    where
        T: Eq + Hash,
    {
        self.begin()?;
        let mut out = HashSet::new();
        while self.has_next()? {
            out.insert(self.next()?);
        }
        Ok(out)
    }

    pub fn collect_map<K, V>(
        &mut self,
        mut key_fn: impl FnMut(&T) -> K,
        mut value_fn: impl FnMut(T) -> V,
    ) -> Result<HashMap<K, V>>
    where
        K: Eq + Hash,
    {
        self.begin()?;
        let mut out = HashMap::new();
        while self.has_next()? {
            let item = self.next()?;
            out.insert(key_fn(&item), value_fn(item));
        }
        Ok(out)
    }

    /// Materialize into classification buckets, preserving encounter
    /// order within each bucket.
    pub fn group_by<K>(
        &mut self,
        mut classifier: impl FnMut(&T) -> K,
    ) -> Result<HashMap<K, Vec<T>>>
    where
        K: Eq + Hash,
    {
        self.begin()?;
        let mut out: HashMap<K, Vec<T>> = HashMap::new();
        while self.has_next()? {
            let item = self.next()?;
            out.entry(classifier(&item)).or_default().push(item);
        }
        Ok(out)
    }

    pub fn fold<A>(&mut self, seed: A, mut f: impl FnMut(A, T) -> A) -> Result<A> {
        self.begin()?;
        let mut acc = seed;
        while self.has_next()? {
            acc = f(acc, self.next()?);
        }
        Ok(acc)
    }

    pub fn reduce(&mut self, mut f: impl FnMut(T, T) -> T) -> Result<Option<T>> {
        self.begin()?;
        if !self.has_next()? {
            return Ok(None);
        }
        let mut acc = self.next()?;
        while self.has_next()? {
            acc = f(acc, self.next()?);
        }
        Ok(Some(acc))
    }

    pub fn for_each(&mut self, mut f: impl FnMut(T)) -> Result<()> {
        self.begin()?;
        while self.has_next()? {
            f(self.next()?);
        }
        Ok(())
    }

    pub fn count(&mut self) -> Result<u64> {
        self.begin()?;
        let mut n = 0;
        while self.has_next()? {
            self.next()?;
            n += 1;
        }
        Ok(n)
    }

    pub fn last(&mut self) -> Result<Option<T>> {
        self.begin()?;
        let mut last = None;
        while self.has_next()? {
            last = Some(self.next()?);
        }
        Ok(last)
    }

    pub fn contains(&mut self, target: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        self.begin()?;
        while self.has_next()? {
            if self.next()? == *target {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn min_by(
        &mut self,
        mut cmp: impl FnMut(&T, &T) -> Ordering,
    ) -> Result<Option<T>> {
        self.reduce(move |a, b| if cmp(&b, &a) == Ordering::Less { b } else { a })
    }

    pub fn max_by(
        &mut self,
        mut cmp: impl FnMut(&T, &T) -> Ordering,
    ) -> Result<Option<T>> {
        self.reduce(move |a, b| if cmp(&b, &a) == Ordering::Less { a } else { b })
    }

    /// Stringify every element joined by `sep`.
    pub fn mk_string(&mut self, sep: &str) -> Result<String>
    where
        T: Display,
    {
        self.begin()?;
        let mut out = String::new();
        let mut first = true;
        while self.has_next()? {
            if !first {
                out.push_str(sep);
            }
            first = false;
            out.push_str(&self.next()?.to_string());
        }
        Ok(out)
    }

    /// Write each stringified element to a file, with `sep` written
    /// between consecutive elements.
    pub fn write_to_file(&mut self, path: impl AsRef<Path>, sep: Option<&str>) -> Result<()>
    where
        T: Display,
    {
        self.begin()?;
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        let mut first = true;
        while self.has_next()? {
            let item = self.next()?;
            if !first {
                if let Some(sep) = sep {
                    writer.write_all(sep.as_bytes())?;
                }
            }
            first = false;
            write!(writer, "{item}")?;
        }
        writer.flush()?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Searches — validate state but do not flip `used`: when a match is
    // found early the sequence keeps its remaining elements.
    // ------------------------------------------------------------------

    pub fn find_first(&mut self, mut pred: impl FnMut(&T) -> bool) -> Result<Option<T>> {
        self.ensure_live()?;
        while self.has_next()? {
            let item = self.next()?;
            if pred(&item) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    pub fn find_any(&mut self, pred: impl FnMut(&T) -> bool) -> Result<Option<T>> {
        self.find_first(pred)
    }

    pub fn exists(&mut self, pred: impl FnMut(&T) -> bool) -> Result<bool> {
        Ok(self.find_first(pred)?.is_some())
    }

    pub fn forall(&mut self, mut pred: impl FnMut(&T) -> bool) -> Result<bool> {
        Ok(self.find_first(move |item| !pred(item))?.is_none())
    }

    /// Index of the first element matching the predicate.
    pub fn index_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> Result<Option<u64>> {
        self.ensure_live()?;
        let mut index = 0;
        while self.has_next()? {
            if pred(&self.next()?) {
                return Ok(Some(index));
            }
            index += 1;
        }
        Ok(None)
    }
}

impl<T: 'static> Drop for Sequence<T> {
    fn drop(&mut self) {
        // quiet close: secondary failures are deliberately swallowed
        let _ = self.close();
    }
}

/// Iterator over a consumed sequence, yielding `Result<T>` items.
pub struct SequenceIter<T: 'static> {
    seq: Sequence<T>,
}

impl<T: 'static> Iterator for SequenceIter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        match self.seq.has_next() {
            Ok(true) => Some(self.seq.next()),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
