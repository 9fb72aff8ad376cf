use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::sequence::{PullSource, Sequence};
use crate::source;

/// Overlapping windows of up to `window` elements, stepping by `step`.
///
/// The first pull fills the queue up to `window` (or fewer if the
/// upstream is shorter). Each pull emits a snapshot of the queue, then —
/// only if the queue reached full window size — advances by pulling up to
/// `step` new elements and evicting up to `step` old ones. A queue that
/// never reached full size is a final partial window: emitted once, then
/// the sequence ends.
pub struct Sliding<T: Clone + 'static> {
    inner: Sequence<T>,
    window: usize,
    step: usize,
    slide: VecDeque<T>,
}

impl<T: Clone + 'static> Sliding<T> {
    pub(crate) fn new(inner: Sequence<T>, window: usize, step: usize) -> Self {
        Sliding {
            inner,
            window,
            step,
            slide: VecDeque::new(),
        }
    }
}

impl<T: Clone + 'static> PullSource for Sliding<T> {
    type Item = Sequence<T>;

    fn probe(&mut self) -> Result<bool> {
        Ok(!self.slide.is_empty() || self.inner.has_next()?)
    }

    fn pull(&mut self) -> Result<Sequence<T>> {
        if self.slide.is_empty() {
            if !self.inner.has_next()? {
                return Err(Error::Exhausted);
            }
            while self.slide.len() < self.window && self.inner.has_next()? {
                self.slide.push_back(self.inner.next()?);
            }
        }

        let snapshot: Vec<T> = self.slide.iter().cloned().collect();

        if self.slide.len() < self.window {
            // partial final window: emit once, then end
            self.slide.clear();
        } else {
            let mut pulled = 0;
            while pulled < self.step && self.inner.has_next()? {
                self.slide.push_back(self.inner.next()?);
                pulled += 1;
            }
            for _ in 0..self.step {
                if self.slide.pop_front().is_none() {
                    break;
                }
            }
        }

        Ok(source::from_vec(snapshot))
    }

    fn release(&mut self) -> Result<()> {
        self.slide.clear();
        self.inner.close()
    }
}
