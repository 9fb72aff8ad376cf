use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::sequence::{PullSource, Sequence};

/// Advances through a queue of upstream sequences in order. An upstream
/// is closed and discarded as soon as it exhausts, before the next one is
/// exposed.
pub struct Concat<T: 'static> {
    queue: VecDeque<Sequence<T>>,
}

impl<T: 'static> Concat<T> {
    pub(crate) fn new(sequences: Vec<Sequence<T>>) -> Self {
        Concat {
            queue: sequences.into(),
        }
    }
}

impl<T: 'static> PullSource for Concat<T> {
    type Item = T;

    fn probe(&mut self) -> Result<bool> {
        loop {
            match self.queue.front_mut() {
                None => return Ok(false),
                Some(front) => {
                    if front.has_next()? {
                        return Ok(true);
                    }
                    if let Some(mut done) = self.queue.pop_front() {
                        done.close()?;
                    }
                }
            }
        }
    }

    fn pull(&mut self) -> Result<T> {
        if !self.probe()? {
            return Err(Error::Exhausted);
        }
        let front = self.queue.front_mut().ok_or(Error::Exhausted)?;
        let item = front.next()?;
        if !front.has_next()? {
            if let Some(mut done) = self.queue.pop_front() {
                done.close()?;
            }
        }
        Ok(item)
    }

    fn release(&mut self) -> Result<()> {
        let mut first_err = None;
        for mut seq in self.queue.drain(..) {
            if let Err(e) = seq.close() {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
