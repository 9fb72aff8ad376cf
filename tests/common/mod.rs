// Shared test helper: an in-memory source that counts how many elements
// were pulled and how many times its resources were released.

use std::cell::Cell;
use std::iter::Peekable;
use std::rc::Rc;

use seq_engine::{PullSource, Result, Sequence};

#[derive(Clone)]
pub struct Counters {
    pub pulled: Rc<Cell<u64>>,
    pub released: Rc<Cell<u64>>,
}

pub struct ObservableSource<T> {
    items: Peekable<std::vec::IntoIter<T>>,
    counters: Counters,
}

impl<T> PullSource for ObservableSource<T> {
    type Item = T;

    fn probe(&mut self) -> Result<bool> {
        Ok(self.items.peek().is_some())
    }

    fn pull(&mut self) -> Result<T> {
        self.counters.pulled.set(self.counters.pulled.get() + 1);
        Ok(self.items.next().expect("pull called without probe"))
    }

    fn release(&mut self) -> Result<()> {
        self.counters.released.set(self.counters.released.get() + 1);
        Ok(())
    }
}

pub fn observable<T: 'static>(items: Vec<T>) -> (Sequence<T>, Counters) {
    let counters = Counters {
        pulled: Rc::new(Cell::new(0)),
        released: Rc::new(Cell::new(0)),
    };
    let seq = Sequence::from_pull(ObservableSource {
        items: items.into_iter().peekable(),
        counters: counters.clone(),
    });
    (seq, counters)
}
