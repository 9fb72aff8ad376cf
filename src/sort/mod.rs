//! External merge sort with a bounded in-memory footprint.
//!
//! Holds at most `capacity` input elements in memory at a time. Each
//! batch is sorted in memory, then merged with the previous on-disk run
//! into a new run file. The result is a lazy record sequence over the
//! final run; the spill directory lives exactly as long as that sequence.

use std::path::PathBuf;

use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::sequence::Sequence;
use crate::source;
use crate::source::record::{from_records, Record, RecordSource, RecordWriter};

pub struct ExternalSort<T: Record + Ord + 'static> {
    capacity: usize,
    dir: TempDir,
    run: Option<PathBuf>,
    runs_created: u64,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Record + Ord + 'static> ExternalSort<T> {
    /// `capacity` is the maximum number of elements held in memory at
    /// once and must be positive.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidArgument(
                "sort capacity must be positive".into(),
            ));
        }
        Ok(ExternalSort {
            capacity,
            dir: TempDir::new()?,
            run: None,
            runs_created: 0,
            _marker: std::marker::PhantomData,
        })
    }

    /// Drain `input` and produce its elements in ascending order.
    ///
    /// The input is consumed in batches of up to `capacity`; the returned
    /// sequence streams from disk and cleans up the spill files when it
    /// is closed or drained.
    pub fn sort(mut self, mut input: Sequence<T>) -> Result<Sequence<T>> {
        input.begin()?;
        loop {
            let mut batch = Vec::with_capacity(self.capacity);
            while batch.len() < self.capacity && input.has_next()? {
                batch.push(input.next()?);
            }
            if batch.is_empty() {
                break;
            }
            batch.sort();
            self.merge_into_run(batch)?;
            if !input.has_next()? {
                break;
            }
        }

        match self.run {
            None => Ok(source::empty()),
            Some(path) => {
                let src = RecordSource::<T>::open(&path)?.with_guard(self.dir);
                Ok(Sequence::from_nullable(src))
            }
        }
    }

    /// Merge a sorted in-memory batch with the current on-disk run into a
    /// fresh run file, then discard the old run.
    fn merge_into_run(&mut self, batch: Vec<T>) -> Result<()> {
        let next_path = self.dir.path().join(format!("run-{:06}.bin", self.runs_created));
        self.runs_created += 1;
        let mut writer = RecordWriter::create(&next_path)?;
        let mut batch = batch.into_iter().peekable();
        let old_path = self.run.take();

        match &old_path {
            None => {
                for item in batch {
                    writer.append(&item)?;
                }
            }
            Some(old_path) => {
                let mut old = from_records::<T>(old_path)?;
                // carry holds the disk-side element that lost the last
                // comparison, so neither side is ever pulled twice
                let mut carry: Option<T> = None;
                loop {
                    let disk_item = match carry.take() {
                        Some(item) => Some(item),
                        None if old.has_next()? => Some(old.next()?),
                        None => None,
                    };
                    match (disk_item, batch.peek()) {
                        (None, None) => break,
                        (Some(item), None) => writer.append(&item)?,
                        (None, Some(_)) => {
                            if let Some(item) = batch.next() {
                                writer.append(&item)?;
                            }
                        }
                        (Some(disk), Some(mem)) => {
                            if disk <= *mem {
                                writer.append(&disk)?;
                            } else {
                                if let Some(mem) = batch.next() {
                                    writer.append(&mem)?;
                                }
                                carry = Some(disk);
                            }
                        }
                    }
                }
                old.close()?;
            }
        }

        // the old run must survive until the new one is flushed and synced,
        // so a failed finish never strands us with neither run on disk
        writer.finish()?;
        if let Some(old_path) = old_path {
            std::fs::remove_file(&old_path)?;
        }
        self.run = Some(next_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source;

    #[test]
    fn superseded_run_deleted_only_after_new_run_written() {
        let mut sorter = ExternalSort::<i64>::new(2).unwrap();
        sorter.merge_into_run(vec![3, 9]).unwrap();
        sorter.merge_into_run(vec![1, 7]).unwrap();

        // exactly one live run remains, and it is the newest one
        let names: Vec<String> = std::fs::read_dir(sorter.dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["run-000001.bin"]);

        let merged = from_records::<i64>(sorter.run.as_ref().unwrap())
            .unwrap()
            .collect_vec()
            .unwrap();
        assert_eq!(merged, vec![1, 3, 7, 9]);
    }

    #[test]
    fn spill_directory_gone_after_drain() {
        let sorter = ExternalSort::<i64>::new(2).unwrap();
        let spill_dir = sorter.dir.path().to_path_buf();

        let mut out = sorter.sort(source::of([5i64, 2, 8, 1, 9, 3])).unwrap();
        assert!(spill_dir.exists());
        assert_eq!(out.collect_vec().unwrap(), vec![1, 2, 3, 5, 8, 9]);
        assert!(!spill_dir.exists());
    }

    #[test]
    fn spill_directory_gone_after_close() {
        let sorter = ExternalSort::<i64>::new(2).unwrap();
        let spill_dir = sorter.dir.path().to_path_buf();

        let mut out = sorter.sort(source::of([4i64, 2, 6, 1])).unwrap();
        out.close().unwrap();
        assert!(!spill_dir.exists());
    }
}
