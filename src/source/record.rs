//! Binary record streams: length-prefixed, CRC-checked framing for
//! spilling typed values to disk and reading them back lazily.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::marker::PhantomData;
use std::path::Path;

use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::sequence::{NullableSource, Sequence};

/// A value that can be framed into a record stream and recovered from one.
///
/// `encode` appends the payload bytes; `decode` parses exactly the bytes
/// `encode` produced. Framing (length prefix, checksum) is handled by
/// [`RecordWriter`] and [`from_records`], not by implementors.
pub trait Record: Sized {
    fn encode(&self, buf: &mut Vec<u8>);
    fn decode(data: &[u8]) -> Result<Self>;
}

macro_rules! int_record {
    ($($ty:ty),*) => {$(
        impl Record for $ty {
            fn encode(&self, buf: &mut Vec<u8>) {
                buf.extend_from_slice(&self.to_le_bytes());
            }

            fn decode(data: &[u8]) -> Result<Self> {
                let bytes: [u8; size_of::<$ty>()] = data.try_into().map_err(|_| {
                    Error::Corruption(format!(
                        "expected {} payload bytes, got {}",
                        size_of::<$ty>(),
                        data.len()
                    ))
                })?;
                Ok(<$ty>::from_le_bytes(bytes))
            }
        }
    )*};
}

int_record!(i32, i64, u32, u64);

impl Record for String {
    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_bytes());
    }

    fn decode(data: &[u8]) -> Result<Self> {
        String::from_utf8(data.to_vec())
            .map_err(|_| Error::Corruption("record payload is not utf-8".into()))
    }
}

// On-disk framing per record:
//
//   ┌──────────┬─────────┬───────────────┐
//   │ CRC (4B) │ Len (4B)│ Payload (var) │
//   └──────────┴─────────┴───────────────┘
//
// CRC covers the payload only. A mismatch or a short read means the file
// was truncated or corrupted mid-record.
const CRC_SIZE: usize = 4;
const LEN_SIZE: usize = 4;
const HEADER_SIZE: usize = CRC_SIZE + LEN_SIZE;

/// Append-only writer for a record file.
pub struct RecordWriter {
    writer: BufWriter<File>,
}

impl RecordWriter {
    /// Create (or truncate) a record file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        Ok(RecordWriter {
            writer: BufWriter::new(file),
        })
    }

    /// Frame and append one record.
    pub fn append<T: Record>(&mut self, record: &T) -> Result<()> {
        let mut payload = Vec::new();
        record.encode(&mut payload);
        let crc = crc32fast::hash(&payload);
        self.writer.write_all(&crc.to_le_bytes())?;
        self.writer.write_all(&(payload.len() as u32).to_le_bytes())?;
        self.writer.write_all(&payload)?;
        Ok(())
    }

    /// Flush buffered records and force them to disk.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        Ok(())
    }
}

/// Lazily read framed records of type `T` back from a file.
pub fn from_records<T: Record + 'static>(path: impl AsRef<Path>) -> Result<Sequence<T>> {
    Ok(Sequence::from_nullable(RecordSource::<T>::open(
        path.as_ref(),
    )?))
}

pub(crate) struct RecordSource<T> {
    reader: Option<BufReader<File>>,
    // keeps spill directories alive as long as the stream reads from them
    guard: Option<TempDir>,
    _marker: PhantomData<T>,
}

impl<T: Record> RecordSource<T> {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(RecordSource {
            reader: Some(BufReader::new(file)),
            guard: None,
            _marker: PhantomData,
        })
    }

    pub(crate) fn with_guard(mut self, guard: TempDir) -> Self {
        self.guard = Some(guard);
        self
    }
}

impl<T: Record> NullableSource for RecordSource<T> {
    type Item = T;

    fn next_or_end(&mut self) -> Result<Option<T>> {
        let reader = match self.reader.as_mut() {
            Some(reader) => reader,
            None => return Ok(None),
        };

        let mut header = [0u8; HEADER_SIZE];
        match read_fully(reader, &mut header)? {
            0 => return Ok(None),
            n if n < HEADER_SIZE => {
                return Err(Error::Corruption("truncated record header".into()));
            }
            _ => {}
        }
        let stored_crc = u32::from_le_bytes(
            header[..CRC_SIZE]
                .try_into()
                .map_err(|_| Error::Corruption("truncated record header".into()))?,
        );
        let payload_len = u32::from_le_bytes(
            header[CRC_SIZE..]
                .try_into()
                .map_err(|_| Error::Corruption("truncated record header".into()))?,
        ) as usize;

        let mut payload = vec![0u8; payload_len];
        if read_fully(reader, &mut payload)? < payload_len {
            return Err(Error::Corruption("truncated record payload".into()));
        }
        if crc32fast::hash(&payload) != stored_crc {
            return Err(Error::Corruption("record CRC mismatch".into()));
        }
        Ok(Some(T::decode(&payload)?))
    }

    fn release(&mut self) -> Result<()> {
        self.reader = None;
        self.guard = None;
        Ok(())
    }
}

/// Read until `buf` is full or EOF; returns the number of bytes read.
fn read_fully(reader: &mut impl Read, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
