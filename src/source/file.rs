//! Text-file sources: line-by-line and character-by-character reading.
//!
//! Both hold the file handle inside the source and drop it on release, so
//! a drained sequence gives the handle back without waiting for `close`.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::sequence::{NullableSource, PullSource, Sequence};

/// Lazily read a file line by line. Line terminators (`\n` and `\r\n`)
/// are stripped.
pub fn lines(path: impl AsRef<Path>) -> Result<Sequence<String>> {
    let file = File::open(path.as_ref())?;
    Ok(Sequence::from_nullable(Lines {
        reader: Some(BufReader::new(file)),
    }))
}

/// Lazily decode a UTF-8 file one character at a time.
pub fn chars(path: impl AsRef<Path>) -> Result<Sequence<char>> {
    let file = File::open(path.as_ref())?;
    Ok(Sequence::from_nullable(Chars {
        reader: Some(BufReader::new(file)),
    }))
}

/// Sequence over the characters of an in-memory string.
pub fn chars_of(s: impl Into<String>) -> Sequence<char> {
    Sequence::from_pull(StrChars {
        s: s.into(),
        pos: 0,
    })
}

struct Lines {
    reader: Option<BufReader<File>>,
}

impl NullableSource for Lines {
    type Item = String;

    fn next_or_end(&mut self) -> Result<Option<String>> {
        let reader = match self.reader.as_mut() {
            Some(reader) => reader,
            None => return Ok(None),
        };
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn release(&mut self) -> Result<()> {
        self.reader = None;
        Ok(())
    }
}

struct Chars {
    reader: Option<BufReader<File>>,
}

impl NullableSource for Chars {
    type Item = char;

    fn next_or_end(&mut self) -> Result<Option<char>> {
        let reader = match self.reader.as_mut() {
            Some(reader) => reader,
            None => return Ok(None),
        };
        let mut lead = [0u8; 1];
        if reader.read(&mut lead)? == 0 {
            return Ok(None);
        }
        let width = utf8_width(lead[0]).ok_or_else(|| {
            Error::Corruption(format!("invalid utf-8 lead byte 0x{:02x}", lead[0]))
        })?;
        let mut bytes = [0u8; 4];
        bytes[0] = lead[0];
        reader.read_exact(&mut bytes[1..width]).map_err(|e| {
            // EOF mid-character is malformed input, not an IO failure
            if e.kind() == io::ErrorKind::UnexpectedEof {
                Error::Corruption("truncated utf-8 sequence".into())
            } else {
                Error::Io(e)
            }
        })?;
        let decoded = std::str::from_utf8(&bytes[..width])
            .map_err(|_| Error::Corruption("invalid utf-8 sequence".into()))?;
        match decoded.chars().next() {
            Some(c) => Ok(Some(c)),
            None => Err(Error::Corruption("empty utf-8 sequence".into())),
        }
    }

    fn release(&mut self) -> Result<()> {
        self.reader = None;
        Ok(())
    }
}

fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7f => Some(1),
        0xc0..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf7 => Some(4),
        _ => None,
    }
}

struct StrChars {
    s: String,
    pos: usize,
}

impl PullSource for StrChars {
    type Item = char;

    fn probe(&mut self) -> Result<bool> {
        Ok(self.pos < self.s.len())
    }

    fn pull(&mut self) -> Result<char> {
        match self.s[self.pos..].chars().next() {
            Some(c) => {
                self.pos += c.len_utf8();
                Ok(c)
            }
            None => Err(Error::Exhausted),
        }
    }
}
