//! Delimiter-based token scanning over a character sequence.

use std::collections::VecDeque;
use std::path::Path;

use crate::error::{Error, Result};
use crate::sequence::{NullableSource, Sequence};
use crate::source;

/// Split a character sequence into tokens separated by `delim`.
///
/// The delimiter may span multiple characters and never appears in the
/// output. Consecutive delimiters produce empty tokens. A trailing run of
/// characters with no closing delimiter is emitted as a final token.
pub fn tokens(chars: Sequence<char>, delim: &str) -> Result<Sequence<String>> {
    if delim.is_empty() {
        return Err(Error::InvalidArgument("empty token delimiter".into()));
    }
    Ok(Sequence::from_nullable(Tokens {
        chars: Some(chars),
        delim: delim.chars().collect(),
    }))
}

/// Tokenize an in-memory string.
pub fn tokens_of_str(s: impl Into<String>, delim: &str) -> Result<Sequence<String>> {
    tokens(source::chars_of(s), delim)
}

/// Tokenize the contents of a UTF-8 file.
pub fn tokens_of_file(path: impl AsRef<Path>, delim: &str) -> Result<Sequence<String>> {
    tokens(source::chars(path)?, delim)
}

struct Tokens {
    chars: Option<Sequence<char>>,
    delim: Vec<char>,
}

impl NullableSource for Tokens {
    type Item = String;

    fn next_or_end(&mut self) -> Result<Option<String>> {
        let chars = match self.chars.as_mut() {
            Some(chars) => chars,
            None => return Ok(None),
        };
        if !chars.has_next()? {
            return Ok(None);
        }

        // scan until the tail of the accumulated text equals the delimiter
        let mut out: Vec<char> = Vec::new();
        let mut tail: VecDeque<char> = VecDeque::with_capacity(self.delim.len());
        let mut terminated = false;
        while chars.has_next()? {
            let c = chars.next()?;
            out.push(c);
            if tail.len() == self.delim.len() {
                tail.pop_front();
            }
            tail.push_back(c);
            if tail.iter().eq(self.delim.iter()) {
                terminated = true;
                break;
            }
        }
        if terminated {
            out.truncate(out.len() - self.delim.len());
        }
        // an unterminated trailing run is still a token
        Ok(Some(out.into_iter().collect()))
    }

    fn release(&mut self) -> Result<()> {
        match self.chars.take() {
            Some(mut chars) => chars.close(),
            None => Ok(()),
        }
    }
}
