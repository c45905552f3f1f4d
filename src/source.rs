//! Character sources feeding the lexer.
//!
//! A [`CharacterSource`] hands out one code point at a time and signals end
//! of source by returning `None`. It never rewinds and never peeks; the
//! lexer itself buffers exactly one character of lookahead.

use std::fs;
use std::io;
use std::path::Path;
use std::str::Chars;

/// One-way stream of code points consumed by the lexer.
pub trait CharacterSource {
    /// Produces the next code point, or `None` at end of source.
    ///
    /// Once `None` has been returned, every later call must return `None`
    /// as well.
    fn advance(&mut self) -> Option<char>;
}

/// Character source over an in-memory string.
pub struct StringSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StringSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }
}

impl CharacterSource for StringSource<'_> {
    fn advance(&mut self) -> Option<char> {
        self.chars.next()
    }
}

/// Character source over the contents of a file.
///
/// The file is read up front; decoding errors surface at construction
/// rather than mid-scan.
pub struct FileSource {
    text: Vec<char>,
    position: usize,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self {
            text: text.chars().collect(),
            position: 0,
        })
    }
}

impl CharacterSource for FileSource {
    fn advance(&mut self) -> Option<char> {
        let ch = self.text.get(self.position).copied();
        if ch.is_some() {
            self.position += 1;
        }
        ch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_source_yields_chars_then_none() {
        let mut source = StringSource::new("ab");
        assert_eq!(source.advance(), Some('a'));
        assert_eq!(source.advance(), Some('b'));
        assert_eq!(source.advance(), None);
        assert_eq!(source.advance(), None);
    }
}
