use super::program::{PROGRAM_HEADER_LEN, PROGRAM_MARKER};
use super::token::*;
use crate::error;
use crate::Error;

/// Expands a tokenized program image back into source text, one line per
/// record, each terminated by `\n`.
pub fn detokenize(bytes: &[u8]) -> Result<String, Error> {
    let listing = Listing::new(bytes)?;
    let mut s = String::new();
    for line in listing.lines() {
        s.push_str(&line?);
        s.push('\n');
    }
    Ok(s)
}

/// A validated view over a tokenized program image.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    bytes: &'a [u8],
    size: usize,
}

impl<'a> Listing<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Listing<'a>, Error> {
        match bytes.first() {
            Some(&PROGRAM_MARKER) => {}
            _ => return Err(error!(InvalidMarker)),
        }
        if bytes.len() < PROGRAM_HEADER_LEN {
            return Err(error!(TruncatedRecord, ..bytes.len()));
        }
        let size = u16::from_be_bytes([bytes[1], bytes[2]]) as usize;
        Ok(Listing { bytes, size })
    }

    /// The length recorded in the image header.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn lines(&self) -> Lines<'a> {
        Lines {
            bytes: self.bytes,
            size: self.size,
            pos: PROGRAM_HEADER_LEN,
            failed: false,
        }
    }
}

/// Yields each decoded line; stops after the first error.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    bytes: &'a [u8],
    size: usize,
    pos: usize,
    failed: bool,
}

impl<'a> Lines<'a> {
    fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    fn line(&mut self) -> Result<String, Error> {
        let start = self.pos;
        let number = match self.bytes.get(start + 2..start + 4) {
            Some(n) => u16::from_be_bytes([n[0], n[1]]),
            None => return Err(error!(TruncatedRecord, ..start)),
        };
        self.pos += 4;
        let mut s = format!("{} ", number);
        let mut string = false;
        loop {
            let byte = match self.next_byte() {
                Some(0x00) => break,
                Some(byte) => byte,
                None => return Err(error!(TruncatedRecord, Some(number), ..self.pos)),
            };
            if byte == b'"' {
                string = !string;
                s.push('"');
                continue;
            }
            if string {
                s.push(char::from(byte));
                continue;
            }
            let (table, byte) = if byte == FUNCTION_ESCAPE {
                match self.next_byte() {
                    Some(byte) => (TokenTable::functions(), byte),
                    None => return Err(error!(TruncatedRecord, Some(number), ..self.pos)),
                }
            } else {
                (TokenTable::commands(), byte)
            };
            match table.keyword(byte) {
                Some(keyword) => {
                    s.push(' ');
                    s.push_str(keyword);
                    s.push(' ');
                }
                None => s.push(char::from(byte)),
            }
        }
        Ok(collapse_spaces(&s))
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.size || self.pos >= self.bytes.len() {
            return None;
        }
        let line = self.line();
        self.failed = line.is_err();
        Some(line)
    }
}

/// Squeezes the padding around expanded keywords; everything up to and
/// including the space after the line number is kept as is.
fn collapse_spaces(s: &str) -> String {
    let split = match s.find(' ') {
        Some(index) => index + 1,
        None => return s.to_string(),
    };
    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..split]);
    let mut last_was_space = false;
    for ch in s[split..].chars() {
        if ch == ' ' {
            if !last_was_space {
                out.push(ch);
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out
}
