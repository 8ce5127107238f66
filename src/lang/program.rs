use super::Line;
use crate::error;
use crate::Error;
use log::warn;

/// Marker byte opening every tokenized program image.
pub const PROGRAM_MARKER: u8 = 0xFF;

/// Size of the marker plus the big-endian length word.
pub const PROGRAM_HEADER_LEN: usize = 3;

/// Tokenizes a whole program into the binary image format.
pub fn tokenize(s: &[u8]) -> Result<Vec<u8>, Error> {
    Program::from_bytes(s).to_bytes()
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Program {
    lines: Vec<Line>,
}

impl Program {
    /// Source is taken as raw bytes so graphic characters above 0x7F survive.
    /// Lines without a usable line number are dropped.
    pub fn from_bytes(s: &[u8]) -> Program {
        let mut lines = vec![];
        for (index, text) in s.split(|c| *c == b'\n').enumerate() {
            let text = text.strip_suffix(b"\r").unwrap_or(text);
            if text.is_empty() {
                continue;
            }
            match Line::new(text) {
                Some(line) => lines.push(line),
                None => warn!(
                    "dropping line {} without a line number: {:?}",
                    index + 1,
                    String::from_utf8_lossy(text)
                ),
            }
        }
        Program { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        PROGRAM_HEADER_LEN + self.lines.iter().map(Line::record_len).sum::<usize>()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(self.len());
        out.push(PROGRAM_MARKER);
        out.extend_from_slice(&[0x00, 0x00]);
        for line in &self.lines {
            line.write_record(&mut out);
        }
        if out.len() > u16::MAX as usize {
            return Err(error!(Overflow; format!("PROGRAM IS {} BYTES", out.len())));
        }
        let size = (out.len() as u16).to_be_bytes();
        out[1..PROGRAM_HEADER_LEN].copy_from_slice(&size);
        Ok(out)
    }
}
