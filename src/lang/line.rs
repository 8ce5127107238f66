use super::lex::*;

/// One numbered source line with its tokenized body.
#[derive(Debug, PartialEq, Clone)]
pub struct Line {
    number: u16,
    body: Vec<u8>,
}

impl Line {
    /// Returns `None` for lines without a usable (nonzero, 16-bit) line number.
    pub fn new(s: &[u8]) -> Option<Line> {
        let s = trim_start(s);
        let digits = s.iter().take_while(|c| c.is_ascii_digit()).count();
        let number = std::str::from_utf8(&s[..digits])
            .ok()?
            .parse::<u16>()
            .ok()
            .filter(|n| *n != 0)?;
        let rest = trim_start(&s[digits..]);
        Some(Line {
            number,
            body: lex(rest),
        })
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Record layout: reserved word, big-endian line number, body, terminator.
    pub fn write_record(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[0x00, 0x00]);
        out.extend_from_slice(&self.number.to_be_bytes());
        out.extend_from_slice(&self.body);
        out.push(0x00);
    }

    pub fn record_len(&self) -> usize {
        self.body.len() + 5
    }
}

fn trim_start(s: &[u8]) -> &[u8] {
    let blank = s.iter().take_while(|c| c.is_ascii_whitespace()).count();
    &s[blank..]
}
