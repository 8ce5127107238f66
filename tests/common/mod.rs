#![allow(dead_code)]
use chrono::NaiveDate;
use hx20::tape::{FixedClock, TapeConfig, TapeEncoder};

pub fn clock() -> FixedClock {
    let date = NaiveDate::from_ymd_opt(1984, 2, 29).unwrap();
    FixedClock(date.and_hms_opt(12, 34, 56).unwrap())
}

pub fn encoder(config: TapeConfig) -> TapeEncoder<FixedClock> {
    TapeEncoder::with_clock(config, clock())
}

/// A block read back from the recorded bit stream.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    pub kind: u8,
    pub number: u16,
    pub copy: u8,
    pub payload: Vec<u8>,
    pub crc: [u8; 2],
    pub preamble: [u8; 2],
    pub postamble: [u8; 2],
}

struct BitReader<'a> {
    bits: &'a [bool],
    pos: usize,
}

impl<'a> BitReader<'a> {
    fn bit(&mut self) -> Option<bool> {
        let bit = *self.bits.get(self.pos)?;
        self.pos += 1;
        Some(bit)
    }

    /// Eight data bits LSB first, then a stop bit that must be 1.
    fn byte(&mut self) -> Option<u8> {
        let mut byte = 0u8;
        for i in 0..8 {
            if self.bit()? {
                byte |= 1 << i;
            }
        }
        assert_eq!(self.bit(), Some(true), "missing stop bit at {}", self.pos);
        Some(byte)
    }

    fn bytes(&mut self, n: usize) -> Option<Vec<u8>> {
        (0..n).map(|_| self.byte()).collect()
    }
}

/// Finds every block in a recorded stream. Gaps are all ones, so a run of
/// `sync_bits` zeros followed by a one marks the start of a block.
pub fn decode_blocks(bits: &[bool], sync_bits: usize, block_size: usize) -> Vec<RawBlock> {
    let mut reader = BitReader { bits, pos: 0 };
    let mut blocks = vec![];
    let mut zeros = 0;
    while let Some(bit) = reader.bit() {
        if !bit {
            zeros += 1;
            continue;
        }
        if zeros < sync_bits {
            zeros = 0;
            continue;
        }
        assert_eq!(zeros, sync_bits, "sync field length");
        zeros = 0;
        let preamble = reader.bytes(2).unwrap();
        let ident = reader.bytes(4).unwrap();
        let len = if ident[0] == b'D' { block_size } else { 80 };
        let payload = reader.bytes(len).unwrap();
        let crc = reader.bytes(2).unwrap();
        let postamble = reader.bytes(2).unwrap();
        blocks.push(RawBlock {
            kind: ident[0],
            number: u16::from_be_bytes([ident[1], ident[2]]),
            copy: ident[3],
            payload,
            crc: [crc[0], crc[1]],
            preamble: [preamble[0], preamble[1]],
            postamble: [postamble[0], postamble[1]],
        });
    }
    blocks
}

pub fn record(config: &TapeConfig, program: &[u8]) -> Vec<bool> {
    let mut bits: Vec<bool> = vec![];
    encoder(config.clone())
        .encode_into(program, "TEST", hx20::tape::FileType::Ascii, &mut bits)
        .unwrap();
    bits
}
