//! Block framing.
//!
//! ```text
//! sync     80 x bit 0
//! preamble bit 1, FF, AA
//! ident    type, number hi, number lo, copy
//! payload  80 (H/E) or 256 (D) bytes
//! check    crc lo, crc hi        (over ident + payload)
//! postamb  AA, 00
//! gap      100 x FF
//! ```
use super::{BitSink, TapeConfig};
use log::{debug, info};

pub const PREAMBLE: [u8; 2] = [0xFF, 0xAA];
pub const POSTAMBLE: [u8; 2] = [0xAA, 0x00];
pub const GAP_BYTE: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Header,
    Data,
    End,
}

impl BlockType {
    pub fn id(&self) -> u8 {
        match self {
            BlockType::Header => b'H',
            BlockType::Data => b'D',
            BlockType::End => b'E',
        }
    }
}

/// One physical block. Every logical block is written twice, as copy 0 and copy 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockType,
    pub number: u16,
    pub copy: u8,
    pub payload: Vec<u8>,
}

impl Block {
    pub fn identification(&self) -> [u8; 4] {
        let [hi, lo] = self.number.to_be_bytes();
        [self.kind.id(), hi, lo, self.copy]
    }

    /// Identification, payload and checksum trailer: the checked part of the block.
    pub fn frame(&self, config: &TapeConfig) -> Vec<u8> {
        let mut frame = Vec::with_capacity(self.payload.len() + 6);
        frame.extend_from_slice(&self.identification());
        frame.extend_from_slice(&self.payload);
        let trailer = config.crc.trailer(&frame);
        frame.extend_from_slice(&trailer);
        frame
    }
}

/// Emits a complete block including its trailing inter-block gap.
pub fn write_block<S: BitSink + ?Sized>(sink: &mut S, block: &Block, config: &TapeConfig) {
    let frame = block.frame(config);
    for _ in 0..config.sync_bits {
        sink.bit(false);
    }
    sink.bit(true);
    for &byte in PREAMBLE.iter().chain(frame.iter()).chain(POSTAMBLE.iter()) {
        sink.byte(byte);
    }
    let crc = u16::from_le_bytes([frame[frame.len() - 2], frame[frame.len() - 1]]);
    debug!(
        "block type: {} number: {} copy: {} crc: {:04X}",
        char::from(block.kind.id()),
        block.number,
        block.copy,
        crc
    );
    if config.dump {
        for row in frame.chunks(32) {
            let hex: Vec<String> = row.iter().map(|b| format!("{:02X}", b)).collect();
            info!("{}", hex.join(" "));
        }
    }
    write_gap(sink, config.block_gap);
}

pub fn write_gap<S: BitSink + ?Sized>(sink: &mut S, bytes: usize) {
    for _ in 0..bytes {
        sink.byte(GAP_BYTE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::Crc16;

    fn block() -> Block {
        Block {
            kind: BlockType::Data,
            number: 0x0102,
            copy: 1,
            payload: vec![0x41, 0x42],
        }
    }

    #[test]
    fn test_identification() {
        assert_eq!(block().identification(), [b'D', 0x01, 0x02, 0x01]);
    }

    #[test]
    fn test_frame_checksum() {
        let config = TapeConfig::default();
        let frame = block().frame(&config);
        let crc = Crc16::Kermit.checksum(&[b'D', 0x01, 0x02, 0x01, 0x41, 0x42]);
        assert_eq!(frame.len(), 8);
        assert_eq!(frame[6], (crc & 0xFF) as u8);
        assert_eq!(frame[7], (crc >> 8) as u8);
    }

    #[test]
    fn test_frame_ccitt() {
        let config = TapeConfig {
            crc: Crc16::Ccitt,
            ..TapeConfig::default()
        };
        let frame = block().frame(&config);
        let crc = Crc16::Ccitt.checksum(&frame[..6]);
        assert_eq!(&frame[6..], &crc.to_le_bytes());
    }

    #[test]
    fn test_bit_count() {
        let config = TapeConfig::default();
        let mut bits: Vec<bool> = vec![];
        write_block(&mut bits, &block(), &config);
        let bytes = 2 + 8 + 2 + config.block_gap;
        assert_eq!(bits.len(), config.sync_bits + 1 + bytes * 9);
        assert!(bits[..80].iter().all(|b| !b));
        assert!(bits[80]);
    }

    #[test]
    fn test_block_type_ids() {
        let ids: Vec<u8> = [BlockType::Header, BlockType::Data, BlockType::End]
            .iter()
            .map(BlockType::id)
            .collect();
        assert_eq!(ids, b"HDE".to_vec());
    }
}
