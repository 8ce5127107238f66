use crc::{Crc, CRC_16_IBM_3740, CRC_16_KERMIT};

const KERMIT: Crc<u16> = Crc::<u16>::new(&CRC_16_KERMIT);
const CCITT: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// Block check algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crc16 {
    /// Reflected, polynomial 0x8408, seed 0x0000.
    Kermit,
    /// MSB first, polynomial 0x1021, seed 0xFFFF.
    Ccitt,
}

impl Default for Crc16 {
    fn default() -> Self {
        Crc16::Kermit
    }
}

impl Crc16 {
    pub fn checksum(&self, bytes: &[u8]) -> u16 {
        match self {
            Crc16::Kermit => KERMIT.checksum(bytes),
            Crc16::Ccitt => CCITT.checksum(bytes),
        }
    }

    /// Trailer bytes as they go on tape: low byte first.
    pub fn trailer(&self, bytes: &[u8]) -> [u8; 2] {
        self.checksum(bytes).to_le_bytes()
    }
}
