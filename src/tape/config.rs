use super::Crc16;

/// Timing and framing constants of a tape image.
///
/// The defaults reproduce what a real HX-20 writes and accepts; the gap
/// lengths in particular are asymmetric on purpose.
#[derive(Debug, Clone, PartialEq)]
pub struct TapeConfig {
    pub sample_rate: u32,
    /// Resting level of the unsigned 8-bit signal.
    pub center: u8,
    /// Pulse deflection before normalization.
    pub amplitude: f64,
    /// Bit `0`, microseconds.
    pub short_pulse_us: u32,
    /// Bit `1`, microseconds.
    pub long_pulse_us: u32,
    pub sync_bits: usize,
    pub block_size: usize,
    /// 0xFF bytes after every physical block.
    pub block_gap: usize,
    /// Extra 0xFF bytes after the header pair.
    pub header_gap: usize,
    /// Extra 0xFF bytes after each data pair.
    pub data_gap: usize,
    /// Leading and trailing 0xFF bytes, about five seconds.
    pub file_gap: usize,
    pub crc: Crc16,
    /// Hex dump every block frame to the log.
    pub dump: bool,
}

impl Default for TapeConfig {
    fn default() -> Self {
        TapeConfig {
            sample_rate: 11025,
            center: 129,
            amplitude: 1.0,
            short_pulse_us: 545,
            long_pulse_us: 1080,
            sync_bits: 80,
            block_size: 256,
            block_gap: 100,
            header_gap: 100,
            data_gap: 300,
            file_gap: 614,
            crc: Crc16::Kermit,
            dump: false,
        }
    }
}
