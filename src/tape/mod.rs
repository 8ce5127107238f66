/*!
## Rust Tape Module

This Rust module synthesizes HX-20 cassette images: framed, checksummed,
double-written blocks rendered as pulse-width modulated audio.

*/

mod audio;
mod block;
mod config;
mod crc;
mod encoder;
mod header;
mod pulse;
mod wav;

pub use audio::Samples;
pub use block::{write_block, write_gap, Block, BlockType, GAP_BYTE, POSTAMBLE, PREAMBLE};
pub use config::TapeConfig;
pub use crc::Crc16;
pub use encoder::{crlf, encode_program, Layout, Segment, TapeEncoder};
pub use header::{
    program_name, Clock, FileType, FixedClock, Record, RecordKind, SystemClock, RECORD_LEN,
};
pub use pulse::{pulse_shape, BitSink, PulseEncoder};
pub use wav::{wav_spec, write_wav, write_wav_to};

/// Rescales `samples` in place; `None` means the buffer was flat and left alone.
pub fn normalize(samples: &mut Samples, target: f64) -> Option<f64> {
    samples.normalize(target)
}
