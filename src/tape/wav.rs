use crate::error;
use crate::Error;
use std::io::{Seek, Write};
use std::path::Path;

/// 8-bit unsigned mono PCM.
pub fn wav_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 8,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Write samples to WAV file
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[u8], sample_rate: u32) -> Result<(), Error> {
    let writer = hound::WavWriter::create(path, wav_spec(sample_rate)).map_err(wav_error)?;
    write_samples(writer, samples)
}

pub fn write_wav_to<W: Write + Seek>(
    writer: W,
    samples: &[u8],
    sample_rate: u32,
) -> Result<(), Error> {
    let writer = hound::WavWriter::new(writer, wav_spec(sample_rate)).map_err(wav_error)?;
    write_samples(writer, samples)
}

fn write_samples<W: Write + Seek>(
    mut writer: hound::WavWriter<W>,
    samples: &[u8],
) -> Result<(), Error> {
    for &sample in samples {
        // hound takes signed 8-bit samples and stores them offset by 128.
        writer
            .write_sample((i16::from(sample) - 128) as i8)
            .map_err(wav_error)?;
    }
    writer.finalize().map_err(wav_error)
}

fn wav_error(e: hound::Error) -> Error {
    error!(InternalError; format!("WAV: {}", e))
}
