//! Pulse-width bit encoding.
//!
//! Every bit is one full pulse: a short pulse for `0`, a long pulse for `1`.
//! A byte goes out least significant bit first followed by a single `1`
//! stop bit. There is no start bit.
use super::{Samples, TapeConfig};

/// Receives the bit stream of a tape image.
pub trait BitSink {
    fn bit(&mut self, bit: bool);

    fn byte(&mut self, byte: u8) {
        for i in 0..8 {
            self.bit((byte >> i) & 1 == 1);
        }
        self.bit(true);
    }
}

/// Records raw bits.
impl BitSink for Vec<bool> {
    fn bit(&mut self, bit: bool) {
        self.push(bit)
    }
}

/// Renders bits as smoothed square pulses into an 8-bit sample buffer.
#[derive(Debug, Clone)]
pub struct PulseEncoder {
    zero: Vec<u8>,
    one: Vec<u8>,
    samples: Samples,
}

impl PulseEncoder {
    pub fn new(config: &TapeConfig) -> PulseEncoder {
        PulseEncoder {
            zero: pulse_shape(config, config.short_pulse_us),
            one: pulse_shape(config, config.long_pulse_us),
            samples: Samples::default(),
        }
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub fn into_samples(self) -> Samples {
        self.samples
    }
}

impl BitSink for PulseEncoder {
    fn bit(&mut self, bit: bool) {
        let shape = if bit { &self.one } else { &self.zero };
        self.samples.extend_from_slice(shape);
    }
}

/// One pulse of `duration_us`: a tanh-edged high half then the mirrored low half.
pub fn pulse_shape(config: &TapeConfig, duration_us: u32) -> Vec<u8> {
    let samples = duration_us as u64 * config.sample_rate as u64 / 1_000_000;
    let half = (samples / 2) as usize;
    let center = config.center as f64;
    let mut shape = Vec::with_capacity(half * 2);
    for i in 0..half {
        let t = i as f64 / half as f64;
        shape.push((center + config.amplitude * (4.0 * (t - 0.5)).tanh()) as u8);
    }
    for i in 0..half {
        let t = i as f64 / half as f64;
        shape.push((center - config.amplitude * (4.0 * (t - 0.5)).tanh()) as u8);
    }
    shape
}
