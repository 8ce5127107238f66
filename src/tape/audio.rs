use log::{debug, info};

/// Append-only unsigned 8-bit mono sample buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples {
    data: Vec<u8>,
}

impl Samples {
    pub fn extend_from_slice(&mut self, samples: &[u8]) {
        self.data.extend_from_slice(samples)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn min_max(&self) -> Option<(u8, u8)> {
        let min = *self.data.iter().min()?;
        let max = *self.data.iter().max()?;
        Some((min, max))
    }

    /// Rescales the whole buffer around 128 so its peak deflection becomes
    /// `target`. Returns the scale applied, or `None` when the buffer is
    /// empty or flat and was left alone.
    pub fn normalize(&mut self, target: f64) -> Option<f64> {
        let (min, max) = self.min_max()?;
        let center = (min as f64 + max as f64) / 2.0;
        let amplitude = (max as f64 - min as f64) / 2.0;
        if amplitude < 0.1 {
            debug!("not normalizing a flat buffer of {} samples", self.len());
            return None;
        }
        let scale = target / amplitude;
        for sample in self.data.iter_mut() {
            // Truncating the deflection, not the level, keeps max - min within 2 * target.
            let deflection = ((*sample as f64 - center) * scale).trunc();
            *sample = (128.0 + deflection).max(0.0).min(255.0) as u8;
        }
        info!(
            "normalized: amplitude {} -> {} (scale: {}x)",
            amplitude, target, scale
        );
        Some(scale)
    }
}

impl From<Vec<u8>> for Samples {
    fn from(data: Vec<u8>) -> Self {
        Samples { data }
    }
}

impl AsRef<[u8]> for Samples {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
