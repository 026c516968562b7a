use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    pub additive: Option<AdditiveNoiseConfig>,
    pub impulse: Option<ImpulseNoiseConfig>,
    /// Constant offset added to every sample (converter bias)
    pub dc_offset: Option<f64>,
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_awgn(mut self, snr_db: f64) -> Self {
        self.additive = Some(AdditiveNoiseConfig { snr_db });
        self
    }

    pub fn with_impulse(mut self, rate: f64, amplitude: f64, duration_samples: usize) -> Self {
        self.impulse = Some(ImpulseNoiseConfig {
            rate,
            amplitude,
            duration_samples,
        });
        self
    }

    pub fn with_dc_offset(mut self, offset: f64) -> Self {
        self.dc_offset = Some(offset);
        self
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct AdditiveNoiseConfig {
    pub snr_db: f64,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ImpulseNoiseConfig {
    /// Mean clicks per sample
    pub rate: f64,
    pub amplitude: f64,
    pub duration_samples: usize,
}

/// Deterministic stream when seeded, OS entropy otherwise
fn noise_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => rand::make_rng(),
    }
}

/// Mean square of a buffer
pub fn signal_power(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        0.0
    } else {
        signal.iter().map(|x| x * x).sum::<f64>() / signal.len() as f64
    }
}

/// Gaussian noise scaled against the mean power of the capture
fn add_white_noise(capture: &mut [f64], config: &AdditiveNoiseConfig, rng: &mut ChaCha8Rng) {
    let reference = signal_power(capture);
    if reference == 0.0 {
        return;
    }

    let sigma = (reference * 10.0_f64.powf(-config.snr_db / 10.0)).sqrt();
    let gaussian = match Normal::new(0.0, sigma) {
        Ok(gaussian) => gaussian,
        Err(e) => {
            log::warn!("No white noise added at {} dB SNR: {}", config.snr_db, e);
            return;
        }
    };

    capture
        .iter_mut()
        .for_each(|x| *x += gaussian.sample(rng));
}

/// Rectangular clicks of random polarity
///
/// Each sample independently starts a click with probability `rate`; a
/// click holds its offset for `duration_samples` samples and overlapping
/// clicks add.
fn add_clicks(capture: &mut [f64], config: &ImpulseNoiseConfig, rng: &mut ChaCha8Rng) {
    if config.rate <= 0.0 || config.duration_samples == 0 {
        return;
    }
    let onset_probability = config.rate.min(1.0);

    let onsets: Vec<(usize, f64)> = (0..capture.len())
        .filter_map(|start| {
            (rng.random::<f64>() < onset_probability).then(|| {
                let polarity = if rng.random::<bool>() { 1.0 } else { -1.0 };
                (start, polarity * config.amplitude)
            })
        })
        .collect();

    for (start, offset) in onsets {
        let stop = capture.len().min(start + config.duration_samples);
        capture[start..stop].iter_mut().for_each(|x| *x += offset);
    }
}

/// Return a copy of `clean` with the configured impairments applied
///
/// Noise levels are relative to the clean signal; the DC offset is added
/// last so it does not inflate the reference power.
pub fn apply_noise(clean: &[f64], config: &NoiseConfig) -> Vec<f64> {
    let mut signal = clean.to_vec();
    let mut rng = noise_rng(config.seed);

    if let Some(ref additive_config) = config.additive {
        add_white_noise(&mut signal, additive_config, &mut rng);
    }

    if let Some(ref impulse_config) = config.impulse {
        add_clicks(&mut signal, impulse_config, &mut rng);
    }

    if let Some(offset) = config.dc_offset {
        for sample in signal.iter_mut() {
            *sample += offset;
        }
    }

    signal
}
