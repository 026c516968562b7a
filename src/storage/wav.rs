use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::{WavReader, WavSpec, WavWriter};

use crate::error::{MlsError, Result};

/// One channel of a WAV capture
#[derive(Debug, Clone)]
pub struct WavCapture {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
}

/// Write a mono 32-bit float WAV file
pub fn save_wav<P: AsRef<Path>>(path: P, samples: &[f64], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;

    for &sample in samples {
        writer.write_sample(sample as f32)?;
    }

    writer.finalize()?;
    Ok(())
}

/// Read one channel of a WAV file as samples in [-1, 1]
pub fn read_wav_channel<P: AsRef<Path>>(path: P, channel: u16) -> Result<WavCapture> {
    let reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();

    if channel >= spec.channels {
        return Err(MlsError::InvalidData(format!(
            "channel {} requested from a {}-channel WAV file",
            channel, spec.channels
        )));
    }

    let interleaved = read_samples(reader, &spec)?;
    let samples = interleaved
        .iter()
        .skip(channel as usize)
        .step_by(spec.channels as usize)
        .copied()
        .collect();

    Ok(WavCapture {
        samples,
        sample_rate: spec.sample_rate,
    })
}

fn read_samples(mut reader: WavReader<BufReader<File>>, spec: &WavSpec) -> Result<Vec<f64>> {
    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_val = 2_i64.pow(spec.bits_per_sample as u32 - 1) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stereo_channel_selection() {
        let path = std::env::temp_dir().join(format!("mlsdeconv_wav_{}.wav", std::process::id()));
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for (left, right) in [(16384_i16, -16384_i16), (0, 8192)] {
            writer.write_sample(left).unwrap();
            writer.write_sample(right).unwrap();
        }
        writer.finalize().unwrap();

        let right = read_wav_channel(&path, 1).unwrap();
        assert_eq!(right.sample_rate, 48_000);
        assert_eq!(right.samples, vec![-0.5, 0.25]);
        assert!(read_wav_channel(&path, 2).is_err());

        std::fs::remove_file(&path).unwrap();
    }
}
