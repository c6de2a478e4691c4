//! WAV decoding for the native mixer: every sample ends up as mono f32 at the
//! output device rate.

use std::path::Path;
use std::sync::Arc;
use wavefield_core::{AssetError, AssetManifest};

/// Decode a WAV file to mono f32 in [-1, 1], resampled to `target_rate`.
pub fn load_wav(path: &Path, target_rate: u32) -> Result<Vec<f32>, String> {
    let mut reader = hound::WavReader::open(path).map_err(|e| e.to_string())?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<_, _>>()
                .map_err(|e| e.to_string())?
        }
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| e.to_string())?,
    };

    let mono = downmix(&interleaved, spec.channels as usize);
    if mono.is_empty() {
        return Err("no audio frames".into());
    }
    Ok(resample(&mono, spec.sample_rate, target_rate))
}

/// Average interleaved frames down to one channel.
pub fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Linear resampling.
pub fn resample(samples: &[f32], src_rate: u32, dst_rate: u32) -> Vec<f32> {
    if src_rate == dst_rate || samples.is_empty() {
        return samples.to_vec();
    }
    let ratio = src_rate as f64 / dst_rate as f64;
    let output_len = ((samples.len() as f64 / ratio) as usize).max(1);
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let src_pos = i as f64 * ratio;
        let src_idx = src_pos as usize;
        let frac = (src_pos - src_idx as f64) as f32;

        let sample = if src_idx + 1 < samples.len() {
            let a = samples[src_idx];
            let b = samples[src_idx + 1];
            a + (b - a) * frac
        } else {
            samples[src_idx.min(samples.len() - 1)]
        };
        output.push(sample);
    }
    output
}

/// Load every manifest entry. The first failure aborts with the offending name.
pub fn load_manifest(
    manifest: &AssetManifest,
    target_rate: u32,
) -> Result<Vec<Arc<[f32]>>, AssetError> {
    manifest.validate()?;
    let mut loaded = Vec::with_capacity(manifest.names.len());
    for (name, path) in manifest.entries() {
        let data = load_wav(Path::new(&path), target_rate).map_err(|reason| {
            AssetError::LoadFailed {
                name: name.to_string(),
                path: path.clone(),
                reason,
            }
        })?;
        log::info!(
            "[assets] loaded {} ({:.1}s)",
            name,
            data.len() as f32 / target_rate as f32
        );
        loaded.push(Arc::from(data));
    }
    Ok(loaded)
}
