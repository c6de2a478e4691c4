//! Audio seams between the simulation and a platform output device.
//!
//! The core never touches a device directly. A frontend loads every sample in
//! the [`AssetManifest`] up front, exposes them as a [`SampleBank`], and hands
//! out one [`VoiceSink`] per sound voice. All sink calls are fire-and-forget.

use thiserror::Error;

/// Sample names shipped with the sketch, in manifest order.
pub const SAMPLE_NAMES: [&str; 8] = ["ㄱ", "ㄹ", "ㅅ", "ㅣ", "ㅇ", "ㅏ", "ㅐ", "ㅓ"];

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset manifest lists no samples")]
    EmptyManifest,
    #[error("failed to load sample `{name}` from {path}: {reason}")]
    LoadFailed {
        name: String,
        path: String,
        reason: String,
    },
}

/// Output stage for one looping sample.
pub trait VoiceSink {
    /// Start continuous looped playback from the beginning of the sample.
    fn start_loop(&mut self);
    fn stop(&mut self);
    /// Move the output gain to `amplitude` over `ramp_sec` seconds.
    fn set_gain(&mut self, amplitude: f32, ramp_sec: f32);
}

/// Preloaded, fixed pool of samples a voice can be built from.
pub trait SampleBank {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Open a silent, stopped output stage for sample `index`.
    fn open_voice(&mut self, index: usize) -> Box<dyn VoiceSink>;
}

/// Named sample files under a base directory.
#[derive(Clone, Debug)]
pub struct AssetManifest {
    pub base_dir: String,
    pub extension: String,
    pub names: Vec<String>,
}

impl AssetManifest {
    /// The sketch's fixed sample list with the given directory and extension.
    pub fn standard(base_dir: &str, extension: &str) -> Self {
        Self {
            base_dir: base_dir.trim_end_matches('/').to_string(),
            extension: extension.trim_start_matches('.').to_string(),
            names: SAMPLE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn path_for(&self, name: &str) -> String {
        if self.base_dir.is_empty() {
            format!("{name}.{}", self.extension)
        } else {
            format!("{}/{name}.{}", self.base_dir, self.extension)
        }
    }

    /// `(name, path)` for every sample, in manifest order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.names.iter().map(|n| (n.as_str(), self.path_for(n)))
    }

    pub fn validate(&self) -> Result<(), AssetError> {
        if self.names.is_empty() {
            return Err(AssetError::EmptyManifest);
        }
        Ok(())
    }
}
