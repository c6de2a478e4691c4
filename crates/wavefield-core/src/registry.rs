use crate::audio::{AssetError, SampleBank};
use crate::color::ColorKey;
use crate::voice::{SoundVoice, VoiceParams};
use fnv::FnvHashMap;
use rand::prelude::*;

/// Index of a voice inside its [`VoiceRegistry`]. Stable for the registry's
/// lifetime since voices are never removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VoiceId(usize);

impl VoiceId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Append-only map from colour bucket to sound voice.
pub struct VoiceRegistry {
    bank: Box<dyn SampleBank>,
    params: VoiceParams,
    voices: Vec<SoundVoice>,
    by_key: FnvHashMap<ColorKey, VoiceId>,
    rng: StdRng,
}

impl VoiceRegistry {
    /// Fails when the bank has no samples; every later lookup relies on a
    /// non-empty pool.
    pub fn new(
        bank: Box<dyn SampleBank>,
        params: VoiceParams,
        seed: u64,
    ) -> Result<Self, AssetError> {
        if bank.is_empty() {
            return Err(AssetError::EmptyManifest);
        }
        Ok(Self {
            bank,
            params,
            voices: Vec::new(),
            by_key: FnvHashMap::default(),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Existing voice for `key`, or a new one on a uniformly chosen sample.
    pub fn voice_for(&mut self, key: ColorKey) -> VoiceId {
        if let Some(id) = self.by_key.get(&key) {
            return *id;
        }
        let sample = self.rng.gen_range(0..self.bank.len());
        let sink = self.bank.open_voice(sample);
        let id = VoiceId(self.voices.len());
        self.voices.push(SoundVoice::new(sink, sample, self.params.clone()));
        self.by_key.insert(key, id);
        log::debug!("[voices] bucket {key} -> sample {sample} (voice {})", id.0);
        id
    }

    /// Lookup without creating.
    pub fn lookup(&self, key: ColorKey) -> Option<VoiceId> {
        self.by_key.get(&key).copied()
    }

    pub fn get(&self, id: VoiceId) -> Option<&SoundVoice> {
        self.voices.get(id.0)
    }

    pub fn add_instance(&mut self, id: VoiceId) {
        if let Some(v) = self.voices.get_mut(id.0) {
            v.add_instance();
        }
    }

    pub fn remove_instance(&mut self, id: VoiceId) {
        if let Some(v) = self.voices.get_mut(id.0) {
            v.remove_instance();
        }
    }

    pub fn all_voices(&self) -> impl Iterator<Item = &SoundVoice> {
        self.voices.iter()
    }

    pub fn all_voices_mut(&mut self) -> impl Iterator<Item = &mut SoundVoice> {
        self.voices.iter_mut()
    }

    /// Run one smoothing step on every registered voice.
    pub fn update_volumes(&mut self) {
        for v in self.all_voices_mut() {
            v.update_volume();
        }
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}
