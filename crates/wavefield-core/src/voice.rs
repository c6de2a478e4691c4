use crate::audio::VoiceSink;
use crate::constants::{
    BASE_VOLUME_PER_INSTANCE, GAIN_EPSILON, GAIN_RAMP_SEC, GAIN_SMOOTHING, GAIN_SNAP_RAMP_SEC,
    MAX_VOICE_GAIN,
};

#[derive(Clone, Debug)]
pub struct VoiceParams {
    pub base_volume: f32,
    pub max_gain: f32,
    pub smoothing: f32,
    pub epsilon: f32,
    pub ramp_sec: f32,
    pub snap_ramp_sec: f32,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            base_volume: BASE_VOLUME_PER_INSTANCE,
            max_gain: MAX_VOICE_GAIN,
            smoothing: GAIN_SMOOTHING,
            epsilon: GAIN_EPSILON,
            ramp_sec: GAIN_RAMP_SEC,
            snap_ramp_sec: GAIN_SNAP_RAMP_SEC,
        }
    }
}

/// One looping sample shared by every wave in its colour bucket.
///
/// The gain follows the number of live waves referencing the voice. Voices are
/// never dropped; once the count reaches zero the gain fades out and playback
/// stops.
pub struct SoundVoice {
    sink: Box<dyn VoiceSink>,
    sample_index: usize,
    params: VoiceParams,
    current: f32,
    target: f32,
    active: u32,
    looping: bool,
}

impl SoundVoice {
    pub fn new(sink: Box<dyn VoiceSink>, sample_index: usize, params: VoiceParams) -> Self {
        let mut voice = Self {
            sink,
            sample_index,
            params,
            current: 0.0,
            target: 0.0,
            active: 0,
            looping: false,
        };
        voice.sink.set_gain(0.0, 0.0);
        voice
    }

    pub fn add_instance(&mut self) {
        self.active += 1;
        if !self.looping {
            log::debug!("[voices] start loop (sample {})", self.sample_index);
            self.sink.start_loop();
            self.looping = true;
        }
        self.retarget();
    }

    pub fn remove_instance(&mut self) {
        self.active = self.active.saturating_sub(1);
        self.retarget();
    }

    /// Per-frame smoothing step. This is the only place playback stops.
    pub fn update_volume(&mut self) {
        if (self.current - self.target).abs() > self.params.epsilon {
            let next = self.current + (self.target - self.current) * self.params.smoothing;
            self.sink.set_gain(next, self.params.ramp_sec);
            self.current = next;
        } else {
            self.sink.set_gain(self.target, self.params.snap_ramp_sec);
            self.current = self.target;
            if self.target == 0.0 && self.looping {
                log::debug!("[voices] stop loop (sample {})", self.sample_index);
                self.sink.stop();
                self.looping = false;
            }
        }
    }

    fn retarget(&mut self) {
        self.target = (self.active as f32 * self.params.base_volume).min(self.params.max_gain);
    }

    pub fn sample_index(&self) -> usize {
        self.sample_index
    }

    pub fn active_instances(&self) -> u32 {
        self.active
    }

    pub fn current_gain(&self) -> f32 {
        self.current
    }

    pub fn target_gain(&self) -> f32 {
        self.target
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }
}

impl std::fmt::Debug for SoundVoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundVoice")
            .field("sample_index", &self.sample_index)
            .field("current", &self.current)
            .field("target", &self.target)
            .field("active", &self.active)
            .field("looping", &self.looping)
            .finish()
    }
}
