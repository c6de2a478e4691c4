//! cpal output: a shared mixer of looping sample channels, each with its own
//! linearly ramped gain.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use std::sync::{Arc, Mutex, PoisonError};
use wavefield_core::{SampleBank, VoiceSink};

pub const FALLBACK_SAMPLE_RATE: u32 = 48_000;

struct Channel {
    data: Arc<[f32]>,
    pos: usize,
    playing: bool,
    gain: f32,
    target: f32,
    step: f32,
    ramp_left: u32,
}

impl Channel {
    fn next(&mut self) -> f32 {
        if self.ramp_left > 0 {
            self.ramp_left -= 1;
            self.gain = if self.ramp_left == 0 {
                self.target
            } else {
                self.gain + self.step
            };
        }
        if !self.playing || self.data.is_empty() {
            return 0.0;
        }
        let s = self.data[self.pos] * self.gain;
        self.pos += 1;
        if self.pos >= self.data.len() {
            self.pos = 0;
        }
        s
    }
}

pub struct Mixer {
    sample_rate: f32,
    channels: Vec<Channel>,
}

impl Mixer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate as f32,
            channels: Vec::new(),
        }
    }

    pub fn add_channel(&mut self, data: Arc<[f32]>) -> usize {
        self.channels.push(Channel {
            data,
            pos: 0,
            playing: false,
            gain: 0.0,
            target: 0.0,
            step: 0.0,
            ramp_left: 0,
        });
        self.channels.len() - 1
    }

    /// Restart from the top of the sample.
    pub fn start(&mut self, channel: usize) {
        if let Some(ch) = self.channels.get_mut(channel) {
            ch.pos = 0;
            ch.playing = true;
        }
    }

    pub fn stop(&mut self, channel: usize) {
        if let Some(ch) = self.channels.get_mut(channel) {
            ch.playing = false;
        }
    }

    pub fn set_gain(&mut self, channel: usize, amplitude: f32, ramp_sec: f32) {
        let sr = self.sample_rate;
        let Some(ch) = self.channels.get_mut(channel) else {
            return;
        };
        let n = (ramp_sec.max(0.0) * sr).round() as u32;
        ch.target = amplitude;
        if n == 0 {
            ch.gain = amplitude;
            ch.ramp_left = 0;
        } else {
            ch.step = (amplitude - ch.gain) / n as f32;
            ch.ramp_left = n;
        }
    }

    pub fn gain(&self, channel: usize) -> Option<f32> {
        self.channels.get(channel).map(|c| c.gain)
    }

    /// One mono output sample, soft-clipped.
    pub fn next_sample(&mut self) -> f32 {
        let sum: f32 = self.channels.iter_mut().map(Channel::next).sum();
        sum.tanh()
    }
}

/// Mixer handle for one channel.
pub struct NativeVoice {
    mixer: Arc<Mutex<Mixer>>,
    channel: usize,
}

impl VoiceSink for NativeVoice {
    fn start_loop(&mut self) {
        lock(&self.mixer).start(self.channel);
    }

    fn stop(&mut self) {
        lock(&self.mixer).stop(self.channel);
    }

    fn set_gain(&mut self, amplitude: f32, ramp_sec: f32) {
        lock(&self.mixer).set_gain(self.channel, amplitude, ramp_sec);
    }
}

pub struct NativeSampleBank {
    mixer: Arc<Mutex<Mixer>>,
    samples: Vec<Arc<[f32]>>,
}

impl NativeSampleBank {
    pub fn new(mixer: Arc<Mutex<Mixer>>, samples: Vec<Arc<[f32]>>) -> Self {
        Self { mixer, samples }
    }
}

impl SampleBank for NativeSampleBank {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn open_voice(&mut self, index: usize) -> Box<dyn VoiceSink> {
        let channel = lock(&self.mixer).add_channel(Arc::clone(&self.samples[index]));
        Box::new(NativeVoice {
            mixer: Arc::clone(&self.mixer),
            channel,
        })
    }
}

fn lock(mixer: &Mutex<Mixer>) -> std::sync::MutexGuard<'_, Mixer> {
    mixer.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct OutputDevice {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
}

impl OutputDevice {
    pub fn open_default() -> Option<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device()?;
        let config = device.default_output_config().ok()?;
        Some(Self { device, config })
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate().0
    }

    pub fn start(&self, mixer: Arc<Mutex<Mixer>>) -> anyhow::Result<cpal::Stream> {
        let channels = self.config.channels() as usize;
        let config: cpal::StreamConfig = self.config.clone().into();
        let stream = match self.config.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&self.device, &config, channels, mixer)?,
            cpal::SampleFormat::I16 => build_stream::<i16>(&self.device, &config, channels, mixer)?,
            cpal::SampleFormat::U16 => build_stream::<u16>(&self.device, &config, channels, mixer)?,
            other => anyhow::bail!("unsupported sample format {other:?}"),
        };
        stream.play()?;
        log::info!(
            "[audio] output stream at {} Hz, {} channels",
            self.sample_rate(),
            channels
        );
        Ok(stream)
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mixer: Arc<Mutex<Mixer>>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample + FromSample<f32>,
{
    device.build_output_stream(
        config,
        move |data: &mut [T], _| {
            let mut mixer = lock(&mixer);
            for frame in data.chunks_mut(channels.max(1)) {
                let v = T::from_sample(mixer.next_sample());
                frame.fill(v);
            }
        },
        |err| log::error!("[audio] stream error: {err}"),
        None,
    )
}
