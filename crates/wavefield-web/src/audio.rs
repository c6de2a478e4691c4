use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wavefield_core::{AssetError, AssetManifest, SampleBank, VoiceSink};
use web_sys as web;

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

/// Master bus all voices feed into.
pub fn build_master(audio_ctx: &web::AudioContext) -> anyhow::Result<web::GainNode> {
    let master = create_gain(audio_ctx, 1.0, "Master")
        .map_err(|_| anyhow::anyhow!("could not create master gain"))?;
    master
        .connect_with_audio_node(&audio_ctx.destination())
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(master)
}

/// Decoded samples from the manifest, ready to be looped.
pub struct WebSampleBank {
    audio_ctx: web::AudioContext,
    master: web::GainNode,
    buffers: Vec<web::AudioBuffer>,
}

impl WebSampleBank {
    pub fn new(
        audio_ctx: web::AudioContext,
        master: web::GainNode,
        buffers: Vec<web::AudioBuffer>,
    ) -> Self {
        Self {
            audio_ctx,
            master,
            buffers,
        }
    }
}

impl SampleBank for WebSampleBank {
    fn len(&self) -> usize {
        self.buffers.len()
    }

    fn open_voice(&mut self, index: usize) -> Box<dyn VoiceSink> {
        let gain = create_gain(&self.audio_ctx, 0.0, "Voice gain").ok();
        if let Some(g) = &gain {
            _ = g.connect_with_audio_node(&self.master);
        }
        Box::new(WebVoice {
            audio_ctx: self.audio_ctx.clone(),
            buffer: self.buffers[index].clone(),
            gain,
            source: None,
        })
    }
}

/// One looping buffer source behind its own gain node.
///
/// A fresh `AudioBufferSourceNode` is created on every start since sources are
/// single-use.
pub struct WebVoice {
    audio_ctx: web::AudioContext,
    buffer: web::AudioBuffer,
    gain: Option<web::GainNode>,
    source: Option<web::AudioBufferSourceNode>,
}

impl VoiceSink for WebVoice {
    fn start_loop(&mut self) {
        self.stop();
        let Some(gain) = &self.gain else {
            return;
        };
        let src = match web::AudioBufferSourceNode::new(&self.audio_ctx) {
            Ok(s) => s,
            Err(e) => {
                log::error!("AudioBufferSourceNode error: {:?}", e);
                return;
            }
        };
        src.set_buffer(Some(&self.buffer));
        src.set_loop(true);
        _ = src.connect_with_audio_node(gain);
        _ = src.start();
        self.source = Some(src);
    }

    fn stop(&mut self) {
        if let Some(src) = self.source.take() {
            _ = src.stop();
            _ = src.disconnect();
        }
    }

    fn set_gain(&mut self, amplitude: f32, ramp_sec: f32) {
        let Some(gain) = &self.gain else {
            return;
        };
        let param = gain.gain();
        if ramp_sec <= 0.0 {
            param.set_value(amplitude);
            return;
        }
        let now = self.audio_ctx.current_time();
        _ = param.cancel_scheduled_values(now);
        _ = param.set_value_at_time(param.value(), now);
        _ = param.linear_ramp_to_value_at_time(amplitude, now + ramp_sec as f64);
    }
}

/// Fetch and decode every sample in the manifest. Any failure aborts.
pub async fn load_samples(
    audio_ctx: &web::AudioContext,
    manifest: &AssetManifest,
) -> Result<Vec<web::AudioBuffer>, AssetError> {
    manifest.validate()?;
    let mut buffers = Vec::with_capacity(manifest.names.len());
    for (name, path) in manifest.entries() {
        let buffer = fetch_and_decode(audio_ctx, &path)
            .await
            .map_err(|reason| AssetError::LoadFailed {
                name: name.to_string(),
                path: path.clone(),
                reason,
            })?;
        log::info!("[assets] loaded {} ({:.1}s)", name, buffer.duration());
        buffers.push(buffer);
    }
    Ok(buffers)
}

async fn fetch_and_decode(
    audio_ctx: &web::AudioContext,
    path: &str,
) -> Result<web::AudioBuffer, String> {
    let window = web::window().ok_or_else(|| "no window".to_string())?;
    let resp = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(js_err)?;
    let resp: web::Response = resp.dyn_into().map_err(js_err)?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    let bytes = JsFuture::from(resp.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    let bytes: js_sys::ArrayBuffer = bytes.dyn_into().map_err(js_err)?;
    let decoded = JsFuture::from(audio_ctx.decode_audio_data(&bytes).map_err(js_err)?)
        .await
        .map_err(js_err)?;
    decoded.dyn_into::<web::AudioBuffer>().map_err(js_err)
}

fn js_err(e: impl std::fmt::Debug) -> String {
    format!("{:?}", e)
}
