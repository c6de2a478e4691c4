use glam::Vec2;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use wavefield_core::{AssetManifest, PointerState, PressAction, Sketch};
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

mod gpu;
mod mixer;
mod samples;

use gpu::{CircleBatch, GpuState};
use mixer::{Mixer, NativeSampleBank, OutputDevice, FALLBACK_SAMPLE_RATE};

const DEFAULT_ASSET_DIR: &str = "assets";
const ASSET_EXTENSION: &str = "wav";

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let asset_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ASSET_DIR.to_string());

    let output = OutputDevice::open_default();
    let sample_rate = match &output {
        Some(o) => o.sample_rate(),
        None => {
            log::warn!("[audio] no output device; running silent");
            FALLBACK_SAMPLE_RATE
        }
    };

    let manifest = AssetManifest::standard(&asset_dir, ASSET_EXTENSION);
    let loaded = samples::load_manifest(&manifest, sample_rate)?;
    let mixer = Arc::new(Mutex::new(Mixer::new(sample_rate)));
    let _audio_stream = match &output {
        Some(o) => Some(o.start(Arc::clone(&mixer))?),
        None => None,
    };
    let bank = NativeSampleBank::new(Arc::clone(&mixer), loaded);

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("wavefield")
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(&window))?;
    let size = window.inner_size();
    let mut batch = CircleBatch::new(size.width, size.height);
    let mut sketch = Sketch::start(
        Box::new(bank),
        Vec2::new(size.width as f32, size.height as f32),
        rand::random(),
    )?;
    log::info!(
        "[field] started with {} waves on {}x{}",
        sketch.wave_count(),
        size.width,
        size.height
    );

    let mut pointer = PointerState::default();
    let mut last_frame = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            state.resize(size);
            batch.resize(size.width, size.height);
            sketch.resize(Vec2::new(size.width as f32, size.height as f32));
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => {
            pointer.x = position.x as f32;
            pointer.y = position.y as f32;
        }
        Event::WindowEvent {
            event:
                WindowEvent::MouseInput {
                    state: button_state,
                    button: MouseButton::Left,
                    ..
                },
            ..
        } => match button_state {
            ElementState::Pressed => {
                pointer.down = true;
                match sketch.pointer_pressed(pointer.x, pointer.y) {
                    PressAction::Merge { indices, .. } => {
                        log::info!("[press] merged {} waves", indices.len());
                    }
                    PressAction::Spawn => {
                        log::debug!("[press] spawn at ({:.0},{:.0})", pointer.x, pointer.y);
                    }
                }
            }
            ElementState::Released => pointer.down = false,
        },
        Event::AboutToWait => {
            let now = Instant::now();
            let dt = now - last_frame;
            last_frame = now;
            sketch.frame(dt, pointer.down, &mut batch);
            match state.render(&batch) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            }
        }
        _ => {}
    })?;
    Ok(())
}
