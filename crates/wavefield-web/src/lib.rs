#![cfg(target_arch = "wasm32")]
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use wavefield_core::{AssetManifest, PointerState, Sketch, Surface};
use web_sys as web;

mod audio;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

const CANVAS_ID: &str = "app-canvas";
const ASSET_DIR: &str = "assets";
const ASSET_EXTENSION: &str = "m4a";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("wavefield-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(doc) = dom::window_document() {
                overlay::set_message(&doc, &format!("{e}"));
                overlay::show(&doc);
            }
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, CANVAS_ID)?;
    dom::wire_canvas_resize(&canvas);

    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let master = audio::build_master(&audio_ctx)?;

    let manifest = AssetManifest::standard(ASSET_DIR, ASSET_EXTENSION);
    let buffers = audio::load_samples(&audio_ctx, &manifest).await?;
    log::info!("[assets] {} samples ready", buffers.len());
    let bank = audio::WebSampleBank::new(audio_ctx.clone(), master, buffers);

    let surface = render::CanvasSurface::new(canvas.clone())?;
    let size: Vec2 = surface.size();
    let sketch = Rc::new(RefCell::new(Sketch::start(
        Box::new(bank),
        size,
        rand::random(),
    )?));
    log::info!(
        "[field] started with {} waves on {:.0}x{:.0}",
        sketch.borrow().wave_count(),
        size.x,
        size.y
    );

    let pointer = Rc::new(RefCell::new(PointerState::default()));
    events::wire_input_handlers(events::InputWiring {
        canvas,
        sketch: sketch.clone(),
        pointer: pointer.clone(),
        audio_ctx,
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        sketch,
        surface,
        pointer,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
