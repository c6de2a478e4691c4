use crate::input;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wavefield_core::{PointerState, PressAction, Sketch};
use web_sys as web;

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub sketch: Rc<RefCell<Sketch>>,
    pub pointer: Rc<RefCell<PointerState>>,
    pub audio_ctx: web::AudioContext,
}

/// Press handling. A press hides the overlay and resumes suspended audio.
pub fn wire_input_handlers(w: InputWiring) {
    {
        let canvas = w.canvas.clone();
        let sketch = w.sketch.clone();
        let pointer = w.pointer.clone();
        let audio_ctx = w.audio_ctx.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            ev.prevent_default();
            _ = canvas.set_pointer_capture(ev.pointer_id());
            if audio_ctx.state() == web::AudioContextState::Suspended {
                _ = audio_ctx.resume();
            }
            if let Some(doc) = crate::dom::window_document() {
                overlay::hide(&doc);
            }
            let pos = input::pointer_canvas_px(&ev, &canvas);
            {
                let mut p = pointer.borrow_mut();
                p.x = pos.x;
                p.y = pos.y;
                p.down = true;
            }
            match sketch.borrow_mut().pointer_pressed(pos.x, pos.y) {
                PressAction::Merge { indices, .. } => {
                    log::info!("[press] merged {} waves", indices.len());
                }
                PressAction::Spawn => {
                    log::debug!("[press] spawn at ({:.0},{:.0})", pos.x, pos.y);
                }
            }
        }) as Box<dyn FnMut(web::PointerEvent)>);
        _ = w
            .canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    for name in ["pointerup", "pointercancel", "pointerleave"] {
        let pointer = w.pointer.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            pointer.borrow_mut().down = false;
        }) as Box<dyn FnMut(web::PointerEvent)>);
        _ = w
            .canvas
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
