use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use wavefield_core::{Rgba, Surface};
use web_sys as web;

/// Canvas 2D backend for the sketch. Coordinates are backing-store pixels.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self { canvas, ctx })
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    #[allow(deprecated)]
    fn clear(&mut self, color: Rgba) {
        let size = self.size();
        self.ctx.set_fill_style(&JsValue::from_str(&color.to_css()));
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    #[allow(deprecated)]
    fn draw_ring(&mut self, center: Vec2, radius: f32, stroke: Rgba, stroke_width: f32) {
        self.circle_path(center, radius);
        self.ctx.set_stroke_style(&JsValue::from_str(&stroke.to_css()));
        self.ctx.set_line_width(stroke_width as f64);
        self.ctx.stroke();
    }

    #[allow(deprecated)]
    fn draw_filled_disc(&mut self, center: Vec2, radius: f32, fill: Rgba) {
        self.circle_path(center, radius);
        self.ctx.set_fill_style(&JsValue::from_str(&fill.to_css()));
        self.ctx.fill();
    }
}
