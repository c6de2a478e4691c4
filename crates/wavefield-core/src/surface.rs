use crate::color::Rgba;
use glam::Vec2;

/// Immediate-mode drawing target, in canvas pixels.
pub trait Surface {
    /// Current canvas size. Resizes are passive: waves keep their positions.
    fn size(&self) -> Vec2;
    fn clear(&mut self, color: Rgba);
    fn draw_ring(&mut self, center: Vec2, radius: f32, stroke: Rgba, stroke_width: f32);
    fn draw_filled_disc(&mut self, center: Vec2, radius: f32, fill: Rgba);
}
