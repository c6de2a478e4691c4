use crate::audio::{AssetError, SampleBank};
use crate::color::Color;
use crate::constants::BACKGROUND_RGB;
use crate::field::{FieldParams, WaveField};
use crate::input::PressAction;
use crate::registry::VoiceRegistry;
use crate::surface::Surface;
use crate::voice::VoiceParams;
use glam::Vec2;
use std::time::Duration;

/// Top-level owner of the field and its voices. Frontends build one at
/// startup and drive it from their frame and pointer callbacks.
pub struct Sketch {
    pub field: WaveField,
    pub voices: VoiceRegistry,
}

impl Sketch {
    pub fn new(
        bank: Box<dyn SampleBank>,
        voice_params: VoiceParams,
        field_params: FieldParams,
        canvas_size: Vec2,
        seed: u64,
    ) -> Result<Self, AssetError> {
        // Independent streams for layout and sample picks
        let mix = |i: u64| seed ^ i.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let voices = VoiceRegistry::new(bank, voice_params, mix(1))?;
        let field = WaveField::new(field_params, canvas_size, mix(2));
        Ok(Self { field, voices })
    }

    /// Build with default tuning and run the startup spawn.
    pub fn start(
        bank: Box<dyn SampleBank>,
        canvas_size: Vec2,
        seed: u64,
    ) -> Result<Self, AssetError> {
        let mut sketch = Self::new(
            bank,
            VoiceParams::default(),
            FieldParams::default(),
            canvas_size,
            seed,
        )?;
        sketch.populate();
        Ok(sketch)
    }

    pub fn populate(&mut self) -> usize {
        self.field.populate(&mut self.voices)
    }

    /// Clear the surface and advance one frame.
    pub fn frame(&mut self, dt: Duration, pressing: bool, surface: &mut dyn Surface) {
        self.field.set_bounds(surface.size());
        surface.clear(Color::from(BACKGROUND_RGB).with_alpha(255.0));
        self.field.tick(dt, pressing, &mut self.voices, surface);
    }

    pub fn pointer_pressed(&mut self, x: f32, y: f32) -> PressAction {
        self.field.handle_pointer_press(Vec2::new(x, y), &mut self.voices)
    }

    pub fn resize(&mut self, canvas_size: Vec2) {
        self.field.set_bounds(canvas_size);
    }

    pub fn wave_count(&self) -> usize {
        self.field.len()
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }
}
