use crate::color::Color;
use crate::constants::{
    GREY_DEATH_THRESHOLD, GREY_FILL_RGB, GREY_HEAD_START, GREY_STEP, HALO_ALPHA_BASE,
    HALO_ALPHA_STEP, HALO_RADIUS_STEP, HALO_RINGS, HALO_STROKE_BASE, HALO_STROKE_STEP,
    INITIAL_RADIUS, PRESS_GROWTH_MULTIPLIER, RING_STROKE,
};
use crate::registry::{VoiceId, VoiceRegistry};
use crate::surface::Surface;
use glam::Vec2;
use smallvec::SmallVec;

pub type VoiceList = SmallVec<[VoiceId; 4]>;

/// Lifecycle of a wave. Transitions only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WavePhase {
    Growing,
    Greying,
    Dead,
}

/// A growing circle tied to one or more sound voices.
#[derive(Clone, Debug)]
pub struct Wave {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
    base_growth: f32,
    growth: f32,
    grey: bool,
    grey_level: u8,
    dead: bool,
    voices: VoiceList,
}

impl Wave {
    /// Create a wave and take one instance on every voice in `voices`.
    ///
    /// `voices` may repeat an id; each occurrence counts as one instance and is
    /// released once on death.
    pub fn spawn(
        position: Vec2,
        color: Color,
        base_growth: f32,
        voices: VoiceList,
        registry: &mut VoiceRegistry,
    ) -> Self {
        debug_assert!(!voices.is_empty(), "a wave needs at least one voice");
        for id in &voices {
            registry.add_instance(*id);
        }
        Self {
            position,
            radius: INITIAL_RADIUS,
            color,
            base_growth,
            growth: base_growth,
            grey: false,
            grey_level: 0,
            dead: false,
            voices,
        }
    }

    pub fn update(&mut self, pressing: bool, registry: &mut VoiceRegistry) {
        if !self.grey {
            self.growth = if pressing {
                self.base_growth * PRESS_GROWTH_MULTIPLIER
            } else {
                self.base_growth
            };
            self.radius += self.growth;
        } else {
            self.grey_level = self.grey_level.saturating_add(GREY_STEP);
            if self.grey_level > GREY_DEATH_THRESHOLD && !self.dead {
                for id in &self.voices {
                    registry.remove_instance(*id);
                }
                self.dead = true;
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if !self.grey {
            surface.draw_ring(
                self.position,
                self.radius,
                self.color.with_alpha(255.0),
                RING_STROKE,
            );
            for i in 1..=HALO_RINGS {
                let i = i as f32;
                let r = self.radius - i * HALO_RADIUS_STEP;
                if r <= 0.0 {
                    break;
                }
                surface.draw_ring(
                    self.position,
                    r,
                    self.color.with_alpha(HALO_ALPHA_BASE - i * HALO_ALPHA_STEP),
                    HALO_STROKE_BASE - i * HALO_STROKE_STEP,
                );
            }
        } else {
            let fill = Color::from(GREY_FILL_RGB).with_alpha(self.grey_level as f32);
            surface.draw_filled_disc(self.position, self.radius, fill);
        }
    }

    /// True when `other`'s centre lies strictly inside this wave's radius.
    pub fn contains_center(&self, other: &Wave) -> bool {
        self.contains_point(other.position)
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        self.position.distance(p) < self.radius
    }

    pub fn turn_grey(&mut self) {
        if !self.grey {
            self.grey = true;
            self.grey_level = self.grey_level.saturating_add(GREY_HEAD_START);
        }
    }

    pub fn phase(&self) -> WavePhase {
        if self.dead {
            WavePhase::Dead
        } else if self.grey {
            WavePhase::Greying
        } else {
            WavePhase::Growing
        }
    }

    pub fn is_grey(&self) -> bool {
        self.grey
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn grey_level(&self) -> u8 {
        self.grey_level
    }

    pub fn growth(&self) -> f32 {
        self.growth
    }

    pub fn base_growth(&self) -> f32 {
        self.base_growth
    }

    pub fn voices(&self) -> &[VoiceId] {
        &self.voices
    }
}
