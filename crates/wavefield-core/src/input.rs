//! Pointer handling: a press either merges the waves under it or spawns a
//! fresh one.

use crate::color::Color;
use crate::wave::Wave;
use glam::Vec2;

/// What a pointer press at some point should do to the field.
#[derive(Clone, Debug, PartialEq)]
pub enum PressAction {
    /// Two or more waves contain the point: grey them all and spawn one wave
    /// with their mean colour that reuses their voices.
    Merge { indices: Vec<usize>, color: Color },
    /// Zero or one wave contains the point: spawn a wave with a fresh colour.
    Spawn,
}

/// Sampled pointer state for the frame loop.
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
}

pub struct InputController;

impl InputController {
    /// Indices of every wave whose area strictly contains `point`.
    pub fn waves_under(waves: &[Wave], point: Vec2) -> Vec<usize> {
        waves
            .iter()
            .enumerate()
            .filter(|(_, w)| w.contains_point(point))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn classify(waves: &[Wave], point: Vec2) -> PressAction {
        let indices = Self::waves_under(waves, point);
        if indices.len() > 1 {
            let color = Color::average(indices.iter().map(|&i| &waves[i].color));
            if let Some(color) = color {
                return PressAction::Merge { indices, color };
            }
        }
        PressAction::Spawn
    }
}
