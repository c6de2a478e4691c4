use crate::color::{unique_color, Color};
use crate::constants::{
    AMBIENT_SPAWN_INTERVAL_MS, AMBIENT_SPAWN_MAX, AMBIENT_SPAWN_MIN, GROWTH_MAX, GROWTH_MIN,
    INITIAL_SPAWN_MAX, INITIAL_SPAWN_MIN,
};
use crate::input::{InputController, PressAction};
use crate::registry::VoiceRegistry;
use crate::surface::Surface;
use crate::wave::{VoiceList, Wave};
use glam::Vec2;
use rand::prelude::*;
use smallvec::smallvec;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct FieldParams {
    pub growth_min: f32,
    pub growth_max: f32,
    pub spawn_interval: Duration,
    pub ambient_spawn_min: usize,
    pub ambient_spawn_max: usize,
    pub initial_spawn_min: usize,
    pub initial_spawn_max: usize,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            growth_min: GROWTH_MIN,
            growth_max: GROWTH_MAX,
            spawn_interval: Duration::from_millis(AMBIENT_SPAWN_INTERVAL_MS),
            ambient_spawn_min: AMBIENT_SPAWN_MIN,
            ambient_spawn_max: AMBIENT_SPAWN_MAX,
            initial_spawn_min: INITIAL_SPAWN_MIN,
            initial_spawn_max: INITIAL_SPAWN_MAX,
        }
    }
}

/// The live waves plus the ambient spawn clock.
pub struct WaveField {
    waves: Vec<Wave>,
    params: FieldParams,
    bounds: Vec2,
    since_spawn: Duration,
    rng: StdRng,
}

impl WaveField {
    pub fn new(params: FieldParams, bounds: Vec2, seed: u64) -> Self {
        Self {
            waves: Vec::new(),
            params,
            bounds,
            since_spawn: Duration::ZERO,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Startup population: a random handful of waves at random positions.
    pub fn populate(&mut self, registry: &mut VoiceRegistry) -> usize {
        let count = self.spawn_count(self.params.initial_spawn_min, self.params.initial_spawn_max);
        self.spawn_random(count, registry);
        log::info!("[field] initial spawn of {count} waves");
        count
    }

    /// One frame: update and draw, smooth voices, grey scan, evict, ambient spawn.
    pub fn tick(
        &mut self,
        dt: Duration,
        pressing: bool,
        registry: &mut VoiceRegistry,
        surface: &mut dyn Surface,
    ) {
        for wave in self.waves.iter_mut() {
            wave.update(pressing, registry);
            wave.draw(surface);
        }
        registry.update_volumes();
        self.grey_scan();
        self.evict_dead();
        self.advance_spawn_timer(dt, registry);
    }

    /// Grey every pair of still-growing waves that contain each other's centre.
    ///
    /// Returns the number of pairs that turned grey.
    pub fn grey_scan(&mut self) -> usize {
        let mut pairs = 0;
        let n = self.waves.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (&self.waves[i], &self.waves[j]);
                if a.is_grey() || b.is_grey() {
                    continue;
                }
                if a.contains_center(b) && b.contains_center(a) {
                    self.waves[i].turn_grey();
                    self.waves[j].turn_grey();
                    pairs += 1;
                }
            }
        }
        pairs
    }

    /// Drop every wave marked dead. Their voices were already released.
    pub fn evict_dead(&mut self) -> usize {
        let before = self.waves.len();
        self.waves.retain(|w| !w.is_dead());
        before - self.waves.len()
    }

    /// Advance the ambient clock; spawns a small batch when it runs past the
    /// interval. Returns how many waves were spawned.
    pub fn advance_spawn_timer(&mut self, dt: Duration, registry: &mut VoiceRegistry) -> usize {
        self.since_spawn += dt;
        if self.since_spawn <= self.params.spawn_interval {
            return 0;
        }
        let count = self.spawn_count(self.params.ambient_spawn_min, self.params.ambient_spawn_max);
        self.spawn_random(count, registry);
        self.since_spawn = Duration::ZERO;
        log::info!("[field] ambient spawn of {count} (live={})", self.waves.len());
        count
    }

    pub fn handle_pointer_press(
        &mut self,
        point: Vec2,
        registry: &mut VoiceRegistry,
    ) -> PressAction {
        let action = InputController::classify(&self.waves, point);
        match &action {
            PressAction::Merge { indices, color } => {
                for &i in indices {
                    self.waves[i].turn_grey();
                }
                let mut voices = VoiceList::new();
                for &i in indices {
                    if let Some(id) = registry.lookup(self.waves[i].color.key()) {
                        voices.push(id);
                    }
                }
                if voices.is_empty() {
                    log::warn!(
                        "[press] no parent voice registered; using bucket {}",
                        color.key()
                    );
                    voices.push(registry.voice_for(color.key()));
                }
                log::info!(
                    "[press] merge of {} waves at ({:.0},{:.0}) -> {}",
                    indices.len(),
                    point.x,
                    point.y,
                    color.key()
                );
                self.push_wave(point, *color, voices, registry);
            }
            PressAction::Spawn => {
                self.spawn_at(point, registry);
            }
        }
        action
    }

    /// Spawn one wave at `position` with a fresh unique colour.
    pub fn spawn_at(&mut self, position: Vec2, registry: &mut VoiceRegistry) -> &Wave {
        let color = unique_color(&mut self.rng, self.waves.iter().map(|w| &w.color));
        self.spawn_with_color(position, color, registry)
    }

    /// Spawn one wave with an explicit colour on the voice for its bucket.
    pub fn spawn_with_color(
        &mut self,
        position: Vec2,
        color: Color,
        registry: &mut VoiceRegistry,
    ) -> &Wave {
        let voice = registry.voice_for(color.key());
        self.push_wave(position, color, smallvec![voice], registry)
    }

    fn spawn_random(&mut self, count: usize, registry: &mut VoiceRegistry) {
        for _ in 0..count {
            let p = self.random_position();
            self.spawn_at(p, registry);
        }
    }

    fn push_wave(
        &mut self,
        position: Vec2,
        color: Color,
        voices: VoiceList,
        registry: &mut VoiceRegistry,
    ) -> &Wave {
        let (lo, hi) = (self.params.growth_min, self.params.growth_max);
        let growth = if lo < hi {
            self.rng.gen_range(lo..hi)
        } else {
            lo
        };
        self.waves.push(Wave::spawn(position, color, growth, voices, registry));
        &self.waves[self.waves.len() - 1]
    }

    /// Uniform in `min..=max`; an inverted range collapses to `min`.
    fn spawn_count(&mut self, min: usize, max: usize) -> usize {
        self.rng.gen_range(min..=max.max(min))
    }

    fn random_position(&mut self) -> Vec2 {
        let w = self.bounds.x.max(1.0);
        let h = self.bounds.y.max(1.0);
        Vec2::new(self.rng.gen_range(0.0..w), self.rng.gen_range(0.0..h))
    }

    pub fn set_bounds(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn waves_mut(&mut self) -> &mut [Wave] {
        &mut self.waves
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    pub fn since_spawn(&self) -> Duration {
        self.since_spawn
    }
}
