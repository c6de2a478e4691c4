// Shared tuning constants used by the simulation and both frontends.

// Gain stage
pub const BASE_VOLUME_PER_INSTANCE: f32 = 0.18; // target gain added by each live wave on a voice
pub const MAX_VOICE_GAIN: f32 = 1.0;
pub const GAIN_SMOOTHING: f32 = 0.06; // lerp factor applied once per frame
pub const GAIN_EPSILON: f32 = 0.001; // below this gap the gain snaps to target
pub const GAIN_RAMP_SEC: f32 = 0.05; // ramp used while converging
pub const GAIN_SNAP_RAMP_SEC: f32 = 0.02; // ramp used once converged

// Growth
pub const INITIAL_RADIUS: f32 = 5.0;
pub const GROWTH_MIN: f32 = 0.4 / 8.0; // px per frame
pub const GROWTH_MAX: f32 = 1.2 / 8.0;
pub const PRESS_GROWTH_MULTIPLIER: f32 = 3.0; // holding the pointer speeds every wave up

// Greying
pub const GREY_STEP: u8 = 2; // grey level gained per frame once grey
pub const GREY_HEAD_START: u8 = 10; // applied when a wave first turns grey
pub const GREY_DEATH_THRESHOLD: u8 = 240; // strictly above this the wave dies

// Spawning
pub const AMBIENT_SPAWN_INTERVAL_MS: u64 = 5000;
pub const AMBIENT_SPAWN_MIN: usize = 1;
pub const AMBIENT_SPAWN_MAX: usize = 3; // inclusive
pub const INITIAL_SPAWN_MIN: usize = 3;
pub const INITIAL_SPAWN_MAX: usize = 7; // inclusive

// Colours
pub const UNIQUE_CHANNEL_MIN: f32 = 50.0;
pub const CHANNEL_MAX: f32 = 255.0;
pub const UNIQUE_COLOR_ATTEMPTS: usize = 500;

// Drawing
pub const RING_STROKE: f32 = 3.0;
pub const HALO_RINGS: usize = 4;
pub const HALO_RADIUS_STEP: f32 = 4.0; // px inward per halo ring
pub const HALO_ALPHA_BASE: f32 = 48.0; // out of 255
pub const HALO_ALPHA_STEP: f32 = 8.0;
pub const HALO_STROKE_BASE: f32 = 2.0;
pub const HALO_STROKE_STEP: f32 = 0.2;
pub const GREY_FILL_RGB: [f32; 3] = [70.0, 70.0, 70.0];
pub const BACKGROUND_RGB: [f32; 3] = [0.0, 0.0, 0.0];
