pub mod audio;
pub mod color;
pub mod constants;
pub mod field;
pub mod input;
pub mod registry;
pub mod sketch;
pub mod surface;
pub mod voice;
pub mod wave;

pub use audio::*;
pub use color::*;
pub use constants::*;
pub use field::*;
pub use input::*;
pub use registry::*;
pub use sketch::*;
pub use surface::*;
pub use voice::*;
pub use wave::*;

// Instanced circle shader for GPU frontends
pub static CIRCLES_WGSL: &str = include_str!("../../shaders/circles.wgsl");
