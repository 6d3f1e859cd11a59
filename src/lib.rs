pub mod clock;
pub mod dsp;
pub mod engine; // Block-level rendering and control plumbing
pub mod synth; // The additive pad instrument

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
