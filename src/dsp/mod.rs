//! Low-level DSP primitives.
//!
//! Every unit here produces or transforms exactly one sample per call and is
//! allocation-free in its hot path, making it safe to run inside a real-time
//! audio callback. Configuration entry points (`resize`, `configure`,
//! `pluck`) are the only operations that allocate and belong on the control
//! side of the fence.

/// Feedback comb and allpass resonators.
pub mod comb;
/// Circular delay buffer with fractional interpolated reads.
pub mod delay;
/// DC blocker and state-variable filter.
pub mod filter;
/// Linear segment and two-stage rise/fall generators.
pub mod line;
/// Scalar helpers: range wrapping, pitch and gain conversions.
pub mod math;
/// Deterministic, seedable noise.
pub mod noise;
/// Phase accumulators: ramp and edge-trigger timer.
pub mod phase;
/// Wavetable-style clip playback.
pub mod player;
/// Schroeder reverberator.
pub mod reverb;
/// Mass-spring physical oscillator.
pub mod spring;
/// Karplus-Strong plucked string.
pub mod string;
