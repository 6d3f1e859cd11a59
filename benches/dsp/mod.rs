mod delay;
mod line;
mod reverb;
mod synth;

pub use delay::bench_delay;
pub use line::bench_line;
pub use reverb::bench_reverb;
pub use synth::bench_synth;
