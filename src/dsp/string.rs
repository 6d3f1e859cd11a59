use crate::clock::{RateListener, SampleClock};
use crate::dsp::delay::{DelayLine, History};
use crate::dsp::noise::Noise;

/// Karplus-Strong plucked string.
///
/// A delay loop seeded with a burst of noise; every pass through the loop
/// blends the delayed sample with a one-sample history, so high frequencies
/// die first and the burst rings down into a harmonic tone whose pitch is set
/// entirely by the delay length.
pub struct KarplusStrong {
    listener: RateListener,
    delay_line: DelayLine,
    history: History,
    excitation: Noise,
    beta: f32,
    decay: f32,
    delay_samples: f32,
}

impl KarplusStrong {
    /// `excitation` supplies the pluck burst; seed it for reproducible
    /// plucks.
    pub fn new(clock: &SampleClock, excitation: Noise) -> Self {
        Self {
            listener: clock.listen(),
            delay_line: DelayLine::new(),
            history: History::new(),
            excitation,
            beta: 0.0,
            decay: 1.0,
            delay_samples: 0.0,
        }
    }

    /// Excite the string at `hertz`: size the loop to one period and fill it
    /// with noise in `[-1, 1]`. `decay` scales each pass through the loop
    /// (1.0 leaves the loss to the `beta` blend alone). Allocates;
    /// configuration only.
    pub fn pluck(&mut self, hertz: f32, decay: f32, beta: f32) {
        self.listener.poll();
        let rate = self.listener.rate();
        self.beta = beta;
        self.decay = decay;
        self.delay_samples = rate / hertz;
        self.delay_line.resize(1 + (rate / hertz) as usize);
        for _ in 0..self.delay_line.len() {
            self.delay_line.write(self.excitation.next());
        }
    }

    /// The next sample of the string. An unplucked string is silent.
    pub fn next(&mut self) -> f32 {
        if self.delay_line.is_empty() {
            return 0.0;
        }
        let f = self.delay_line.read(self.delay_samples);
        let v = self.decay * (f * self.beta + (1.0 - self.beta) * self.history.next(f));
        self.delay_line.write(v);
        v
    }
}
