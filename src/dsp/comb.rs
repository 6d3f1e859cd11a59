use crate::clock::{RateListener, SampleClock};
use crate::dsp::delay::DelayLine;

/// Delay line with feedback: evenly spaced echoes at the configured period.
///
/// Stable only for `|feedback| < 1`; no clamping happens here — range
/// policing belongs to the control layer.
pub struct CombFeedback {
    listener: RateListener,
    delay_line: DelayLine,
    seconds: f32,
    delay_samples: f32,
    feedback: f32,
}

impl CombFeedback {
    pub fn new(clock: &SampleClock) -> Self {
        Self {
            listener: clock.listen(),
            delay_line: DelayLine::new(),
            seconds: 0.0,
            delay_samples: 0.0,
            feedback: 0.0,
        }
    }

    /// Size the internal delay for `seconds` at the current sample rate.
    /// Allocates; configuration only.
    pub fn configure(&mut self, seconds: f32, feedback: f32) {
        self.listener.poll();
        self.seconds = seconds;
        self.feedback = feedback;
        self.delay_samples = seconds * self.listener.rate();
        self.delay_line.resize(1 + self.delay_samples as usize);
    }

    pub fn process(&mut self, input: f32) -> f32 {
        if let Some(rate) = self.listener.poll() {
            self.rederive_lag(rate);
        }
        let output = input + self.feedback * self.delay_line.read(self.delay_samples);
        self.delay_line.write(output);
        output
    }

    // A rate change re-derives the lag from the stored seconds but cannot
    // grow the buffer mid-stream; the lag clamps to the configure-time
    // capacity until the owner reconfigures.
    fn rederive_lag(&mut self, rate: f32) {
        let max_lag = self.delay_line.len().saturating_sub(1) as f32;
        self.delay_samples = (self.seconds * rate).min(max_lag);
    }
}

/// First-order allpass via one delay line: flat magnitude response, smeared
/// phase. The diffusion stage of the reverb.
pub struct AllPass {
    listener: RateListener,
    delay_line: DelayLine,
    seconds: f32,
    delay_samples: f32,
    gain: f32,
}

impl AllPass {
    pub fn new(clock: &SampleClock) -> Self {
        Self {
            listener: clock.listen(),
            delay_line: DelayLine::new(),
            seconds: 0.0,
            delay_samples: 0.0,
            gain: 0.0,
        }
    }

    /// Size the internal delay for `seconds` at the current sample rate.
    /// Allocates; configuration only.
    pub fn configure(&mut self, seconds: f32, gain: f32) {
        self.listener.poll();
        self.seconds = seconds;
        self.gain = gain;
        self.delay_samples = seconds * self.listener.rate();
        self.delay_line.resize(1 + self.delay_samples as usize);
    }

    pub fn process(&mut self, input: f32) -> f32 {
        if let Some(rate) = self.listener.poll() {
            let max_lag = self.delay_line.len().saturating_sub(1) as f32;
            self.delay_samples = (self.seconds * rate).min(max_lag);
        }
        let read = self.delay_line.read(self.delay_samples);
        let v = input - self.gain * read;
        self.delay_line.write(v);
        read + self.gain * v
    }
}
