use crate::clock::{RateListener, SampleClock};
use crate::MIN_TIME;

/// Linear segment generator: ramps from `value` to `target` over `seconds`.
///
/// Arrival is exact: when a step would overshoot, the value clamps to the
/// target, so `done` can test plain equality. The per-sample increment is
/// re-derived whenever the target, the duration, or the sample rate changes.
pub struct Line {
    listener: RateListener,
    value: f32,
    target: f32,
    seconds: f32,
    increment: f32,
}

impl Line {
    pub fn new(clock: &SampleClock) -> Self {
        Self {
            listener: clock.listen(),
            value: 0.0,
            target: 0.0,
            seconds: 1.0,
            increment: 0.0,
        }
    }

    /// Restart the segment: jump to `value` and ramp to `target` over
    /// `seconds`.
    pub fn set(&mut self, value: f32, target: f32, seconds: f32) {
        self.listener.poll();
        self.value = value;
        self.target = target;
        self.seconds = seconds.max(MIN_TIME);
        self.recompute(self.listener.rate());
    }

    /// Ramp from wherever the segment currently is to a new target.
    pub fn set_target(&mut self, target: f32, seconds: f32) {
        self.listener.poll();
        self.target = target;
        self.seconds = seconds.max(MIN_TIME);
        self.recompute(self.listener.rate());
    }

    fn recompute(&mut self, rate: f32) {
        self.increment = (self.target - self.value) / (self.seconds * rate);
    }

    /// Exact arrival at the target.
    pub fn done(&self) -> bool {
        self.value == self.target
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Return the current value, then step toward the target.
    pub fn next(&mut self) -> f32 {
        if let Some(rate) = self.listener.poll() {
            self.recompute(rate);
        }
        let v = self.value;
        if self.value != self.target {
            self.value += self.increment;
            let overshot = if self.increment < 0.0 {
                self.value < self.target
            } else {
                self.value > self.target
            };
            if overshot {
                self.value = self.target;
            }
        }
        v
    }
}

/// Two-stage rise/fall generator with no return path.
///
/// Emits the attack line until it arrives at 1, then the decay line forever.
pub struct AttackDecay {
    attack: Line,
    decay: Line,
}

impl AttackDecay {
    pub fn new(clock: &SampleClock) -> Self {
        Self {
            attack: Line::new(clock),
            decay: Line::new(clock),
        }
    }

    /// Arm both stages: attack 0 to 1 over `rise` seconds, decay 1 to 0 over
    /// `fall` seconds.
    pub fn set(&mut self, rise: f32, fall: f32) {
        self.attack.set(0.0, 1.0, rise);
        self.decay.set(1.0, 0.0, fall);
    }

    pub fn next(&mut self) -> f32 {
        if !self.attack.done() {
            self.attack.next()
        } else {
            self.decay.next()
        }
    }

    pub fn done(&self) -> bool {
        self.attack.done() && self.decay.done()
    }
}
