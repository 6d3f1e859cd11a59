use crate::dsp::math::wrap;

/// Wavetable-style playback of a loaded clip, indexed by normalized phase.
///
/// The clip is loaded once, up front, through `add_sample`; playback then
/// reads it at any rate by sweeping a phase in `[0, 1)` (typically from a
/// `Ramp`). An empty player plays silence — expected transient state while
/// the host is still loading.
pub struct ClipPlayer {
    data: Vec<f32>,
}

impl ClipPlayer {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Append one sample. Load path only; never call while rendering.
    pub fn add_sample(&mut self, sample: f32) {
        self.data.push(sample);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Interpolated lookup at `phase` in `[0, 1)`; the tail interpolates
    /// back around to the first sample.
    pub fn process(&self, phase: f32) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let len = self.data.len();
        let index = wrap(phase * len as f32, len as f32, 0.0);
        let floor = index.floor();
        let i = (floor as usize) % len;
        let j = (i + 1) % len;
        let t = index - floor;
        self.data[i] * (1.0 - t) + self.data[j] * t
    }
}

impl Default for ClipPlayer {
    fn default() -> Self {
        Self::new()
    }
}
