use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Single-pole DC blocker: `y[n] = x[n] - x[n-1] + 0.995 y[n-1]`.
///
/// Removes the offset that delay-based feedback loops accumulate, with a
/// corner low enough to leave the audio band alone.
pub struct DcBlock {
    x1: f32,
    y1: f32,
}

impl DcBlock {
    pub fn new() -> Self {
        Self { x1: 0.0, y1: 0.0 }
    }

    pub fn process(&mut self, input: f32) -> f32 {
        let output = input - self.x1 + 0.995 * self.y1;
        self.y1 = output;
        self.x1 = input;
        output
    }
}

impl Default for DcBlock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResponse {
    LowPass,
    BandPass,
    HighPass,
}

/// Topology-preserving state-variable filter.
///
/// Two trapezoidal integrators give the simultaneous low/band/high taps; the
/// response enum selects which one leaves the filter. Designed for per-sample
/// use: the warped coefficient is cached and recomputed only when the cutoff
/// or the sample rate moves.
pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    cutoff_hz: f32,
    resonance: f32,
    response: FilterResponse,

    g: f32,
    coeff_rate: f32,
}

impl SVFilter {
    pub fn new(response: FilterResponse) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz: 1_000.0,
            resonance: 0.0,
            response,
            g: 0.0,
            coeff_rate: 0.0,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        let mut filter = Self::new(FilterResponse::LowPass);
        filter.set_cutoff(cutoff_hz);
        filter
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        let mut filter = Self::new(FilterResponse::HighPass);
        filter.set_cutoff(cutoff_hz);
        filter
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    /// Clamped to the audible range; out-of-range requests are a control
    /// error, not something to branch on per sample.
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz.clamp(20.0, 20_000.0);
        self.coeff_rate = 0.0; // forces a coefficient recompute
    }

    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance.clamp(0.0, 1.0);
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    fn compute_g(&self, sample_rate: f32) -> f32 {
        // Keep the prewarped frequency below Nyquist regardless of what the
        // cutoff clamp allowed.
        let cutoff = self.cutoff_hz.min(0.45 * sample_rate);
        let wd = TAU * cutoff;
        let wa = (2.0 * sample_rate) * (wd / (2.0 * sample_rate)).tan();
        wa / (2.0 * sample_rate)
    }

    pub fn process(&mut self, sample: f32, sample_rate: f32) -> f32 {
        if sample_rate != self.coeff_rate {
            self.g = self.compute_g(sample_rate);
            self.coeff_rate = sample_rate;
        }
        let g = self.g;
        let k = 2.0 - 2.0 * self.resonance;
        let h = 1.0 / (1.0 + g * (g + k));

        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        match self.response {
            FilterResponse::LowPass => v2,
            FilterResponse::BandPass => v1,
            FilterResponse::HighPass => sample - k * v1 - v2,
        }
    }
}
