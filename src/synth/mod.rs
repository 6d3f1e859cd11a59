//! The additive pad instrument.
//!
//! A bank of detuned harmonics over a just-intonation ratio table, each
//! rendered as a weighted blend of sine, saw and triangle from a shared phase
//! accumulator, then shaped by a free-running ADSR, smoothed by a resonant
//! lowpass and pushed into a hard clip. One call to [`AdditiveSynth::process`]
//! produces exactly one output sample.

/// Chord root table and progression timing.
pub mod chord;
/// Linear ADSR generator.
pub mod envelope;

use std::f32::consts::TAU;

use crate::dsp::filter::SVFilter;
use crate::dsp::noise::Noise;
use crate::synth::envelope::Adsr;

/// Harmonic ratio table: unison plus five just intervals spanning one octave.
const CHORD_RATIOS: [f32; 6] = [
    1.0,       // I
    9.0 / 8.0, // II
    5.0 / 4.0, // III
    3.0 / 2.0, // V
    5.0 / 3.0, // VI
    2.0,       // I, octave up
];

const HARMONIC_AMPLITUDE: f32 = 0.2;
/// Each partial lands within ±1% of its table frequency.
const DETUNE_SPREAD: f32 = 0.01;
/// Per-waveform weight normalization.
const BLEND_SCALE: f32 = 0.33;
/// Scales the summed bank before the envelope to control harmonic buildup.
const HEADROOM: f32 = 0.5;
/// Post-filter make-up gain, followed by the output clip.
const MAKEUP_GAIN: f32 = 9.0;

// Pad envelope: slow fade-in, long fade-out.
const ENV_ATTACK: f32 = 0.8;
const ENV_DECAY: f32 = 0.3;
const ENV_SUSTAIN: f32 = 0.6;
const ENV_RELEASE: f32 = 1.2;

const DEFAULT_CUTOFF_HZ: f32 = 2_000.0;
const DEFAULT_RESONANCE: f32 = 0.7;

const LFO_SPEED: f32 = 0.1;
const LFO_DEPTH: f32 = 0.002;

/// One partial of the bank.
#[derive(Debug, Clone, Copy)]
pub struct Harmonic {
    pub frequency: f32,
    pub amplitude: f32,
    pub phase: f32,
}

pub struct AdditiveSynth {
    harmonics: Vec<Harmonic>,
    detune: Noise,

    envelope: Adsr,
    filter: SVFilter,

    sine_mix: f32,
    saw_mix: f32,
    tri_mix: f32,

    lfo_phase: f32,
    lfo_depth: f32,
}

impl AdditiveSynth {
    /// `detune` supplies the per-harmonic detune offsets; seed it for
    /// reproducible chords. The envelope triggers here, once — the pad has
    /// no note-off.
    pub fn new(detune: Noise) -> Self {
        let mut envelope = Adsr::new(ENV_ATTACK, ENV_DECAY, ENV_SUSTAIN, ENV_RELEASE);
        envelope.note_on();

        let mut filter = SVFilter::lowpass(DEFAULT_CUTOFF_HZ);
        filter.set_resonance(DEFAULT_RESONANCE);

        Self {
            harmonics: Vec::with_capacity(CHORD_RATIOS.len()),
            detune,
            envelope,
            filter,
            sine_mix: 0.3,
            saw_mix: 0.5,
            tri_mix: 0.2,
            lfo_phase: 0.0,
            lfo_depth: LFO_DEPTH,
        }
    }

    /// Rebuild the bank on a new root. The harmonic set is replaced
    /// wholesale; phases restart at zero. Stays within the capacity reserved
    /// at construction, so no allocation happens here.
    pub fn set_chord(&mut self, base_freq: f32) {
        self.harmonics.clear();
        for ratio in CHORD_RATIOS {
            let detune_factor = 1.0 + self.detune.next() * DETUNE_SPREAD;
            self.harmonics.push(Harmonic {
                frequency: base_freq * ratio * detune_factor,
                amplitude: HARMONIC_AMPLITUDE,
                phase: 0.0,
            });
        }
    }

    /// Waveform blend weights. No normalization is enforced; the control
    /// layer owns the ranges.
    pub fn set_mix(&mut self, sine: f32, saw: f32, tri: f32) {
        self.sine_mix = sine;
        self.saw_mix = saw;
        self.tri_mix = tri;
    }

    pub fn set_filter_cutoff(&mut self, hz: f32) {
        self.filter.set_cutoff(hz);
    }

    pub fn set_mod_depth(&mut self, depth: f32) {
        self.lfo_depth = depth;
    }

    pub fn harmonics(&self) -> &[Harmonic] {
        &self.harmonics
    }

    pub fn envelope_level(&self) -> f32 {
        self.envelope.level()
    }

    /// Produce the next output sample, guaranteed inside `[-1, 1]`.
    pub fn process(&mut self, sample_rate: f32) -> f32 {
        let lfo = (self.lfo_phase * TAU).sin() * self.lfo_depth;
        self.lfo_phase += LFO_SPEED / sample_rate;
        if self.lfo_phase >= 1.0 {
            self.lfo_phase -= 1.0;
        }

        let mut sample = 0.0;
        for h in &mut self.harmonics {
            h.phase += h.frequency / sample_rate;
            if h.phase >= 1.0 {
                h.phase -= 1.0;
            }

            // The sine hears the LFO through the instantaneous frequency;
            // saw and tri read the raw phase.
            let modulated = h.frequency * (1.0 + lfo);
            let sine = (h.phase * TAU * modulated).sin();
            let ramp = h.phase - (h.phase + 0.5).floor();
            let saw = 2.0 * ramp;
            let tri = (4.0 * ramp - 1.0).abs();

            let blended = self.sine_mix * BLEND_SCALE * sine
                + self.saw_mix * BLEND_SCALE * saw
                + self.tri_mix * BLEND_SCALE * tri;
            sample += blended * h.amplitude;
        }

        sample *= HEADROOM;
        sample *= self.envelope.next_sample(sample_rate);
        sample = self.filter.process(sample, sample_rate);
        sample *= MAKEUP_GAIN;
        sample.clamp(-1.0, 1.0)
    }
}
