//! Block-level orchestration.
//!
//! The host hands this layer a sample rate and asks for blocks of samples;
//! everything per-sample lives below in `dsp` and `synth`. Control values
//! arrive either directly through [`PadEngine::set_controls`] or from another
//! thread through a wait-free message ring, and are sampled once per block —
//! there is no sample-accurate automation here.

#[cfg(feature = "rtrb")]
use rtrb::Consumer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::clock::SampleClock;
use crate::dsp::filter::DcBlock;
use crate::dsp::math::dbtoa;
use crate::dsp::noise::Noise;
use crate::dsp::player::ClipPlayer;
use crate::dsp::reverb::SchroederReverb;
use crate::synth::chord::ChordCycle;
use crate::synth::AdditiveSynth;
use crate::MAX_BLOCK_SIZE;

/// Engine construction parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Seed for the detune noise; a fixed seed makes runs reproducible.
    pub seed: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { seed: 1 }
    }
}

/// Named, ranged control values sampled once per block.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct EngineControls {
    /// Output gain in dB, -60..0.
    pub gain_db: f32,
    /// Waveform blend weights, each 0..1.
    pub sine_mix: f32,
    pub saw_mix: f32,
    pub tri_mix: f32,
    /// Smoothing-filter cutoff in Hz.
    pub filter_cutoff_hz: f32,
    /// LFO pitch-modulation depth.
    pub mod_depth: f32,
    /// Seconds between chord changes, 3..9.
    pub chord_rate_secs: f32,
    /// Wet mix for the reverb send, 0..1.
    pub reverb_mix: f32,
}

impl Default for EngineControls {
    fn default() -> Self {
        Self {
            gain_db: -60.0,
            sine_mix: 0.3,
            saw_mix: 0.5,
            tri_mix: 0.2,
            filter_cutoff_hz: 2_000.0,
            mod_depth: 0.002,
            chord_rate_secs: 5.0,
            reverb_mix: 0.0,
        }
    }
}

/// Control updates delivered from a non-audio thread.
#[derive(Debug, Copy, Clone)]
pub enum ControlMessage {
    GainDb(f32),
    WaveMix { sine: f32, saw: f32, tri: f32 },
    FilterCutoff(f32),
    ModDepth(f32),
    ChordRate(f32),
    ReverbMix(f32),
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

/// The generative pad instrument: additive bank on a cycling chord
/// progression, reverb send, DC hygiene and output gain, rendered dual-mono
/// block by block.
pub struct PadEngine {
    clock: SampleClock,
    synth: AdditiveSynth,
    reverb: SchroederReverb,
    dc_block: DcBlock,
    chords: ChordCycle,
    controls: EngineControls,
    clip: Option<ClipPlayer>,
    sample_rate: f32,
}

impl PadEngine {
    pub fn new(config: EngineConfig) -> Self {
        let clock = SampleClock::new();
        let synth = AdditiveSynth::new(Noise::new(config.seed));
        let reverb = SchroederReverb::new(&clock);
        Self {
            clock,
            synth,
            reverb,
            dc_block: DcBlock::new(),
            chords: ChordCycle::new(),
            controls: EngineControls::default(),
            clip: None,
            sample_rate: 1.0,
        }
    }

    /// Host callback for stream (re)configuration: broadcast the rate, size
    /// the reverb, restart the progression on its first root. Allocates;
    /// call only while rendering is stopped.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.clock.set_rate(sample_rate);
        self.reverb.configure();
        self.chords.reset();
        self.synth.set_chord(self.chords.root());
    }

    /// The clock shared with every unit this engine owns; lend it to any
    /// externally constructed unit that should follow the same stream.
    pub fn clock(&self) -> &SampleClock {
        &self.clock
    }

    pub fn controls(&self) -> &EngineControls {
        &self.controls
    }

    pub fn set_controls(&mut self, controls: EngineControls) {
        self.controls = controls;
        self.apply_controls();
    }

    fn apply_controls(&mut self) {
        let c = self.controls;
        self.synth.set_mix(
            c.sine_mix.clamp(0.0, 1.0),
            c.saw_mix.clamp(0.0, 1.0),
            c.tri_mix.clamp(0.0, 1.0),
        );
        self.synth.set_filter_cutoff(c.filter_cutoff_hz);
        self.synth.set_mod_depth(c.mod_depth.clamp(0.0, 1.0));
        self.chords.set_rate(c.chord_rate_secs.clamp(3.0, 9.0));
    }

    /// Drain pending control messages. Wait-free; call at block boundaries.
    pub fn drain_messages(&mut self, rx: &mut impl MessageReceiver) {
        while let Some(msg) = rx.pop() {
            match msg {
                ControlMessage::GainDb(db) => self.controls.gain_db = db.clamp(-60.0, 0.0),
                ControlMessage::WaveMix { sine, saw, tri } => {
                    self.controls.sine_mix = sine;
                    self.controls.saw_mix = saw;
                    self.controls.tri_mix = tri;
                }
                ControlMessage::FilterCutoff(hz) => self.controls.filter_cutoff_hz = hz,
                ControlMessage::ModDepth(depth) => self.controls.mod_depth = depth,
                ControlMessage::ChordRate(secs) => self.controls.chord_rate_secs = secs,
                ControlMessage::ReverbMix(mix) => self.controls.reverb_mix = mix,
            }
        }
        self.apply_controls();
    }

    /// Hand over an externally decoded mono clip for auxiliary playback.
    /// Load path only; never call while rendering.
    pub fn load_clip(&mut self, samples: &[f32]) {
        let mut player = ClipPlayer::new();
        for &sample in samples {
            player.add_sample(sample);
        }
        self.clip = Some(player);
    }

    pub fn clip(&self) -> Option<&ClipPlayer> {
        self.clip.as_ref()
    }

    pub fn current_root(&self) -> f32 {
        self.chords.root()
    }

    /// No look-ahead buffering anywhere in the core.
    pub fn tail_length_seconds(&self) -> f32 {
        0.0
    }

    pub fn latency_samples(&self) -> usize {
        0
    }

    /// Render one block dual-mono. Both channels must be the same length, at
    /// most [`MAX_BLOCK_SIZE`]; `prepare` must have established the rate.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        assert_eq!(left.len(), right.len());
        debug_assert!(left.len() <= MAX_BLOCK_SIZE);
        debug_assert!(self.sample_rate > 0.0);

        let block_seconds = left.len() as f32 / self.sample_rate;
        if let Some(root) = self.chords.advance(block_seconds) {
            self.synth.set_chord(root);
        }

        let gain = dbtoa(self.controls.gain_db);
        let wet = self.controls.reverb_mix.clamp(0.0, 1.0);

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let dry = self.synth.process(self.sample_rate);
            let sample = if wet > 0.0 {
                dry * (1.0 - wet) + self.reverb.process(dry) * wet
            } else {
                dry
            };
            let sample = (self.dc_block.process(sample) * gain).clamp(-1.0, 1.0);
            *l = sample;
            *r = sample;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared(seed: i32, rate: f32) -> PadEngine {
        let mut engine = PadEngine::new(EngineConfig { seed });
        engine.prepare(rate);
        engine
    }

    #[test]
    fn renders_audible_bounded_output() {
        let mut engine = prepared(1, 8_000.0);
        engine.set_controls(EngineControls {
            gain_db: 0.0,
            ..EngineControls::default()
        });

        let mut left = [0.0f32; 512];
        let mut right = [0.0f32; 512];
        let mut energy = 0.0;
        // Two seconds, enough to clear the attack.
        for _ in 0..32 {
            engine.process_block(&mut left, &mut right);
            for (l, r) in left.iter().zip(right.iter()) {
                assert_eq!(l, r, "channels must be duplicates");
                assert!(l.abs() <= 1.0, "output out of range: {l}");
                energy += l * l;
            }
        }
        assert!(energy > 0.1, "engine should be audible, energy {energy}");
    }

    #[test]
    fn default_gain_is_quiet_but_not_silent() {
        let mut engine = prepared(1, 8_000.0);
        let mut left = [0.0f32; 256];
        let mut right = [0.0f32; 256];
        let mut peak = 0.0f32;
        for _ in 0..64 {
            engine.process_block(&mut left, &mut right);
            peak = left.iter().fold(peak, |acc, s| acc.max(s.abs()));
        }
        assert!(peak > 0.0);
        // -60 dB on a clipped signal stays around a thousandth.
        assert!(peak < 0.01, "default gain too hot: {peak}");
    }

    #[test]
    fn chord_progression_advances_during_playback() {
        let mut engine = prepared(1, 8_000.0);
        engine.set_controls(EngineControls {
            gain_db: 0.0,
            chord_rate_secs: 3.0,
            ..EngineControls::default()
        });
        let first_root = engine.current_root();

        let mut left = [0.0f32; 512];
        let mut right = [0.0f32; 512];
        // 3.5 chord-clock seconds = 21 wall seconds at 8 kHz.
        let blocks = (22.0 * 8_000.0 / 512.0) as usize;
        for _ in 0..blocks {
            engine.process_block(&mut left, &mut right);
        }
        assert_ne!(engine.current_root(), first_root);
    }

    #[test]
    fn reverb_send_changes_the_output() {
        let mut dry_engine = prepared(1, 8_000.0);
        let mut wet_engine = prepared(1, 8_000.0);
        dry_engine.set_controls(EngineControls {
            gain_db: 0.0,
            ..EngineControls::default()
        });
        wet_engine.set_controls(EngineControls {
            gain_db: 0.0,
            reverb_mix: 0.4,
            ..EngineControls::default()
        });

        let mut dl = [0.0f32; 512];
        let mut dr = [0.0f32; 512];
        let mut wl = [0.0f32; 512];
        let mut wr = [0.0f32; 512];
        let mut diverged = false;
        for _ in 0..32 {
            dry_engine.process_block(&mut dl, &mut dr);
            wet_engine.process_block(&mut wl, &mut wr);
            if dl.iter().zip(wl.iter()).any(|(a, b)| a != b) {
                diverged = true;
            }
            for s in wl.iter() {
                assert!(s.is_finite());
            }
        }
        assert!(diverged, "reverb send had no effect");
    }

    #[test]
    fn reports_zero_tail_and_latency() {
        let engine = PadEngine::new(EngineConfig::default());
        assert_eq!(engine.tail_length_seconds(), 0.0);
        assert_eq!(engine.latency_samples(), 0);
    }

    #[test]
    fn loads_a_clip_for_playback() {
        let mut engine = PadEngine::new(EngineConfig::default());
        assert!(engine.clip().is_none());

        engine.load_clip(&[0.0, 0.5, 1.0, 0.5]);
        let clip = engine.clip().expect("clip should be loaded");
        assert_eq!(clip.len(), 4);
        assert_eq!(clip.process(0.25), 0.5);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn drains_control_messages_before_rendering() {
        let (mut tx, mut rx) = rtrb::RingBuffer::<ControlMessage>::new(16);
        let mut engine = prepared(1, 8_000.0);

        tx.push(ControlMessage::GainDb(-6.0)).unwrap();
        tx.push(ControlMessage::FilterCutoff(500.0)).unwrap();
        tx.push(ControlMessage::ChordRate(4.0)).unwrap();
        engine.drain_messages(&mut rx);

        assert_eq!(engine.controls().gain_db, -6.0);
        assert_eq!(engine.controls().filter_cutoff_hz, 500.0);
        assert_eq!(engine.controls().chord_rate_secs, 4.0);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn message_gain_is_clamped_to_range() {
        let (mut tx, mut rx) = rtrb::RingBuffer::<ControlMessage>::new(4);
        let mut engine = prepared(1, 8_000.0);

        tx.push(ControlMessage::GainDb(12.0)).unwrap();
        engine.drain_messages(&mut rx);
        assert_eq!(engine.controls().gain_db, 0.0);
    }
}
