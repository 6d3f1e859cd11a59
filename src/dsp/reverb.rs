use crate::clock::SampleClock;
use crate::dsp::comb::{AllPass, CombFeedback};

/// Schroeder reverberator: four feedback combs in parallel feeding three
/// allpasses in series.
///
/// The delay/gain pairs are fixed literals (13–90 ms, gains 0.70–0.80) with
/// mutually unrelated periods, so the comb echoes interleave into a dense
/// tail instead of piling onto a common resonance. `configure` applies the
/// table at the current sample rate.
pub struct SchroederReverb {
    combs: [CombFeedback; 4],
    allpasses: [AllPass; 3],
}

impl SchroederReverb {
    pub fn new(clock: &SampleClock) -> Self {
        Self {
            combs: [
                CombFeedback::new(clock),
                CombFeedback::new(clock),
                CombFeedback::new(clock),
                CombFeedback::new(clock),
            ],
            allpasses: [
                AllPass::new(clock),
                AllPass::new(clock),
                AllPass::new(clock),
            ],
        }
    }

    /// Size every stage at the current sample rate. Allocates; configuration
    /// only.
    pub fn configure(&mut self) {
        self.combs[0].configure(0.06712, 0.773);
        self.combs[1].configure(0.06404, 0.802);
        self.combs[2].configure(0.08212, 0.753);
        self.combs[3].configure(0.09004, 0.733);
        self.allpasses[0].configure(0.01388, 0.7);
        self.allpasses[1].configure(0.00452, 0.7);
        self.allpasses[2].configure(0.00148, 0.7);
    }

    pub fn process(&mut self, input: f32) -> f32 {
        let mut output = 0.0;
        for comb in &mut self.combs {
            output += comb.process(input);
        }
        for allpass in &mut self.allpasses {
            output = allpass.process(output);
        }
        output
    }
}
