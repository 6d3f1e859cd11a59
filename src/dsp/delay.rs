use crate::dsp::math::wrap;

/// Circular sample store with fractional interpolated reads.
///
/// `resize` is the only operation that allocates; it belongs to
/// configuration, never the audio thread. Reading or writing before the
/// buffer has been sized is a contract violation, caught by debug
/// assertions rather than branched around in the hot path.
pub struct DelayLine {
    data: Vec<f32>,
    write: usize,
}

impl DelayLine {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            write: 0,
        }
    }

    /// Allocate `len` zeroed samples and reset the write cursor.
    pub fn resize(&mut self, len: usize) {
        self.data.clear();
        self.data.resize(len, 0.0);
        self.write = 0;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Store one sample at the cursor and advance it modulo capacity.
    pub fn write(&mut self, sample: f32) {
        debug_assert!(!self.data.is_empty(), "write to an unsized delay line");
        self.data[self.write] = sample;
        self.write = (self.write + 1) % self.data.len();
    }

    /// Read `lag` samples behind the write cursor, linearly interpolating
    /// between the two bracketing stored samples. `read(1.0)` is the most
    /// recent write.
    pub fn read(&self, lag: f32) -> f32 {
        debug_assert!(!self.data.is_empty(), "read from an unsized delay line");
        let len = self.data.len();
        let index = wrap(self.write as f32 - lag, len as f32, 0.0);
        let floor = index.floor();
        let i = (floor as usize) % len;
        let j = (i + 1) % len;
        let t = index - floor;
        self.data[i] * (1.0 - t) + self.data[j] * t
    }
}

impl Default for DelayLine {
    fn default() -> Self {
        Self::new()
    }
}

/// One-sample delay: returns the previous input, stores the current one.
pub struct History {
    previous: f32,
}

impl History {
    pub fn new() -> Self {
        Self { previous: 0.0 }
    }

    pub fn next(&mut self, sample: f32) -> f32 {
        let v = self.previous;
        self.previous = sample;
        v
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
