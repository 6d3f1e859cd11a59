//! Sample-rate distribution.
//!
//! DSP units are constructed all over the object graph, and each one needs to
//! know the stream's sample rate to derive its per-sample increments and delay
//! lengths. Rather than a hidden global registry, a [`SampleClock`] is created
//! once at startup and passed to every unit constructor. Each unit keeps a
//! [`RateListener`] and re-derives its rate-dependent parameters whenever
//! `poll` reports a change.
//!
//! The publish path is lock-free (a pair of atomics), so a control thread can
//! call [`SampleClock::set_rate`] without ever blocking the audio thread. A
//! broadcast is still expected to happen only while rendering is stopped:
//! units pick the new rate up at their next poll point, not mid-sample.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

struct Shared {
    rate_bits: AtomicU32,
    epoch: AtomicU32,
}

/// Publisher for the stream sample rate.
///
/// Created once by the application (or the engine) and lent to unit
/// constructors. Dropping the clock after all listeners are gone releases
/// everything; there is no process-lifetime state.
pub struct SampleClock {
    shared: Arc<Shared>,
}

impl SampleClock {
    /// A fresh clock reporting the default rate of 1.0 until the host
    /// establishes the real stream rate.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                rate_bits: AtomicU32::new(1.0f32.to_bits()),
                epoch: AtomicU32::new(0),
            }),
        }
    }

    /// Publish a new sample rate to every listener. Fire-and-forget: no
    /// return value, no failure mode.
    pub fn set_rate(&self, rate: f32) {
        self.shared.rate_bits.store(rate.to_bits(), Ordering::Release);
        self.shared.epoch.fetch_add(1, Ordering::Release);
    }

    /// The most recently published rate.
    pub fn rate(&self) -> f32 {
        f32::from_bits(self.shared.rate_bits.load(Ordering::Acquire))
    }

    /// Subscribe. Each unit owns exactly one listener, created in its
    /// constructor, so duplicate registration is unrepresentable. The
    /// listener starts out already synchronized with the current rate.
    pub fn listen(&self) -> RateListener {
        RateListener {
            seen: self.shared.epoch.load(Ordering::Acquire),
            rate: self.rate(),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Default for SampleClock {
    fn default() -> Self {
        Self::new()
    }
}

/// A unit's subscription to the sample rate.
pub struct RateListener {
    shared: Arc<Shared>,
    seen: u32,
    rate: f32,
}

impl RateListener {
    /// The rate this unit last observed.
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Returns `Some(rate)` exactly once per published change, `None`
    /// otherwise. Two atomic loads on the fast path.
    pub fn poll(&mut self) -> Option<f32> {
        let epoch = self.shared.epoch.load(Ordering::Acquire);
        if epoch == self.seen {
            return None;
        }
        self.seen = epoch;
        self.rate = f32::from_bits(self.shared.rate_bits.load(Ordering::Acquire));
        Some(self.rate)
    }
}
