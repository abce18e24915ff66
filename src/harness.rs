//! The layout experiment harness.
//!
//! Every experiment follows the same skeleton: build a dataset under some
//! layout, optionally scrub the cache, time one pass of a fixed operation
//! over the dataset, repeat. Dataset construction happens before a
//! [`LayoutTrial`] exists and teardown happens when it is dropped, so the only
//! code inside the timed region is [`LayoutTrial::run`].

use crate::utils::cache::CacheScrubber;
use std::time::{Duration, Instant};

/// A dataset plus the operation measured over it.
pub trait LayoutTrial {
    /// Number of elements one pass touches, used to normalize timings.
    fn elements(&self) -> usize;

    /// One pass of the measured operation over the whole dataset.
    fn run(&mut self);
}

impl<T: LayoutTrial + ?Sized> LayoutTrial for Box<T> {
    fn elements(&self) -> usize {
        (**self).elements()
    }

    fn run(&mut self) {
        (**self).run()
    }
}

/// Times trials, scrubbing the cache before each one when configured to.
#[derive(Clone, Copy)]
pub struct TrialHarness<'a> {
    scrubber: Option<&'a CacheScrubber>,
}

impl<'a> TrialHarness<'a> {
    /// Trials run back to back on whatever the cache holds.
    pub fn warm() -> Self {
        Self { scrubber: None }
    }

    /// Every trial starts after a full scrub.
    pub fn cold(scrubber: &'a CacheScrubber) -> Self {
        Self {
            scrubber: Some(scrubber),
        }
    }

    /// Cold when `clear_cache` is set, warm otherwise.
    pub fn new(scrubber: &'a CacheScrubber, clear_cache: bool) -> Self {
        if clear_cache {
            Self::cold(scrubber)
        } else {
            Self::warm()
        }
    }

    pub fn is_cold(&self) -> bool {
        self.scrubber.is_some()
    }

    /// Time a single trial. The scrub happens before the clock starts.
    #[inline]
    pub fn time_trial<T: LayoutTrial + ?Sized>(&self, trial: &mut T) -> Duration {
        if let Some(scrubber) = self.scrubber {
            scrubber.scrub();
        }
        let start = Instant::now();
        trial.run();
        start.elapsed()
    }

    /// Time `iters` trials and return the summed time spent inside them.
    ///
    /// Shaped for `criterion::Bencher::iter_custom`, which supplies the
    /// repetition count.
    pub fn time_trials<T: LayoutTrial + ?Sized>(&self, trial: &mut T, iters: u64) -> Duration {
        (0..iters).map(|_| self.time_trial(trial)).sum()
    }
}
