//! Independent requests processed together.
//!
//! Requests share nothing, so with the `rayon` feature and
//! `CorrectorConfig::parallel` set they are spread over the global pool.

use crate::pipeline::{ComputeInput, CorrectionReport, Corrector};
use crate::util::ZeroSightResult;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

impl Corrector {
    /// Runs every input; results are in input order.
    pub fn correct_batch(
        &self,
        inputs: &[ComputeInput<'_>],
    ) -> Vec<ZeroSightResult<CorrectionReport>> {
        #[cfg(feature = "rayon")]
        if self.config().parallel {
            return inputs.par_iter().map(|input| self.correct(input)).collect();
        }
        inputs.iter().map(|input| self.correct(input)).collect()
    }
}
