// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use vec1::Vec1;

use super::{write_rmsf_product, OutputParams, RmSynthesisError};
use crate::{
    constants::RMSF_FILENAME,
    synthesis::{FaradaySynthesis, ShapeError, WavelengthConverter},
};

/// Parameters for writing only the RMSF of a frequency sampling.
pub(crate) struct RmsfParams {
    pub(crate) synthesis: FaradaySynthesis,
    pub(crate) output: OutputParams,
}

impl RmsfParams {
    pub(crate) fn new(
        freqs: Vec1<f64>,
        phi: Vec<f64>,
        output: OutputParams,
    ) -> Result<RmsfParams, RmSynthesisError> {
        if phi.is_empty() {
            return Err(ShapeError::PhiTooShort { len: 0 }.into());
        }
        output.check(&[RMSF_FILENAME])?;
        Ok(RmsfParams {
            synthesis: FaradaySynthesis::new(WavelengthConverter::default(), freqs, phi),
            output,
        })
    }

    pub(crate) fn run(&self) -> Result<(), RmSynthesisError> {
        write_rmsf_product(&self.synthesis, &self.output)?;
        Ok(())
    }
}
