// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Faraday rotation measure synthesis.
//!
//! The RMSF and the dirty Faraday-dispersion cube are both direct (non-FFT)
//! transforms over the sampled wavelength-squared values; the frequency
//! sampling is generally not uniform in λ², so an FFT isn't applicable. Both
//! transforms derotate by the same reference wavelength-squared (the mean λ²
//! of all frequencies), and [`FaradaySynthesis`] is the one place where that
//! reference is computed.

mod dirty;
mod error;
mod phase;
mod rmsf;
mod wavelength;

pub use dirty::rmsynthesis_dirty;
pub use error::ShapeError;
pub use phase::{phase, rmsynthesis_phases};
pub use rmsf::{compute_rmsf, RmsfProperties};
pub use wavelength::{as_wavelength_squared, WavelengthConverter};

use ndarray::prelude::*;
use vec1::Vec1;

use crate::c64;

/// The reference wavelength-squared that all phases are relative to; this is
/// the unweighted mean of the supplied wavelength-squared values.
pub fn reference_wavelength_squared(lambda_sq: &[f64]) -> Result<f64, ShapeError> {
    let lambda_sq =
        Vec1::try_from_vec(lambda_sq.to_vec()).map_err(|_| ShapeError::NoFrequencies)?;
    Ok(mean_lambda_sq(&lambda_sq))
}

fn mean_lambda_sq(lambda_sq: &Vec1<f64>) -> f64 {
    lambda_sq.iter().sum::<f64>() / lambda_sq.len() as f64
}

/// Everything needed to transform frequency-domain polarisation into
/// Faraday-depth space for one frequency sampling and one Faraday-depth grid.
#[derive(Debug, Clone)]
pub struct FaradaySynthesis {
    /// The frequencies of the input planes \[Hz\].
    freqs: Vec1<f64>,

    /// The trial Faraday depths \[rad m^-2\].
    phi: Vec<f64>,

    /// Wavelength-squared of each frequency \[m^2\].
    lambda_sq: Vec1<f64>,

    /// The reference wavelength-squared \[m^2\].
    lambda_sq_0: f64,
}

impl FaradaySynthesis {
    pub fn new(converter: WavelengthConverter, freqs: Vec1<f64>, phi: Vec<f64>) -> Self {
        let lambda_sq = freqs.mapped_ref(|&f| converter.wavelength_squared(f));
        let lambda_sq_0 = mean_lambda_sq(&lambda_sq);
        Self {
            freqs,
            phi,
            lambda_sq,
            lambda_sq_0,
        }
    }

    /// Set up synthesis with the standard speed of light. An error is returned
    /// if there are no frequencies.
    pub fn from_slices(freqs: &[f64], phi: &[f64]) -> Result<Self, ShapeError> {
        let freqs =
            Vec1::try_from_vec(freqs.to_vec()).map_err(|_| ShapeError::NoFrequencies)?;
        Ok(Self::new(WavelengthConverter::default(), freqs, phi.to_vec()))
    }

    pub fn freqs(&self) -> &[f64] {
        &self.freqs
    }

    pub fn phi(&self) -> &[f64] {
        &self.phi
    }

    pub fn lambda_sq(&self) -> &[f64] {
        &self.lambda_sq
    }

    pub fn reference_lambda_sq(&self) -> f64 {
        self.lambda_sq_0
    }

    /// The phase of every (phi, frequency) pair that derotates a frequency
    /// sample to the reference wavelength-squared, i.e. exp(-2 i phi (λ² -
    /// λ²₀)). The first axis is phi, the second is frequency.
    pub(crate) fn derotation_phases(&self) -> Array2<c64> {
        Array2::from_shape_fn(
            (self.phi.len(), self.lambda_sq.len()),
            |(i_phi, i_freq)| phase(self.lambda_sq_0 - self.lambda_sq[i_freq], self.phi[i_phi]),
        )
    }
}
