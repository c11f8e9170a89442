// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The rotation measure spread function.

use std::f64::consts::PI;

use ndarray::prelude::*;

use super::{FaradaySynthesis, ShapeError};
use crate::{c64, math::max_adjacent_gap};

/// Resolution properties of an RMSF that are set by the wavelength-squared
/// coverage (Brentjens & de Bruyn 2005).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RmsfProperties {
    /// Full width at half maximum of the main RMSF lobe \[rad m^-2\].
    pub fwhm: f64,

    /// The largest Faraday-depth scale that can be detected \[rad m^-2\].
    pub max_scale: f64,

    /// The largest |phi| that can be detected before the largest gap
    /// between samples depolarises the signal \[rad m^-2\]. Infinite for a
    /// single frequency.
    pub max_phi: f64,
}

impl FaradaySynthesis {
    /// The response to a unit, Faraday-depth-independent polarised source, one
    /// value per phi: the mean over frequencies of exp(-2 i phi (λ² - λ²₀)).
    pub fn rmsf(&self) -> Array1<c64> {
        let num_freqs = self.lambda_sq.len() as f64;
        self.derotation_phases()
            .sum_axis(Axis(1))
            .mapv(|sum| sum / num_freqs)
    }

    pub fn rmsf_properties(&self) -> RmsfProperties {
        let (min, max) = self
            .lambda_sq
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &l| {
                (min.min(l), max.max(l))
            });
        let max_phi = match max_adjacent_gap(&self.lambda_sq) {
            Some(gap) if gap > 0.0 => 3.0_f64.sqrt() / gap,
            _ => f64::INFINITY,
        };

        RmsfProperties {
            fwhm: 2.0 * 3.0_f64.sqrt() / (max - min),
            max_scale: PI / min,
            max_phi,
        }
    }
}

/// Compute the RMSF of the given frequencies \[Hz\] on the Faraday-depth grid
/// `phi` \[rad m^-2\] with the standard speed of light.
pub fn compute_rmsf(freqs: &[f64], phi: &[f64]) -> Result<Array1<c64>, ShapeError> {
    Ok(FaradaySynthesis::from_slices(freqs, phi)?.rmsf())
}
