// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Conversion of frequencies into wavelength-squared, the natural domain of
//! Faraday rotation.

use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::constants::VEL_C;

/// Converts frequencies \[Hz\] into wavelength-squared \[m^2\]. The speed of
/// light is carried as an immutable value rather than being read from global
/// state; [`WavelengthConverter::default`] uses [`VEL_C`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavelengthConverter {
    speed_of_light: f64,
}

impl Default for WavelengthConverter {
    fn default() -> Self {
        Self {
            speed_of_light: VEL_C,
        }
    }
}

impl WavelengthConverter {
    /// Use a non-standard speed of light \[metres/second\].
    pub fn new(speed_of_light: f64) -> Self {
        Self { speed_of_light }
    }

    pub fn speed_of_light(&self) -> f64 {
        self.speed_of_light
    }

    /// Wavelength-squared of a single frequency.
    #[inline]
    pub fn wavelength_squared(&self, freq_hz: f64) -> f64 {
        let lambda = self.speed_of_light / freq_hz;
        lambda * lambda
    }

    /// Wavelength-squared of every frequency in an array of any dimension
    /// (including a zero-dimensional "scalar" array). The output has the same
    /// shape and ordering as the input; empty input gives empty output.
    pub fn as_wavelength_squared<S, D>(&self, freqs_hz: &ArrayBase<S, D>) -> Array<f64, D>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        freqs_hz.mapv(|f| self.wavelength_squared(f))
    }

    /// Wavelength-squared of every frequency in a slice.
    pub fn as_wavelength_squared_vec(&self, freqs_hz: &[f64]) -> Vec<f64> {
        freqs_hz
            .iter()
            .map(|&f| self.wavelength_squared(f))
            .collect()
    }
}

/// Convert frequencies \[Hz\] to wavelength-squared \[m^2\] using the standard
/// speed of light.
pub fn as_wavelength_squared<S, D>(freqs_hz: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    WavelengthConverter::default().as_wavelength_squared(freqs_hz)
}
