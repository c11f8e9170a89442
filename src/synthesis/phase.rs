// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The phase kernel of RM synthesis: exp(2 i phi dλ²).

use ndarray::{ArrayBase, ArrayD, Data, Dimension, Zip};

use super::ShapeError;
use crate::{c64, math::cexp};

/// The rotation applied to a polarisation vector with Faraday depth `phi`
/// \[rad m^-2\] over a wavelength-squared offset `wavelength_squared_offset`
/// \[m^2\], i.e. exp(2 i phi dλ²).
///
/// # Examples
///
/// `assert_abs_diff_eq!(phase(PI, 0.5), c64::new(-1.0, 0.0));`
#[inline]
pub fn phase(wavelength_squared_offset: f64, phi: f64) -> c64 {
    cexp(2.0 * phi * wavelength_squared_offset)
}

/// [`phase`] for arrays, following numpy-style broadcasting rules; either
/// argument may be a zero-dimensional array. An error is returned if the
/// shapes cannot be broadcast together.
pub fn rmsynthesis_phases<S1, S2, D1, D2>(
    wavelength_squared_offsets: &ArrayBase<S1, D1>,
    phi: &ArrayBase<S2, D2>,
) -> Result<ArrayD<c64>, ShapeError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D1: Dimension,
    D2: Dimension,
{
    let shape = co_broadcast_shape(wavelength_squared_offsets.shape(), phi.shape())?;
    let broadcast_error = || ShapeError::Broadcast {
        a: wavelength_squared_offsets.shape().to_vec(),
        b: phi.shape().to_vec(),
    };
    let wl = wavelength_squared_offsets
        .broadcast(shape.as_slice())
        .ok_or_else(broadcast_error)?;
    let phi = phi.broadcast(shape.as_slice()).ok_or_else(broadcast_error)?;

    Ok(Zip::from(&wl)
        .and(&phi)
        .map_collect(|&wl, &phi| phase(wl, phi)))
}

/// The shape that two arrays broadcast to. Shapes are aligned on their last
/// axes; aligned lengths must be equal or one of them must be 1.
fn co_broadcast_shape(a: &[usize], b: &[usize]) -> Result<Vec<usize>, ShapeError> {
    let ndim = a.len().max(b.len());
    let mut shape = vec![0; ndim];
    for (i, out) in shape.iter_mut().enumerate() {
        // Missing leading axes act as length 1.
        let len_a = (i + a.len()).checked_sub(ndim).map(|j| a[j]).unwrap_or(1);
        let len_b = (i + b.len()).checked_sub(ndim).map(|j| b[j]).unwrap_or(1);
        *out = match (len_a, len_b) {
            (x, y) if x == y => x,
            (1, y) => y,
            (x, 1) => x,
            _ => {
                return Err(ShapeError::Broadcast {
                    a: a.to_vec(),
                    b: b.to_vec(),
                })
            }
        };
    }
    Ok(shape)
}
