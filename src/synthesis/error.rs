// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with the shapes of synthesis inputs.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("No frequencies were supplied; at least one is required for synthesis")]
    NoFrequencies,

    #[error("The Faraday-depth grid has {len} samples, but at least 2 are needed to calibrate a Faraday-depth axis")]
    PhiTooShort { len: usize },

    #[error("The Q cube has shape {q:?}, but the U cube has shape {u:?}; these must be identical")]
    QuMismatch { q: Vec<usize>, u: Vec<usize> },

    #[error("The input cubes have {planes} frequency planes, but {freqs} frequencies were supplied")]
    FrequencyCount { planes: usize, freqs: usize },

    #[error("Arrays with shapes {a:?} and {b:?} cannot be broadcast together")]
    Broadcast { a: Vec<usize>, b: Vec<usize> },
}
