// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all rmsynthesis-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use super::{common::PhiArgsError, dirty::DirtyArgsError, rmsf::RmsfArgsError};
use crate::{
    io::{CubeReadError, CubeWriteError, FrequencyFileError, HeaderError},
    params::RmSynthesisError,
    synthesis::ShapeError,
};

/// The *only* publicly visible error from rmsynthesis. Each error message
/// should carry a hint, unless it's "generic".
#[derive(Error, Debug)]
pub enum RmsynthesisError {
    /// An error related to frequency list files.
    #[error("{0}\n\nFrequency files have one frequency per line, in the same order as the cube planes, e.g. '150.5 MHz'. Frequencies without a unit are in Hz.")]
    Frequencies(String),

    /// The inputs don't agree on their shapes.
    #[error("{0}\n\nThe input cubes must have the same shape, with one plane per frequency along the third axis.")]
    Shape(String),

    /// An error related to reading cubes.
    #[error("{0}\n\nInput cubes must be FITS images in the primary HDU with axes (x, y, frequency); degenerate axes after the third are ignored.")]
    CubeRead(String),

    /// An error related to writing cubes or the RMSF.
    #[error("{0}")]
    CubeWrite(String),

    /// A cfitsio error. Because these are usually quite spartan, some
    /// suggestions are provided here.
    #[error("cfitsio error: {0}\n\nIf you don't know what this means, try turning up verbosity (-v or -vv) and maybe disabling progress bars.")]
    Cfitsio(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files are toml or json files with the same names as the long command-line arguments.")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

// Binary sub-command errors.

impl From<DirtyArgsError> for RmsynthesisError {
    fn from(e: DirtyArgsError) -> Self {
        let s = e.to_string();
        match e {
            DirtyArgsError::NoQCube | DirtyArgsError::NoUCube => Self::CubeRead(s),
            DirtyArgsError::NoFrequencies => Self::Frequencies(s),
        }
    }
}

impl From<RmsfArgsError> for RmsynthesisError {
    fn from(e: RmsfArgsError) -> Self {
        let s = e.to_string();
        match e {
            RmsfArgsError::NoFrequencies => Self::Frequencies(s),
        }
    }
}

impl From<PhiArgsError> for RmsynthesisError {
    fn from(e: PhiArgsError) -> Self {
        let s = e.to_string();
        match e {
            PhiArgsError::NotFinite { .. } | PhiArgsError::BadStep(_) => Self::Generic(s),
            PhiArgsError::TooFewSamples { .. } | PhiArgsError::TooManySamples { .. } => {
                Self::Shape(s)
            }
        }
    }
}

impl From<RmSynthesisError> for RmsynthesisError {
    fn from(e: RmSynthesisError) -> Self {
        match e {
            RmSynthesisError::Shape(e) => Self::from(e),
            RmSynthesisError::CubeRead(e) => Self::from(e),
            RmSynthesisError::CubeWrite(e) => Self::from(e),
            RmSynthesisError::IO(e) => Self::from(e),
        }
    }
}

// Library code errors.

impl From<FrequencyFileError> for RmsynthesisError {
    fn from(e: FrequencyFileError) -> Self {
        let s = e.to_string();
        match e {
            FrequencyFileError::DoesNotExist(_)
            | FrequencyFileError::Parse { .. }
            | FrequencyFileError::NotPositive { .. }
            | FrequencyFileError::Empty(_) => Self::Frequencies(s),
            FrequencyFileError::IO(e) => Self::from(e),
        }
    }
}

impl From<ShapeError> for RmsynthesisError {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e.to_string())
    }
}

impl From<CubeReadError> for RmsynthesisError {
    fn from(e: CubeReadError) -> Self {
        let s = e.to_string();
        match e {
            CubeReadError::DoesNotExist(_) | CubeReadError::NotACube { .. } => Self::CubeRead(s),
            CubeReadError::Fits(_) => Self::Cfitsio(s),
            CubeReadError::IO(e) => Self::from(e),
        }
    }
}

impl From<CubeWriteError> for RmsynthesisError {
    fn from(e: CubeWriteError) -> Self {
        let s = e.to_string();
        match e {
            CubeWriteError::InvalidHeader(e) => Self::from(e),
            CubeWriteError::ShapeMismatch { .. }
            | CubeWriteError::RmsfLength { .. }
            | CubeWriteError::AlreadyExists(_)
            | CubeWriteError::NotAFile(_)
            | CubeWriteError::NoOutputDir(_) => Self::CubeWrite(s),
            CubeWriteError::Fits(_) | CubeWriteError::Fitsio(_) => Self::Cfitsio(s),
            CubeWriteError::IO(e) => Self::from(e),
        }
    }
}

impl From<HeaderError> for RmsynthesisError {
    fn from(e: HeaderError) -> Self {
        Self::CubeWrite(format!("Invalid FITS header: {e}"))
    }
}

impl From<log::SetLoggerError> for RmsynthesisError {
    fn from(e: log::SetLoggerError) -> Self {
        Self::Generic(format!("Failed to initialise logging: {e}"))
    }
}

impl From<std::io::Error> for RmsynthesisError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
