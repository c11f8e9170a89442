// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with reading and writing cubes and their headers.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::unit_parsing::UnitParseError;

#[derive(Error, Debug)]
pub enum FitsError {
    /// Error when opening a fits file.
    #[error(
        "{source_file}:{source_line}:{source_column}: Couldn't open {fits_filename}: {fits_error}"
    )]
    Open {
        fits_error: Box<fitsio::errors::Error>,
        fits_filename: Box<Path>,
        source_file: &'static str,
        source_line: u32,
        source_column: u32,
    },

    /// Error describing a HDU that couldn't be used as an image (e.g. `HduInfo::ImageInfo`).
    #[error("{source_file}:{source_line}:{source_column}: {fits_filename} HDU {hdu_num}: Tried to use as an image, but not an image")]
    NotImage {
        fits_filename: Box<Path>,
        hdu_num: usize,
        source_file: &'static str,
        source_line: u32,
        source_column: u32,
    },

    /// Failure to read a long string.
    #[error("{source_file}:{source_line}:{source_column}: {fits_filename} HDU {hdu_num}: Couldn't read a long string from {key}")]
    LongString {
        key: Box<str>,
        fits_filename: Box<Path>,
        hdu_num: usize,
        source_file: &'static str,
        source_line: u32,
        source_column: u32,
    },

    /// Failure to read a numbered header card.
    #[error("{source_file}:{source_line}:{source_column}: {fits_filename} HDU {hdu_num}: Couldn't read header card {card_num}: {fits_error}")]
    Card {
        card_num: usize,
        fits_error: Box<fitsio::errors::Error>,
        fits_filename: Box<Path>,
        hdu_num: usize,
        source_file: &'static str,
        source_line: u32,
        source_column: u32,
    },

    /// A generic error associated with the fitsio crate.
    #[error(
        "{source_file}:{source_line}:{source_column}: {fits_filename} HDU '{hdu_description}': {fits_error}"
    )]
    Fitsio {
        fits_error: Box<fitsio::errors::Error>,
        fits_filename: Box<Path>,
        hdu_description: Box<str>,
        source_file: &'static str,
        source_line: u32,
        source_column: u32,
    },
}

/// A header that doesn't describe a valid FITS image.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeaderError {
    #[error("The header is missing the mandatory key {0}")]
    MissingKey(String),

    #[error("The header key {key} should be {expected}")]
    WrongType { key: String, expected: &'static str },

    #[error("The header key SIMPLE must be true")]
    NotSimple,

    #[error("The header has an invalid BITPIX value ({0}); valid values are 8, 16, 32, 64, -32 and -64")]
    BadBitpix(i64),

    #[error("The header has an invalid NAXIS value ({0}); it must be between 0 and 999")]
    BadNaxis(i64),

    #[error("The header key {key} has an invalid axis length ({value})")]
    BadAxisLength { key: String, value: i64 },
}

#[derive(Error, Debug)]
pub enum CubeReadError {
    #[error("The file {0} does not exist")]
    DoesNotExist(PathBuf),

    #[error("{file} does not contain a cube; its image has axes {shape:?}")]
    NotACube { file: PathBuf, shape: Vec<usize> },

    #[error(transparent)]
    Fits(#[from] FitsError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum CubeWriteError {
    #[error("Invalid FITS header: {0}")]
    InvalidHeader(#[from] HeaderError),

    #[error("The header describes axes {header:?} (NAXIS1 first), but the data has shape {data:?}")]
    ShapeMismatch { header: Vec<usize>, data: Vec<usize> },

    #[error("Got {phi} Faraday depths but {rmsf} RMSF values")]
    RmsfLength { phi: usize, rmsf: usize },

    #[error("{0} already exists and overwriting wasn't requested")]
    AlreadyExists(PathBuf),

    #[error("{0} is a directory, not a file")]
    NotAFile(PathBuf),

    #[error("The output directory {0} does not exist")]
    NoOutputDir(PathBuf),

    #[error(transparent)]
    Fits(#[from] FitsError),

    #[error(transparent)]
    Fitsio(#[from] fitsio::errors::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum FrequencyFileError {
    #[error("The frequency file {0} does not exist")]
    DoesNotExist(PathBuf),

    #[error("Line {line_number} of the frequency file ('{line}') couldn't be parsed: {err}")]
    Parse {
        line_number: usize,
        line: String,
        err: UnitParseError,
    },

    #[error("Line {line_number} of the frequency file has the frequency {value} Hz; frequencies must be positive and finite")]
    NotPositive { line_number: usize, value: f64 },

    #[error("The frequency file {0} doesn't contain any frequencies")]
    Empty(PathBuf),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
