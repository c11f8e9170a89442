// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UnitParseError {
    #[error("Successfully parsed a frequency unit ({unit}), but could not evaluate the numerical component of '{input}': {reason}")]
    GotFreqUnitButCantParse {
        input: String,
        unit: &'static str,
        reason: ExpressionError,
    },

    #[error("Could not parse '{input}' as a frequency: {reason}")]
    Unknown {
        input: String,
        reason: ExpressionError,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("unexpected character '{c}' at position {pos}")]
    UnexpectedChar { c: char, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("couldn't read '{0}' as a number")]
    BadNumber(String),
}
