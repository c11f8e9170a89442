// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to parse strings into frequencies. A frequency is an arithmetic
//! expression (e.g. "150e6", "(1.4 - 0.1) * 1e9", "2^7"), optionally followed
//! by a unit.

mod error;

pub(crate) use error::*;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, EnumIter, EnumString, IntoStaticStr)]
#[allow(non_camel_case_types)]
pub(crate) enum FreqFormat {
    /// Hertz
    Hz,

    /// kiloHertz
    kHz,

    /// MegaHertz
    MHz,

    /// GigaHertz
    GHz,
}

impl FreqFormat {
    /// The number of Hz in one of this unit.
    pub(crate) fn in_hz(self) -> f64 {
        match self {
            FreqFormat::Hz => 1.0,
            FreqFormat::kHz => 1e3,
            FreqFormat::MHz => 1e6,
            FreqFormat::GHz => 1e9,
        }
    }
}

/// Parse a string that may have a unit of frequency attached to it. The
/// returned number is in Hz; the unit (if any) is returned alongside it.
pub(crate) fn parse_freq(s: &str) -> Result<(f64, Option<FreqFormat>), UnitParseError> {
    let s = s.trim();

    // Units are matched case insensitively, and must not be the tail of a
    // longer word (so "Hz" doesn't match "kHz").
    let upper = s.to_ascii_uppercase();
    let unit = FreqFormat::iter().find_map(|freq_format| {
        let freq_format_str: &'static str = freq_format.into();
        let number_part = upper.strip_suffix(&freq_format_str.to_ascii_uppercase())?;
        match number_part.chars().last() {
            Some(c) if c.is_alphabetic() => None,
            _ => Some((freq_format, s[..number_part.len()].trim())),
        }
    });

    match unit {
        None => match evaluate(s) {
            Ok(number) => Ok((number, None)),
            Err(reason) => Err(UnitParseError::Unknown {
                input: s.to_string(),
                reason,
            }),
        },

        Some((freq_format, number_part)) => match evaluate(number_part) {
            Ok(number) => Ok((number * freq_format.in_hz(), Some(freq_format))),
            Err(reason) => Err(UnitParseError::GotFreqUnitButCantParse {
                input: s.to_string(),
                unit: freq_format.into(),
                reason,
            }),
        },
    }
}

/// Evaluate an arithmetic expression of real numbers. Supported are binary
/// `+ - * /`, unary minus and plus, right-associative `^` (binding tighter
/// than unary minus, so `-2^2` is -4) and parentheses.
pub(crate) fn evaluate(expression: &str) -> Result<f64, ExpressionError> {
    let mut parser = ExpressionParser {
        bytes: expression.as_bytes(),
        pos: 0,
    };
    let value = parser.sum()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(value),
        Some(_) => Err(parser.unexpected()),
    }
}

/// A recursive-descent parser over an expression; one method per precedence
/// level.
struct ExpressionParser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl ExpressionParser<'_> {
    fn skip_whitespace(&mut self) {
        while self.bytes.get(self.pos).map_or(false, u8::is_ascii_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Skip whitespace, and consume the next byte if it is `b`.
    fn eat(&mut self, b: u8) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn unexpected(&self) -> ExpressionError {
        // Report whole characters, even though parsing is done on bytes.
        let rest = String::from_utf8_lossy(&self.bytes[self.pos..]);
        match rest.chars().next() {
            Some(c) => ExpressionError::UnexpectedChar { c, pos: self.pos },
            None => ExpressionError::UnexpectedEnd,
        }
    }

    /// Consume a run of ASCII digits, returning how many there were.
    fn digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().map_or(false, |b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn sum(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.product()?;
        loop {
            if self.eat(b'+') {
                value += self.product()?;
            } else if self.eat(b'-') {
                value -= self.product()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn product(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.unary()?;
        loop {
            if self.eat(b'*') {
                value *= self.unary()?;
            } else if self.eat(b'/') {
                value /= self.unary()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn unary(&mut self) -> Result<f64, ExpressionError> {
        if self.eat(b'-') {
            Ok(-self.unary()?)
        } else if self.eat(b'+') {
            self.unary()
        } else {
            self.power()
        }
    }

    fn power(&mut self) -> Result<f64, ExpressionError> {
        let base = self.atom()?;
        if self.eat(b'^') {
            // The exponent may itself be negated, e.g. 10^-3.
            let exponent = self.unary()?;
            Ok(base.powf(exponent))
        } else {
            Ok(base)
        }
    }

    fn atom(&mut self) -> Result<f64, ExpressionError> {
        if self.eat(b'(') {
            let value = self.sum()?;
            if self.eat(b')') {
                Ok(value)
            } else {
                Err(self.unexpected())
            }
        } else {
            self.number()
        }
    }

    fn number(&mut self) -> Result<f64, ExpressionError> {
        self.skip_whitespace();
        let start = self.pos;
        let mut num_digits = self.digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            num_digits += self.digits();
        }
        if num_digits == 0 {
            self.pos = start;
            return Err(self.unexpected());
        }

        // An exponent is only consumed if it's complete, e.g. "1e6" but not
        // the "e" of "1e".
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mantissa_end = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.digits() == 0 {
                self.pos = mantissa_end;
            }
        }

        // Only ASCII bytes have been consumed, so this is valid UTF-8.
        let number = String::from_utf8_lossy(&self.bytes[start..self.pos]);
        number
            .parse()
            .map_err(|_| ExpressionError::BadNumber(number.into_owned()))
    }
}
