// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An in-memory FITS header, and the Faraday-depth axis calibration added to
//! the headers of output cubes.

use std::fmt::Display;

use indexmap::IndexMap;
use log::warn;

use super::HeaderError;
use crate::synthesis::ShapeError;

/// The value of a single header card.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Logical(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl HeaderValue {
    /// Integers are also accepted as floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HeaderValue::Integer(i) => Some(*i as f64),
            HeaderValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HeaderValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HeaderValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HeaderValue::Logical(b) => Some(*b),
            _ => None,
        }
    }

    /// Interpret the value field of a card as cfitsio reports it, e.g.
    /// `'Q       '`, `T`, `3`, `-1.3E+06` or `1.0D-3`. `None` is returned for
    /// undefined or unrecognised values.
    pub(crate) fn parse(value: &str) -> Option<HeaderValue> {
        let value = value.trim();
        if let Some(s) = value.strip_prefix('\'') {
            let s = s.strip_suffix('\'').unwrap_or(s);
            // Quotes inside strings are doubled, and trailing spaces aren't
            // significant.
            return Some(HeaderValue::String(s.replace("''", "'").trim_end().to_string()));
        }
        match value {
            "" => None,
            "T" => Some(HeaderValue::Logical(true)),
            "F" => Some(HeaderValue::Logical(false)),
            _ => match value.parse() {
                Ok(i) => Some(HeaderValue::Integer(i)),
                Err(_) => value
                    .replace(['D', 'd'], "E")
                    .parse()
                    .ok()
                    .map(HeaderValue::Float),
            },
        }
    }
}

impl Display for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderValue::Logical(true) => write!(f, "T"),
            HeaderValue::Logical(false) => write!(f, "F"),
            HeaderValue::Integer(i) => write!(f, "{i}"),
            HeaderValue::Float(v) => write!(f, "{v}"),
            HeaderValue::String(s) => write!(f, "'{s}'"),
        }
    }
}

impl From<bool> for HeaderValue {
    fn from(b: bool) -> Self {
        HeaderValue::Logical(b)
    }
}

impl From<i64> for HeaderValue {
    fn from(i: i64) -> Self {
        HeaderValue::Integer(i)
    }
}

impl From<i32> for HeaderValue {
    fn from(i: i32) -> Self {
        HeaderValue::Integer(i.into())
    }
}

impl From<usize> for HeaderValue {
    fn from(i: usize) -> Self {
        HeaderValue::Integer(i as i64)
    }
}

impl From<f64> for HeaderValue {
    fn from(f: f64) -> Self {
        HeaderValue::Float(f)
    }
}

impl From<f32> for HeaderValue {
    fn from(f: f32) -> Self {
        HeaderValue::Float(f.into())
    }
}

impl From<&str> for HeaderValue {
    fn from(s: &str) -> Self {
        HeaderValue::String(s.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(s: String) -> Self {
        HeaderValue::String(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCard {
    pub value: HeaderValue,
    pub comment: Option<String>,
}

/// The keyword cards of a FITS header, in order. Keys are stored upper case.
/// COMMENT and HISTORY cards are kept separately from the keyword cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitsHeader {
    cards: IndexMap<String, HeaderCard>,
    comments: Vec<String>,
    history: Vec<String>,
}

impl FitsHeader {
    pub fn new() -> FitsHeader {
        FitsHeader::default()
    }

    /// Set the value of a key. If the key already exists, its position and
    /// comment are retained.
    pub fn set<V: Into<HeaderValue>>(&mut self, key: &str, value: V) {
        let value = value.into();
        match self.cards.get_mut(&normalise_key(key)) {
            Some(card) => card.value = value,
            None => {
                self.cards.insert(
                    normalise_key(key),
                    HeaderCard {
                        value,
                        comment: None,
                    },
                );
            }
        }
    }

    pub fn set_with_comment<V: Into<HeaderValue>>(&mut self, key: &str, value: V, comment: &str) {
        self.set_card(key, value.into(), Some(comment.to_string()));
    }

    pub(crate) fn set_card(&mut self, key: &str, value: HeaderValue, comment: Option<String>) {
        self.cards
            .insert(normalise_key(key), HeaderCard { value, comment });
    }

    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.card(key).map(|c| &c.value)
    }

    pub fn card(&self, key: &str) -> Option<&HeaderCard> {
        self.cards.get(&normalise_key(key))
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(HeaderValue::as_f64)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(HeaderValue::as_i64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(HeaderValue::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(HeaderValue::as_bool)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.cards.contains_key(&normalise_key(key))
    }

    /// Remove a key, keeping the order of the remaining cards.
    pub fn remove(&mut self, key: &str) -> Option<HeaderValue> {
        self.cards.shift_remove(&normalise_key(key)).map(|c| c.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderCard)> {
        self.cards.iter().map(|(k, c)| (k.as_str(), c))
    }

    /// The number of keyword cards (excluding COMMENT and HISTORY).
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn add_comment<S: Into<String>>(&mut self, comment: S) {
        self.comments.push(comment.into());
    }

    pub fn add_history<S: Into<String>>(&mut self, history: S) {
        self.history.push(history.into());
    }

    /// Check that this header describes a FITS primary image: SIMPLE must be
    /// true, BITPIX must be a valid FITS data type, NAXIS must be present and
    /// every NAXISn up to NAXIS must be a non-negative integer.
    pub fn verify(&self) -> Result<(), HeaderError> {
        match self.get("SIMPLE") {
            None => return Err(HeaderError::MissingKey("SIMPLE".to_string())),
            Some(HeaderValue::Logical(true)) => (),
            Some(HeaderValue::Logical(false)) => return Err(HeaderError::NotSimple),
            Some(_) => {
                return Err(HeaderError::WrongType {
                    key: "SIMPLE".to_string(),
                    expected: "a logical",
                })
            }
        }
        self.bitpix()?;
        self.axis_lengths()?;
        Ok(())
    }

    /// The value of BITPIX, if it is valid.
    pub fn bitpix(&self) -> Result<i64, HeaderError> {
        let bitpix = self.required_integer("BITPIX")?;
        match bitpix {
            8 | 16 | 32 | 64 | -32 | -64 => Ok(bitpix),
            _ => Err(HeaderError::BadBitpix(bitpix)),
        }
    }

    /// The lengths of all axes, NAXIS1 first.
    pub fn axis_lengths(&self) -> Result<Vec<usize>, HeaderError> {
        let naxis = self.required_integer("NAXIS")?;
        if !(0..=999).contains(&naxis) {
            return Err(HeaderError::BadNaxis(naxis));
        }
        (1..=naxis)
            .map(|n| {
                let key = format!("NAXIS{n}");
                let value = self.required_integer(&key)?;
                usize::try_from(value).map_err(|_| HeaderError::BadAxisLength { key, value })
            })
            .collect()
    }

    fn required_integer(&self, key: &str) -> Result<i64, HeaderError> {
        match self.get(key) {
            None => Err(HeaderError::MissingKey(key.to_string())),
            Some(HeaderValue::Integer(i)) => Ok(*i),
            Some(_) => Err(HeaderError::WrongType {
                key: key.to_string(),
                expected: "an integer",
            }),
        }
    }
}

fn normalise_key(key: &str) -> String {
    key.trim().to_uppercase()
}

/// Keys that describe the layout of an HDU. These are written by cfitsio
/// itself when an image is created, so they are never copied from a
/// [`FitsHeader`] into a file.
pub(crate) fn is_structural_key(key: &str) -> bool {
    match key {
        "SIMPLE" | "XTENSION" | "BITPIX" | "NAXIS" | "EXTEND" | "PCOUNT" | "GCOUNT" | "BSCALE"
        | "BZERO" | "CHECKSUM" | "DATASUM" | "END" => true,
        _ => key
            .strip_prefix("NAXIS")
            .map(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or(false),
    }
}

/// Derive the header of a Faraday-depth cube from the header of a frequency
/// cube: the third axis becomes Faraday depth, calibrated from `phi`. The
/// input header is left untouched.
///
/// `phi` must have at least two values, as the axis increment is
/// `phi[1] - phi[0]`.
pub fn add_phi_to_header(header: &FitsHeader, phi: &[f64]) -> Result<FitsHeader, ShapeError> {
    let (phi_0, dphi) = match phi {
        [phi_0, phi_1, ..] => (*phi_0, phi_1 - phi_0),
        _ => return Err(ShapeError::PhiTooShort { len: phi.len() }),
    };
    if phi
        .windows(2)
        .any(|pair| ((pair[1] - pair[0]) - dphi).abs() > 1e-6 * dphi.abs())
    {
        warn!("The Faraday-depth grid is not uniformly spaced; the axis calibration in output headers only uses the first two values");
    }

    let mut header = header.clone();
    // WCS cards that tie the old frequency axis to the others (or describe it
    // in an alternative system) don't apply to Faraday depth.
    let uses_cd_matrix = header.iter().any(|(key, _)| matrix_element(key, "CD").is_some());
    let stale: Vec<String> = header
        .iter()
        .map(|(key, _)| key)
        .filter(|key| describes_third_axis(key))
        .map(str::to_string)
        .collect();
    for key in stale {
        header.remove(&key);
    }
    if uses_cd_matrix {
        // Without CD3_3, a CD matrix makes the third axis degenerate.
        header.set("CD3_3", dphi);
    }

    header.set("NAXIS3", phi.len());
    header.set("CTYPE3", "Faraday depth");
    header.set("CUNIT3", "rad m^{-2}");
    header.set("CRPIX3", 1.0);
    header.set("CRVAL3", phi_0);
    header.set("CDELT3", dphi);
    Ok(header)
}

/// Strip an optional alternative-WCS letter (A to Z) from the end of a key.
fn strip_alt(key: &str) -> &str {
    match key.as_bytes().last() {
        Some(c) if c.is_ascii_uppercase() => &key[..key.len() - 1],
        _ => key,
    }
}

fn axis_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// If `key` is an element of a WCS matrix like "PCi_j" or "CDi_j" (with an
/// optional alternative-WCS letter), return (i, j).
fn matrix_element(key: &str, prefix: &str) -> Option<(u32, u32)> {
    let (i, j) = strip_alt(key).strip_prefix(prefix)?.split_once('_')?;
    Some((axis_number(i)?, axis_number(j)?))
}

/// Is `key` a WCS key for the third axis, other than the primary CTYPE3,
/// CUNIT3, CRPIX3, CRVAL3 and CDELT3?
fn describes_third_axis(key: &str) -> bool {
    if ["PC", "CD"]
        .iter()
        .filter_map(|prefix| matrix_element(key, prefix))
        .any(|(i, j)| i == 3 || j == 3)
    {
        return true;
    }
    for prefix in ["PV", "PS"] {
        if let Some((i, _)) = matrix_element(key, prefix) {
            return i == 3;
        }
    }
    if matches!(key, "CTYPE3" | "CUNIT3" | "CRPIX3" | "CRVAL3" | "CDELT3") {
        return false;
    }
    let base = strip_alt(key);
    ["CROTA", "CTYPE", "CUNIT", "CRPIX", "CRVAL", "CDELT", "CNAME", "CRDER", "CSYER"]
        .iter()
        .any(|prefix| base.strip_prefix(prefix) == Some("3"))
}
