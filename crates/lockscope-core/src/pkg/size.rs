//! Human-readable size tokens as printed by `du -h`.
//!
//! A token is a decimal magnitude followed by a unit letter: `512B`, `4.0K`,
//! `1.2M`, `3G`. `du -h` prints a bare `0` for empty directories; a number
//! without a unit is read as bytes.

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Size unit, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeUnit {
    Bytes,
    Kilo,
    Mega,
    Giga,
}

impl SizeUnit {
    fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'B' => Some(Self::Bytes),
            'K' => Some(Self::Kilo),
            'M' => Some(Self::Mega),
            'G' => Some(Self::Giga),
            _ => None,
        }
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::Bytes => 'B',
            Self::Kilo => 'K',
            Self::Mega => 'M',
            Self::Giga => 'G',
        }
    }
}

/// A parsed size token. Keeps the original text for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeToken {
    raw: String,
    magnitude: f64,
    unit: SizeUnit,
}

impl SizeToken {
    /// Parse a token such as `4.0M`.
    ///
    /// # Errors
    /// Returns `Error::SizeParse` unless the token is digits with at most one
    /// `.`, optionally followed by one of `B`, `K`, `M`, `G`.
    pub fn parse(token: &str) -> Result<Self> {
        let invalid = || Error::SizeParse {
            token: token.to_string(),
        };

        let trimmed = token.trim();
        let (number, unit) = match trimmed.chars().last() {
            Some(c) if c.is_ascii_alphabetic() => (
                &trimmed[..trimmed.len() - 1],
                SizeUnit::from_letter(c).ok_or_else(invalid)?,
            ),
            _ => (trimmed, SizeUnit::Bytes),
        };

        if !is_decimal(number) {
            return Err(invalid());
        }
        let magnitude: f64 = number.parse().map_err(|_| invalid())?;

        Ok(Self {
            raw: trimmed.to_string(),
            magnitude,
            unit,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    #[must_use]
    pub fn unit(&self) -> SizeUnit {
        self.unit
    }

    /// Compare by unit first, then by magnitude within the unit.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.unit
            .cmp(&other.unit)
            .then_with(|| self.magnitude.total_cmp(&other.magnitude))
    }

    /// Compare possibly-missing sizes; a missing size ranks as zero bytes.
    #[must_use]
    pub fn compare_opt(a: Option<&Self>, b: Option<&Self>) -> Ordering {
        let key = |t: Option<&Self>| t.map_or((SizeUnit::Bytes, 0.0), |t| (t.unit, t.magnitude));
        let (ua, ma) = key(a);
        let (ub, mb) = key(b);
        ua.cmp(&ub).then_with(|| ma.total_cmp(&mb))
    }
}

/// Digits with at most one `.`, and at least one digit.
fn is_decimal(s: &str) -> bool {
    let mut dots = 0;
    let mut digits = 0;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

impl fmt::Display for SizeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for SizeToken {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}
