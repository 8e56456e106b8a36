//! Zodiac sign tables.
//!
//! Signs are addressed by ordinal (Aries = 0 .. Pisces = 11). Ordinals outside
//! that range resolve to the `"Unknown"` / `"?"` sentinel instead of failing.

use serde::{Deserialize, Serialize};

pub const UNKNOWN_SIGN_NAME: &str = "Unknown";
pub const UNKNOWN_SIGN_SYMBOL: &str = "?";

const SIGN_FULL_NAMES: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

const SIGN_SYMBOLS: [&str; 12] = [
    "\u{2648}",
    "\u{2649}",
    "\u{264A}",
    "\u{264B}",
    "\u{264C}",
    "\u{264D}",
    "\u{264E}",
    "\u{264F}",
    "\u{2650}",
    "\u{2651}",
    "\u{2652}",
    "\u{2653}",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Resolve a sign ordinal; `None` outside 0..=11.
    pub fn from_index(index: i64) -> Option<Sign> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    /// Sign containing an ecliptic longitude. Out-of-range longitudes wrap.
    pub fn from_longitude(longitude: f64) -> Option<Sign> {
        if !longitude.is_finite() {
            return None;
        }
        let lon = normalize_longitude(longitude);
        Self::from_index((lon / 30.0).floor() as i64)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        SIGN_FULL_NAMES[self.index()]
    }

    pub fn symbol(self) -> &'static str {
        SIGN_SYMBOLS[self.index()]
    }
}

/// Full sign name for an ordinal, or `"Unknown"`.
pub fn sign_name(index: i64) -> &'static str {
    Sign::from_index(index).map_or(UNKNOWN_SIGN_NAME, Sign::name)
}

/// Sign glyph for an ordinal, or `"?"`.
pub fn sign_symbol(index: i64) -> &'static str {
    Sign::from_index(index).map_or(UNKNOWN_SIGN_SYMBOL, Sign::symbol)
}

/// Wrap a longitude into [0, 360).
pub fn normalize_longitude(longitude: f64) -> f64 {
    let lon = longitude.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if lon >= 360.0 {
        0.0
    } else {
        lon
    }
}
