//! Essential dignities for Western astrology.
//!
//! Each point gets exactly one tag. The four tables are checked in the order
//! Rulership, Exaltation, Detriment, Fall; the first table listing the
//! (sign, planet) pair wins and anything unlisted is Peregrine. Planet names are
//! matched exactly against the canonical vocabulary ("Sun", "Mars", ...).

use crate::western::signs::Sign;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dignity {
    Rulership,
    Exaltation,
    Detriment,
    Fall,
    Peregrine,
}

impl Dignity {
    pub const ALL: [Dignity; 5] = [
        Dignity::Rulership,
        Dignity::Exaltation,
        Dignity::Detriment,
        Dignity::Fall,
        Dignity::Peregrine,
    ];
}

type SignTable = [&'static [&'static str]; 12];

// Traditional rulers plus the modern co-rulers of Scorpio, Aquarius and Pisces.
const RULERSHIP: SignTable = [
    &["Mars"],               // Aries
    &["Venus"],              // Taurus
    &["Mercury"],            // Gemini
    &["Moon"],               // Cancer
    &["Sun"],                // Leo
    &["Mercury"],            // Virgo
    &["Venus"],              // Libra
    &["Mars", "Pluto"],      // Scorpio
    &["Jupiter"],            // Sagittarius
    &["Saturn"],             // Capricorn
    &["Saturn", "Uranus"],   // Aquarius
    &["Jupiter", "Neptune"], // Pisces
];

const EXALTATION: SignTable = [
    &["Sun", "Pluto"], // Aries
    &["Moon"],         // Taurus
    &[],               // Gemini
    &["Jupiter"],      // Cancer
    &[],               // Leo
    &["Mercury"],      // Virgo
    &["Saturn"],       // Libra
    &[],               // Scorpio
    &[],               // Sagittarius
    &["Mars"],         // Capricorn
    &[],               // Aquarius
    &["Venus"],        // Pisces
];

const DETRIMENT: SignTable = [
    &["Venus"],              // Aries
    &["Mars", "Pluto"],      // Taurus
    &["Jupiter"],            // Gemini
    &["Saturn"],             // Cancer
    &["Saturn", "Uranus"],   // Leo
    &["Jupiter", "Neptune"], // Virgo
    &["Mars"],               // Libra
    &["Venus"],              // Scorpio
    &["Mercury"],            // Sagittarius
    &["Moon"],               // Capricorn
    &["Sun"],                // Aquarius
    &["Mercury"],            // Pisces
];

const FALL: SignTable = [
    &["Saturn"],       // Aries
    &[],               // Taurus
    &[],               // Gemini
    &["Mars"],         // Cancer
    &[],               // Leo
    &["Venus"],        // Virgo
    &["Sun", "Pluto"], // Libra
    &["Moon"],         // Scorpio
    &[],               // Sagittarius
    &["Jupiter"],      // Capricorn
    &[],               // Aquarius
    &["Mercury"],      // Pisces
];

const TABLES: [(Dignity, &SignTable); 4] = [
    (Dignity::Rulership, &RULERSHIP),
    (Dignity::Exaltation, &EXALTATION),
    (Dignity::Detriment, &DETRIMENT),
    (Dignity::Fall, &FALL),
];

/// Classify a point by canonical name and sign.
///
/// An unresolved sign is always Peregrine.
pub fn dignity_of(point_name: &str, sign: Option<Sign>) -> Dignity {
    let Some(sign) = sign else {
        return Dignity::Peregrine;
    };

    TABLES
        .iter()
        .find(|(_, table)| table[sign.index()].contains(&point_name))
        .map(|(dignity, _)| *dignity)
        .unwrap_or(Dignity::Peregrine)
}
