//! Element (triplicity) and modality (quadruplicity) tables.

use crate::western::signs::Sign;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mode {
    Cardinal,
    Fixed,
    Mutable,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Earth, Element::Air, Element::Water];
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Cardinal, Mode::Fixed, Mode::Mutable];
}

// Indexed by sign ordinal
const SIGN_ELEMENTS: [Element; 12] = [
    Element::Fire,  // Aries
    Element::Earth, // Taurus
    Element::Air,   // Gemini
    Element::Water, // Cancer
    Element::Fire,  // Leo
    Element::Earth, // Virgo
    Element::Air,   // Libra
    Element::Water, // Scorpio
    Element::Fire,  // Sagittarius
    Element::Earth, // Capricorn
    Element::Air,   // Aquarius
    Element::Water, // Pisces
];

const SIGN_MODES: [Mode; 12] = [
    Mode::Cardinal, // Aries
    Mode::Fixed,    // Taurus
    Mode::Mutable,  // Gemini
    Mode::Cardinal, // Cancer
    Mode::Fixed,    // Leo
    Mode::Mutable,  // Virgo
    Mode::Cardinal, // Libra
    Mode::Fixed,    // Scorpio
    Mode::Mutable,  // Sagittarius
    Mode::Cardinal, // Capricorn
    Mode::Fixed,    // Aquarius
    Mode::Mutable,  // Pisces
];

pub fn element_of(sign: Sign) -> Element {
    SIGN_ELEMENTS[sign.index()]
}

pub fn mode_of(sign: Sign) -> Mode {
    SIGN_MODES[sign.index()]
}

pub type ElementCounts = BTreeMap<Element, u32>;
pub type ModeCounts = BTreeMap<Mode, u32>;

/// Count elements and modes over a sequence of resolved-or-unknown signs.
///
/// Every key is present in both maps, zero-valued when unused. `None`
/// (an "Unknown" sign) is left out of both tallies.
pub fn tally_signs<I>(signs: I) -> (ElementCounts, ModeCounts)
where
    I: IntoIterator<Item = Option<Sign>>,
{
    let mut elements: ElementCounts = Element::ALL.iter().map(|e| (*e, 0)).collect();
    let mut modes: ModeCounts = Mode::ALL.iter().map(|m| (*m, 0)).collect();

    for sign in signs.into_iter().flatten() {
        *elements.entry(element_of(sign)).or_insert(0) += 1;
        *modes.entry(mode_of(sign)).or_insert(0) += 1;
    }

    (elements, modes)
}
