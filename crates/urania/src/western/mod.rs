pub mod dignities;
pub mod elements;
pub mod signs;

pub use dignities::{dignity_of, Dignity};
pub use elements::{element_of, mode_of, tally_signs, Element, ElementCounts, Mode, ModeCounts};
pub use signs::{
    normalize_longitude, sign_name, sign_symbol, Sign, UNKNOWN_SIGN_NAME, UNKNOWN_SIGN_SYMBOL,
};
