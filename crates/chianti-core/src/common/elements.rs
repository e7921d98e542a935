//! Element symbols and spectroscopic ion-stage numerals covered by the database.
//!
//! Symbols are stored lowercase, matching the directory and file naming
//! convention of the data tree (`fe/fe_13/fe_13.splups`).

pub const MAX_ATOMIC_NUMBER: u32 = 30;

const ELEMENT_SYMBOLS: [&str; MAX_ATOMIC_NUMBER as usize] = [
    "h", "he", "li", "be", "b", "c", "n", "o", "f", "ne", "na", "mg", "al", "si", "p", "s", "cl",
    "ar", "k", "ca", "sc", "ti", "v", "cr", "mn", "fe", "co", "ni", "cu", "zn",
];

/// Roman numerals for ion stages `1..=MAX_ATOMIC_NUMBER + 1` (neutral through bare nucleus).
const ION_STAGES: [&str; MAX_ATOMIC_NUMBER as usize + 1] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII", "XIV", "XV",
    "XVI", "XVII", "XVIII", "XIX", "XX", "XXI", "XXII", "XXIII", "XXIV", "XXV", "XXVI", "XXVII",
    "XXVIII", "XXIX", "XXX", "XXXI",
];

/// Lowercase element symbol for atomic number `z` (`26 -> "fe"`).
pub fn element_symbol(atomic_number: u32) -> Option<&'static str> {
    let index = index_for_atomic_number(atomic_number)?;
    Some(ELEMENT_SYMBOLS[index])
}

/// Atomic number for an element symbol, ignoring case and surrounding whitespace.
pub fn atomic_number(symbol: &str) -> Option<u32> {
    let normalized = symbol.trim();
    if normalized.is_empty() {
        return None;
    }

    ELEMENT_SYMBOLS
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(normalized))
        .map(|index| index as u32 + 1)
}

/// Capitalized symbol as written in spectroscopic notation (`"Fe"`).
pub fn capitalized_symbol(atomic_number: u32) -> Option<String> {
    let symbol = element_symbol(atomic_number)?;
    let mut chars = symbol.chars();
    let first = chars.next()?;
    Some(first.to_ascii_uppercase().to_string() + chars.as_str())
}

/// Roman numeral for ion stage `stage` (`13 -> "XIII"`).
pub fn ion_stage_numeral(stage: u32) -> Option<&'static str> {
    if stage == 0 {
        return None;
    }
    ION_STAGES.get(stage as usize - 1).copied()
}

/// Ion stage for a roman numeral, ignoring case.
pub fn ion_stage_from_numeral(numeral: &str) -> Option<u32> {
    let normalized = numeral.trim();
    ION_STAGES
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(normalized))
        .map(|index| index as u32 + 1)
}

const fn index_for_atomic_number(atomic_number: u32) -> Option<usize> {
    if atomic_number == 0 || atomic_number > MAX_ATOMIC_NUMBER {
        None
    } else {
        Some(atomic_number as usize - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        atomic_number, capitalized_symbol, element_symbol, ion_stage_from_numeral,
        ion_stage_numeral, MAX_ATOMIC_NUMBER,
    };

    #[test]
    fn lookup_rejects_out_of_range_atomic_numbers() {
        assert!(element_symbol(0).is_none());
        assert!(element_symbol(MAX_ATOMIC_NUMBER + 1).is_none());
        assert_eq!(element_symbol(1), Some("h"));
        assert_eq!(element_symbol(MAX_ATOMIC_NUMBER), Some("zn"));
    }

    #[test]
    fn known_symbol_roundtrip_matches_atomic_number() {
        assert_eq!(atomic_number("fe"), Some(26));
        assert_eq!(atomic_number("Fe"), Some(26));
        assert_eq!(atomic_number(" HE "), Some(2));
        assert_eq!(atomic_number(""), None);
        assert_eq!(atomic_number("xx"), None);

        for z in 1..=MAX_ATOMIC_NUMBER {
            let symbol = element_symbol(z).expect("symbol should exist for in-range z");
            assert_eq!(atomic_number(symbol), Some(z));
        }
    }

    #[test]
    fn capitalized_symbol_uppercases_first_letter_only() {
        assert_eq!(capitalized_symbol(26).as_deref(), Some("Fe"));
        assert_eq!(capitalized_symbol(8).as_deref(), Some("O"));
        assert_eq!(capitalized_symbol(0), None);
    }

    #[test]
    fn ion_stage_numerals_cover_neutral_through_bare_nucleus() {
        assert_eq!(ion_stage_numeral(0), None);
        assert_eq!(ion_stage_numeral(1), Some("I"));
        assert_eq!(ion_stage_numeral(13), Some("XIII"));
        assert_eq!(ion_stage_numeral(MAX_ATOMIC_NUMBER + 1), Some("XXXI"));
        assert_eq!(ion_stage_numeral(MAX_ATOMIC_NUMBER + 2), None);

        assert_eq!(ion_stage_from_numeral("xiv"), Some(14));
        assert_eq!(ion_stage_from_numeral("IIII"), None);
    }
}
