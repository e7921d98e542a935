pub mod constants;
pub mod elements;

pub use elements::{
    atomic_number, capitalized_symbol, element_symbol, ion_stage_from_numeral, ion_stage_numeral,
    MAX_ATOMIC_NUMBER,
};
