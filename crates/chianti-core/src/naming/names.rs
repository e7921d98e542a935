use serde::Serialize;

use crate::common::{
    atomic_number, capitalized_symbol, element_symbol, ion_stage_from_numeral, ion_stage_numeral,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IonNameError {
    #[error("unknown element symbol '{symbol}'")]
    UnknownElement { symbol: String },
    #[error("unknown atomic number {atomic_number}")]
    UnknownAtomicNumber { atomic_number: u32 },
    #[error("unknown ion-stage numeral '{numeral}'")]
    UnknownNumeral { numeral: String },
    #[error("ion stage {stage} is out of range for Z={atomic_number}")]
    StageOutOfRange { atomic_number: u32, stage: u32 },
    #[error("malformed ion name '{name}' (expected e.g. 'fe_13' or 'fe_13d')")]
    MalformedName { name: String },
}

/// Ion stages run from 1 (neutral) to `z + 1` (bare nucleus).
fn stage_in_range(atomic_number: u32, stage: u32) -> bool {
    stage >= 1 && stage <= atomic_number.saturating_add(1)
}

/// Database name of an ion: `(26, 13, false) -> "fe_13"`, `(26, 13, true) -> "fe_13d"`.
///
/// Returns `None` for stage 0, stages above `z + 1`, and elements outside the
/// table.
pub fn zion_to_name(atomic_number: u32, stage: u32, dielectronic: bool) -> Option<String> {
    let symbol = element_symbol(atomic_number)?;
    if !stage_in_range(atomic_number, stage) {
        return None;
    }
    let suffix = if dielectronic { "d" } else { "" };
    Some(format!("{symbol}_{stage}{suffix}"))
}

/// Spectroscopic notation: `(26, 13, false) -> "Fe XIII"`, dielectronic adds `" d"`.
pub fn zion_to_spectroscopic(atomic_number: u32, stage: u32, dielectronic: bool) -> Option<String> {
    let symbol = capitalized_symbol(atomic_number)?;
    if !stage_in_range(atomic_number, stage) {
        return None;
    }
    let numeral = ion_stage_numeral(stage)?;
    let suffix = if dielectronic { " d" } else { "" };
    Some(format!("{symbol} {numeral}{suffix}"))
}

/// `("Fe", "xi") -> "fe_11"`. Both parts are case-insensitive.
pub fn spectroscopic_to_name(element: &str, numeral: &str) -> Result<String, IonNameError> {
    let z = atomic_number(element).ok_or_else(|| IonNameError::UnknownElement {
        symbol: element.trim().to_string(),
    })?;
    let stage = ion_stage_from_numeral(numeral).ok_or_else(|| IonNameError::UnknownNumeral {
        numeral: numeral.trim().to_string(),
    })?;
    zion_to_name(z, stage, false).ok_or(IonNameError::StageOutOfRange {
        atomic_number: z,
        stage,
    })
}

/// Everything recoverable from an ion name such as `fe_13d`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IonDescriptor {
    pub atomic_number: u32,
    pub stage: u32,
    pub dielectronic: bool,
    pub element: String,
    /// Next ionization stage, absent for the bare nucleus.
    pub higher: Option<String>,
    /// Previous ionization stage, absent for the neutral atom.
    pub lower: Option<String>,
}

impl IonDescriptor {
    pub fn new(atomic_number: u32, stage: u32, dielectronic: bool) -> Result<Self, IonNameError> {
        let element = element_symbol(atomic_number)
            .ok_or(IonNameError::UnknownAtomicNumber { atomic_number })?;
        if !stage_in_range(atomic_number, stage) {
            return Err(IonNameError::StageOutOfRange {
                atomic_number,
                stage,
            });
        }

        Ok(Self {
            atomic_number,
            stage,
            dielectronic,
            element: element.to_string(),
            higher: zion_to_name(atomic_number, stage + 1, false),
            lower: zion_to_name(atomic_number, stage - 1, false),
        })
    }

    pub fn parse(name: &str) -> Result<Self, IonNameError> {
        let malformed = || IonNameError::MalformedName {
            name: name.to_string(),
        };

        let (element, stage_part) = name.trim().split_once('_').ok_or_else(malformed)?;
        let element = element.trim();
        let stage_part = stage_part.trim();

        let (digits, dielectronic) = match stage_part.strip_suffix(['d', 'D']) {
            Some(digits) => (digits, true),
            None => (stage_part, false),
        };
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(malformed());
        }
        let stage = digits.parse::<u32>().map_err(|_| malformed())?;

        let z = atomic_number(element).ok_or_else(|| IonNameError::UnknownElement {
            symbol: element.to_string(),
        })?;
        Self::new(z, stage, dielectronic)
    }

    /// Canonical database name (`fe_13`, `fe_13d`).
    pub fn name(&self) -> String {
        let suffix = if self.dielectronic { "d" } else { "" };
        format!("{}_{}{suffix}", self.element, self.stage)
    }

    pub fn spectroscopic(&self) -> Option<String> {
        zion_to_spectroscopic(self.atomic_number, self.stage, self.dielectronic)
    }
}
