//! Burgess-Tully reduction of excitation collision strengths and ionization
//! cross-sections onto a bounded, dimensionless energy coordinate.
//!
//! Both variants share the energy map
//!
//! ```text
//! u   = E / E1
//! bte = 1 - ln(f) / ln(u - 1 + f)
//! u   = 1 - f + exp(ln(f) / (1 - bte))        (inverse)
//! ```
//!
//! and differ only in how the value is normalized:
//!
//! - excitation: `omega / (ln(u) - 1 + e)`
//! - ionization: `u · sigma · E1² / (ln(u) + 1)`
//!
//! References: Burgess & Tully 1992, A&A 254, 436; Dere 2007, A&A 466, 771.

use serde::{Deserialize, Serialize};

use crate::common::constants::BT_EXCITATION_OFFSET;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurgessTullyKind {
    /// Electron-impact excitation collision strengths.
    Excitation,
    /// Ionization cross-sections.
    Ionization,
}

/// Points in the reduced domain: scaled energy and scaled collision strength
/// or cross-section, index-aligned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaledSeries {
    pub energy: Vec<f64>,
    pub value: Vec<f64>,
}

/// Points in the physical domain: energy (units of the threshold energy) and collision
/// strength or cross-section, index-aligned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhysicalSeries {
    pub energy: Vec<f64>,
    pub value: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScalingError {
    #[error("Burgess-Tully scale factor must lie in (0, 1), got {value}")]
    ScaleFactorOutOfRange { value: f64 },
    #[error("threshold energy must be finite and > 0, got {value}")]
    InvalidThresholdEnergy { value: f64 },
    #[error("energy/value length mismatch: energy={energy}, value={value}")]
    LengthMismatch { energy: usize, value: usize },
    #[error("input '{field}' must be finite, index {index} got {value}")]
    NonFiniteInput {
        field: &'static str,
        index: usize,
        value: f64,
    },
    #[error("reduced energy u={reduced_energy} at index {index} must exceed 1 - f = {minimum}")]
    BelowScalingDomain {
        index: usize,
        reduced_energy: f64,
        minimum: f64,
    },
    #[error("scaled energy at index {index} equals 1 and cannot be descaled")]
    SingularScaledEnergy { index: usize },
    #[error("Burgess-Tully transform produced a non-finite result at index {index}")]
    NonFiniteResult { index: usize },
}

/// Scaled energy coordinate for reduced energy `u = E/E1`.
pub fn scaled_energy(reduced_energy: f64, scale_factor: f64) -> f64 {
    1.0 - scale_factor.ln() / (reduced_energy - 1.0 + scale_factor).ln()
}

/// Reduced energy `u = E/E1` recovered from a scaled energy coordinate.
pub fn reduced_energy(scaled_energy: f64, scale_factor: f64) -> f64 {
    1.0 - scale_factor + (scale_factor.ln() / (1.0 - scaled_energy)).exp()
}

/// Scale excitation energies and collision strengths.
pub fn scale_bt(
    energy: &[f64],
    omega: &[f64],
    scale_factor: f64,
    threshold_energy: f64,
) -> Result<ScaledSeries, ScalingError> {
    scale(
        BurgessTullyKind::Excitation,
        energy,
        omega,
        scale_factor,
        threshold_energy,
    )
}

/// Exact inverse of [`scale_bt`].
pub fn descale_bt(
    scaled_energy: &[f64],
    scaled_omega: &[f64],
    scale_factor: f64,
    threshold_energy: f64,
) -> Result<PhysicalSeries, ScalingError> {
    descale(
        BurgessTullyKind::Excitation,
        scaled_energy,
        scaled_omega,
        scale_factor,
        threshold_energy,
    )
}

/// Scale ionization energies and cross-sections.
pub fn scale_bti(
    energy: &[f64],
    cross_section: &[f64],
    scale_factor: f64,
    threshold_energy: f64,
) -> Result<ScaledSeries, ScalingError> {
    scale(
        BurgessTullyKind::Ionization,
        energy,
        cross_section,
        scale_factor,
        threshold_energy,
    )
}

/// Exact inverse of [`scale_bti`].
pub fn descale_bti(
    scaled_energy: &[f64],
    scaled_cross_section: &[f64],
    scale_factor: f64,
    threshold_energy: f64,
) -> Result<PhysicalSeries, ScalingError> {
    descale(
        BurgessTullyKind::Ionization,
        scaled_energy,
        scaled_cross_section,
        scale_factor,
        threshold_energy,
    )
}

pub fn scale(
    kind: BurgessTullyKind,
    energy: &[f64],
    value: &[f64],
    scale_factor: f64,
    threshold_energy: f64,
) -> Result<ScaledSeries, ScalingError> {
    validate_inputs(energy, value, scale_factor, threshold_energy)?;

    let minimum = 1.0 - scale_factor;
    let mut scaled = ScaledSeries {
        energy: Vec::with_capacity(energy.len()),
        value: Vec::with_capacity(energy.len()),
    };

    for (index, (&sample_energy, &sample_value)) in energy.iter().zip(value).enumerate() {
        let u = sample_energy / threshold_energy;
        if u <= minimum {
            return Err(ScalingError::BelowScalingDomain {
                index,
                reduced_energy: u,
                minimum,
            });
        }

        let bte = scaled_energy(u, scale_factor);
        let normalized = match kind {
            BurgessTullyKind::Excitation => sample_value / (u.ln() + BT_EXCITATION_OFFSET),
            BurgessTullyKind::Ionization => {
                u * sample_value * threshold_energy * threshold_energy / (u.ln() + 1.0)
            }
        };

        if !bte.is_finite() || !normalized.is_finite() {
            return Err(ScalingError::NonFiniteResult { index });
        }
        scaled.energy.push(bte);
        scaled.value.push(normalized);
    }

    Ok(scaled)
}

pub fn descale(
    kind: BurgessTullyKind,
    scaled_energy: &[f64],
    scaled_value: &[f64],
    scale_factor: f64,
    threshold_energy: f64,
) -> Result<PhysicalSeries, ScalingError> {
    validate_inputs(scaled_energy, scaled_value, scale_factor, threshold_energy)?;

    if let Some(index) = scaled_energy.iter().position(|&bte| bte == 1.0) {
        return Err(ScalingError::SingularScaledEnergy { index });
    }

    let mut physical = PhysicalSeries {
        energy: Vec::with_capacity(scaled_energy.len()),
        value: Vec::with_capacity(scaled_energy.len()),
    };

    for (index, (&bte, &value)) in scaled_energy.iter().zip(scaled_value).enumerate() {
        let u = reduced_energy(bte, scale_factor);
        let restored = match kind {
            BurgessTullyKind::Excitation => (u.ln() + BT_EXCITATION_OFFSET) * value,
            BurgessTullyKind::Ionization => {
                (u.ln() + 1.0) * value / (u * threshold_energy * threshold_energy)
            }
        };
        let energy = u * threshold_energy;

        if !energy.is_finite() || !restored.is_finite() {
            return Err(ScalingError::NonFiniteResult { index });
        }
        physical.energy.push(energy);
        physical.value.push(restored);
    }

    Ok(physical)
}

fn validate_inputs(
    energy: &[f64],
    value: &[f64],
    scale_factor: f64,
    threshold_energy: f64,
) -> Result<(), ScalingError> {
    if !(scale_factor > 0.0 && scale_factor < 1.0) {
        return Err(ScalingError::ScaleFactorOutOfRange {
            value: scale_factor,
        });
    }
    if !(threshold_energy.is_finite() && threshold_energy > 0.0) {
        return Err(ScalingError::InvalidThresholdEnergy {
            value: threshold_energy,
        });
    }
    if energy.len() != value.len() {
        return Err(ScalingError::LengthMismatch {
            energy: energy.len(),
            value: value.len(),
        });
    }

    for (field, values) in [("energy", energy), ("value", value)] {
        if let Some((index, &bad)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ScalingError::NonFiniteInput {
                field,
                index,
                value: bad,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        descale_bt, descale_bti, reduced_energy, scale_bt, scale_bti, scaled_energy,
        ScalingError,
    };
    use crate::numerics::within_tolerance;

    const SCALE_FACTORS: [f64; 3] = [0.2, 0.5, 0.8];
    const REDUCED_ENERGIES: [f64; 4] = [1.1, 2.5, 7.0, 120.0];

    #[test]
    fn excitation_round_trip_recovers_energy_and_collision_strength() {
        let threshold = 3.7;
        let energy: Vec<f64> = REDUCED_ENERGIES.iter().map(|u| u * threshold).collect();
        let omega = [0.31, 1.0, 2.4, 17.5];

        for f in SCALE_FACTORS {
            let scaled = scale_bt(&energy, &omega, f, threshold).expect("scale");
            let physical = descale_bt(&scaled.energy, &scaled.value, f, threshold).expect("descale");

            for index in 0..energy.len() {
                assert!(
                    within_tolerance(physical.energy[index], energy[index], 1.0e-12, 1.0e-9, 1.0e-12),
                    "f={f} energy[{index}]: {} vs {}",
                    physical.energy[index],
                    energy[index]
                );
                assert!(
                    within_tolerance(physical.value[index], omega[index], 1.0e-12, 1.0e-9, 1.0e-12),
                    "f={f} omega[{index}]: {} vs {}",
                    physical.value[index],
                    omega[index]
                );
            }
        }
    }

    #[test]
    fn ionization_round_trip_recovers_energy_and_cross_section() {
        let threshold = 12.5;
        let energy: Vec<f64> = REDUCED_ENERGIES.iter().map(|u| u * threshold).collect();
        let cross = [1.0e-18, 4.2e-18, 2.5e-18, 3.0e-19];

        for f in SCALE_FACTORS {
            let scaled = scale_bti(&energy, &cross, f, threshold).expect("scale");
            let physical =
                descale_bti(&scaled.energy, &scaled.value, f, threshold).expect("descale");

            for index in 0..energy.len() {
                assert!(within_tolerance(
                    physical.energy[index],
                    energy[index],
                    1.0e-12,
                    1.0e-9,
                    1.0e-12
                ));
                assert!(within_tolerance(
                    physical.value[index],
                    cross[index],
                    0.0,
                    1.0e-9,
                    1.0e-30
                ));
            }
        }
    }

    #[test]
    fn excitation_scaling_matches_closed_form_example() {
        let scaled = scale_bt(&[2.0], &[1.0], 0.5, 1.0).expect("scale");
        let expected_energy = 1.0 - 0.5_f64.ln() / 1.5_f64.ln();
        let expected_omega = 1.0 / (2.0_f64.ln() - 1.0 + std::f64::consts::E);
        assert!((scaled.energy[0] - expected_energy).abs() < 1.0e-12);
        assert!((scaled.value[0] - expected_omega).abs() < 1.0e-12);

        let physical = descale_bt(&scaled.energy, &scaled.value, 0.5, 1.0).expect("descale");
        assert!((physical.energy[0] - 2.0).abs() < 1.0e-12);
        assert!((physical.value[0] - 1.0).abs() < 1.0e-12);
    }

    #[test]
    fn ionization_scaling_matches_closed_form_example() {
        let scaled = scale_bti(&[4.0], &[1.0], 0.5, 2.0).expect("scale");
        let expected = 2.0 * 1.0 * 4.0 / (2.0_f64.ln() + 1.0);
        assert!((scaled.value[0] - expected).abs() < 1.0e-12);
    }

    #[test]
    fn threshold_maps_to_zero_scaled_energy() {
        for f in SCALE_FACTORS {
            assert!(scaled_energy(1.0, f).abs() < 1.0e-15);
            assert!((reduced_energy(0.0, f) - 1.0).abs() < 1.0e-12);
        }
    }

    #[test]
    fn scale_factor_outside_open_unit_interval_is_rejected() {
        for f in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let error = scale_bt(&[2.0], &[1.0], f, 1.0).expect_err("invalid f");
            assert!(matches!(error, ScalingError::ScaleFactorOutOfRange { .. }));

            let error = descale_bti(&[0.5], &[1.0], f, 1.0).expect_err("invalid f");
            assert!(matches!(error, ScalingError::ScaleFactorOutOfRange { .. }));
        }
    }

    #[test]
    fn descaling_rejects_unit_scaled_energy() {
        let error = descale_bt(&[0.2, 1.0], &[1.0, 1.0], 0.5, 1.0).expect_err("bte == 1");
        assert_eq!(error, ScalingError::SingularScaledEnergy { index: 1 });
    }

    #[test]
    fn scaling_rejects_energies_outside_logarithm_domain() {
        let error = scale_bti(&[1.0, 0.25], &[1.0, 1.0], 0.5, 1.0).expect_err("u <= 1 - f");
        assert_eq!(
            error,
            ScalingError::BelowScalingDomain {
                index: 1,
                reduced_energy: 0.25,
                minimum: 0.5
            }
        );
    }

    #[test]
    fn shape_and_threshold_preconditions_are_checked() {
        assert_eq!(
            scale_bt(&[2.0, 3.0], &[1.0], 0.5, 1.0),
            Err(ScalingError::LengthMismatch {
                energy: 2,
                value: 1
            })
        );
        assert_eq!(
            scale_bt(&[2.0], &[1.0], 0.5, 0.0),
            Err(ScalingError::InvalidThresholdEnergy { value: 0.0 })
        );
        assert!(matches!(
            descale_bt(&[0.5], &[f64::INFINITY], 0.5, 1.0),
            Err(ScalingError::NonFiniteInput { field: "value", index: 0, .. })
        ));
    }

    #[test]
    fn logarithm_pole_surfaces_as_non_finite_result() {
        // u - 1 + f == 1 puts ln(u - 1 + f) at zero.
        let error = scale_bt(&[1.5], &[1.0], 0.5, 1.0).expect_err("pole");
        assert_eq!(error, ScalingError::NonFiniteResult { index: 0 });
    }
}
