//! Descaling of 5-point spline tables into physical collision strengths.
//!
//! Each table row holds a threshold energy (Rydberg), a Burgess-Tully
//! transform type, a scale parameter `c` and the reduced collision strength
//! sampled at the nodes `{0, 0.25, 0.5, 0.75, 1}`. For an energy `E` (eV) the
//! row is evaluated at `x = E / (threshold · RYD_TO_EV)`; energies below
//! threshold (`x < 1`) contribute zero.

use serde::Serialize;
use tracing::{debug, trace};

use crate::common::constants::{EULER, RYD_TO_EV, SPLOM_NODE_COUNT, SPLOM_NODES};
use crate::numerics::{CubicSpline, SplineError};

/// Burgess-Tully transition classes selecting the abscissa map and post-factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformType {
    /// Type 1, electric-dipole allowed: `sx = 1 - ln c / ln(x - 1 + c)`,
    /// result `spline(sx) · ln(x - 1 + e)`.
    DipoleAllowed,
    /// Type 2, forbidden: `sx = (x - 1)/(x - 1 + c)`, result `spline(sx)`.
    Forbidden,
    /// Type 3, spin change: type 2 abscissa, result `spline(sx) / x²`.
    SpinChange,
    /// Type 4, allowed with small oscillator strength: type 1 abscissa,
    /// result `spline(sx) · ln(x - 1 + c)`.
    WeakDipole,
}

impl TransformType {
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::DipoleAllowed),
            2 => Some(Self::Forbidden),
            3 => Some(Self::SpinChange),
            4 => Some(Self::WeakDipole),
            _ => None,
        }
    }

    pub const fn code(self) -> i64 {
        match self {
            Self::DipoleAllowed => 1,
            Self::Forbidden => 2,
            Self::SpinChange => 3,
            Self::WeakDipole => 4,
        }
    }

    /// Spline abscissa for reduced energy `x >= 1`.
    pub fn abscissa(self, x: f64, c: f64) -> f64 {
        match self {
            Self::DipoleAllowed | Self::WeakDipole => 1.0 - c.ln() / (x - 1.0 + c).ln(),
            Self::Forbidden | Self::SpinChange => (x - 1.0) / (x - 1.0 + c),
        }
    }

    /// Physical collision strength from the spline value at [`Self::abscissa`].
    pub fn restore(self, spline_value: f64, x: f64, c: f64) -> f64 {
        match self {
            Self::DipoleAllowed => spline_value * (x - 1.0 + EULER).ln(),
            Self::Forbidden => spline_value,
            Self::SpinChange => spline_value / (x * x),
            Self::WeakDipole => spline_value * (x - 1.0 + c).ln(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplomError {
    #[error("spline table row {row} has unsupported transform type {code}; expected 1, 2, 3 or 4")]
    UnsupportedTransformType { row: usize, code: i64 },
    #[error("spline table row {row} must have {expected} ordinates, got {actual}")]
    OrdinateCountMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("spline table row {row} threshold must be finite and > 0 Ryd, got {value}")]
    InvalidThreshold { row: usize, value: f64 },
    #[error("spline table row {row} scale parameter must be finite and > 0, got {value}")]
    InvalidScaleParameter { row: usize, value: f64 },
    #[error("spline table column '{column}' has length {actual}, expected {expected}")]
    ColumnLengthMismatch {
        column: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("spline table row {row} could not be interpolated: {source}")]
    Spline { row: usize, source: SplineError },
    #[error("descaling requires at least one energy sample")]
    EmptyEnergyGrid,
}

/// One transition's tabulated reduced collision strength.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineTable {
    threshold_ryd: f64,
    transform: TransformType,
    scale_parameter: f64,
    ordinates: [f64; SPLOM_NODE_COUNT],
    spline: CubicSpline,
}

impl SplineTable {
    /// Validate one row given in the raw database encoding. Errors report row 0.
    pub fn new(
        threshold_ryd: f64,
        transform_code: i64,
        scale_parameter: f64,
        ordinates: &[f64],
    ) -> Result<Self, SplomError> {
        Self::from_row(0, threshold_ryd, transform_code, scale_parameter, ordinates)
    }

    pub fn with_transform(
        threshold_ryd: f64,
        transform: TransformType,
        scale_parameter: f64,
        ordinates: [f64; SPLOM_NODE_COUNT],
    ) -> Result<Self, SplomError> {
        Self::build(0, threshold_ryd, transform, scale_parameter, ordinates)
    }

    fn from_row(
        row: usize,
        threshold_ryd: f64,
        transform_code: i64,
        scale_parameter: f64,
        ordinates: &[f64],
    ) -> Result<Self, SplomError> {
        let transform = TransformType::from_code(transform_code).ok_or(
            SplomError::UnsupportedTransformType {
                row,
                code: transform_code,
            },
        )?;
        let ordinates: [f64; SPLOM_NODE_COUNT] =
            ordinates.try_into().map_err(|_| SplomError::OrdinateCountMismatch {
                row,
                expected: SPLOM_NODE_COUNT,
                actual: ordinates.len(),
            })?;

        Self::build(row, threshold_ryd, transform, scale_parameter, ordinates)
    }

    fn build(
        row: usize,
        threshold_ryd: f64,
        transform: TransformType,
        scale_parameter: f64,
        ordinates: [f64; SPLOM_NODE_COUNT],
    ) -> Result<Self, SplomError> {
        if !(threshold_ryd.is_finite() && threshold_ryd > 0.0) {
            return Err(SplomError::InvalidThreshold {
                row,
                value: threshold_ryd,
            });
        }
        if !(scale_parameter.is_finite() && scale_parameter > 0.0) {
            return Err(SplomError::InvalidScaleParameter {
                row,
                value: scale_parameter,
            });
        }

        let spline = CubicSpline::interpolate(&SPLOM_NODES, &ordinates)
            .map_err(|source| SplomError::Spline { row, source })?;

        Ok(Self {
            threshold_ryd,
            transform,
            scale_parameter,
            ordinates,
            spline,
        })
    }

    pub fn threshold_ryd(&self) -> f64 {
        self.threshold_ryd
    }

    pub fn threshold_ev(&self) -> f64 {
        self.threshold_ryd * RYD_TO_EV
    }

    pub fn transform(&self) -> TransformType {
        self.transform
    }

    pub fn scale_parameter(&self) -> f64 {
        self.scale_parameter
    }

    pub fn ordinates(&self) -> &[f64; SPLOM_NODE_COUNT] {
        &self.ordinates
    }

    /// Collision strength at `energy` (eV): zero below threshold, clipped at zero.
    pub fn collision_strength(&self, energy: f64) -> f64 {
        let x = energy / self.threshold_ev();
        if x.is_nan() || x < 1.0 {
            return 0.0;
        }

        let sx = self.transform.abscissa(x, self.scale_parameter);
        let omega = self
            .transform
            .restore(self.spline.evaluate(sx), x, self.scale_parameter);
        clip_unphysical(omega)
    }

    fn descale_into(&self, row: usize, energies: &[f64], out: &mut [f64]) {
        let threshold_ev = self.threshold_ev();
        debug!(
            row,
            threshold_ryd = self.threshold_ryd,
            threshold_ev,
            transform = self.transform.code(),
            "descaling spline table row"
        );

        let mut above_threshold = 0usize;
        for (slot, &energy) in out.iter_mut().zip(energies) {
            if energy / threshold_ev >= 1.0 {
                above_threshold += 1;
                *slot = self.collision_strength(energy);
            }
        }

        if above_threshold == 0 {
            trace!(row, threshold_ev, "no energy sample above threshold");
        }
    }
}

/// Ordered spline table rows, one per transition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplomTable {
    rows: Vec<SplineTable>,
}

impl SplomTable {
    pub fn new(rows: Vec<SplineTable>) -> Self {
        Self { rows }
    }

    /// Build rows from the column layout of the database reader: per-row
    /// thresholds, transform codes and scale parameters, plus the ordinate
    /// matrix as `SPLOM_NODE_COUNT` node rows of one value per transition.
    pub fn from_columns(
        deryd: &[f64],
        ttype: &[i64],
        c: &[f64],
        splom: &[Vec<f64>],
    ) -> Result<Self, SplomError> {
        let row_count = deryd.len();
        for (column, actual) in [("ttype", ttype.len()), ("c", c.len())] {
            if actual != row_count {
                return Err(SplomError::ColumnLengthMismatch {
                    column,
                    expected: row_count,
                    actual,
                });
            }
        }
        if let Some(node_row) = splom.iter().find(|node_row| node_row.len() != row_count) {
            return Err(SplomError::ColumnLengthMismatch {
                column: "splom",
                expected: row_count,
                actual: node_row.len(),
            });
        }

        let rows = (0..row_count)
            .map(|row| {
                let ordinates: Vec<f64> = splom.iter().map(|node_row| node_row[row]).collect();
                SplineTable::from_row(row, deryd[row], ttype[row], c[row], &ordinates)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[SplineTable] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, row: SplineTable) {
        self.rows.push(row);
    }

    pub fn descale(&self, energies: &[f64]) -> Result<DescaledOmega, SplomError> {
        splom_descale(self, energies)
    }
}

/// Collision strengths laid out row-major: one row per table row, one column
/// per energy sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OmegaGrid {
    rows: usize,
    energies: usize,
    values: Vec<f64>,
}

impl OmegaGrid {
    fn zeros(rows: usize, energies: usize) -> Self {
        Self {
            rows,
            energies,
            values: vec![0.0; rows * energies],
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn energy_count(&self) -> usize {
        self.energies
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        self.values.get(row * self.energies..(row + 1) * self.energies)
    }

    pub fn value(&self, row: usize, energy_index: usize) -> Option<f64> {
        if row >= self.rows || energy_index >= self.energies {
            return None;
        }
        Some(self.values[row * self.energies + energy_index])
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows)
            .filter_map(|row| self.row(row))
            .map(<[f64]>::to_vec)
            .collect()
    }
}

/// Descaled collision strengths: a grid for multi-sample energy grids, or a
/// single value per row when exactly one energy was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DescaledOmega {
    Grid(OmegaGrid),
    Column(Vec<f64>),
}

impl DescaledOmega {
    pub fn row_count(&self) -> usize {
        match self {
            Self::Grid(grid) => grid.row_count(),
            Self::Column(values) => values.len(),
        }
    }

    pub fn energy_count(&self) -> usize {
        match self {
            Self::Grid(grid) => grid.energy_count(),
            Self::Column(_) => 1,
        }
    }

    pub fn value(&self, row: usize, energy_index: usize) -> Option<f64> {
        match self {
            Self::Grid(grid) => grid.value(row, energy_index),
            Self::Column(values) if energy_index == 0 => values.get(row).copied(),
            Self::Column(_) => None,
        }
    }

    /// All values, row-major.
    pub fn values(&self) -> &[f64] {
        match self {
            Self::Grid(grid) => grid.values(),
            Self::Column(values) => values,
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        match self {
            Self::Grid(grid) => grid.to_rows(),
            Self::Column(values) => values.iter().map(|value| vec![*value]).collect(),
        }
    }
}

/// Physical collision strength of every table row at every energy (eV).
///
/// Energies need not be sorted; below-threshold samples are zero in place.
/// All results are non-negative.
pub fn splom_descale(table: &SplomTable, energies: &[f64]) -> Result<DescaledOmega, SplomError> {
    if energies.is_empty() {
        return Err(SplomError::EmptyEnergyGrid);
    }

    let mut grid = OmegaGrid::zeros(table.len(), energies.len());
    for (row, spline_row) in table.rows().iter().enumerate() {
        let start = row * energies.len();
        spline_row.descale_into(row, energies, &mut grid.values[start..start + energies.len()]);
    }

    if energies.len() == 1 {
        Ok(DescaledOmega::Column(grid.values))
    } else {
        Ok(DescaledOmega::Grid(grid))
    }
}

/// Validate raw table columns and descale them in one step.
pub fn splom_descale_columns(
    deryd: &[f64],
    ttype: &[i64],
    c: &[f64],
    splom: &[Vec<f64>],
    energies: &[f64],
) -> Result<DescaledOmega, SplomError> {
    let table = SplomTable::from_columns(deryd, ttype, c, splom)?;
    splom_descale(&table, energies)
}

/// Non-positive and non-finite collision strengths are unphysical.
fn clip_unphysical(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
