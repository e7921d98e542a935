//! Physical and dataset constants shared by the scaling kernels.
//!
//! Values follow the conventions of the CHIANTI atomic database so that
//! descaled collision strengths line up with the tabulated thresholds.

/// Electron volts per Rydberg as used by the database thresholds (`deryd`).
pub const RYD_TO_EV: f64 = 13.605_692_3_f64;
pub const EV_TO_RYD: f64 = 1.0 / RYD_TO_EV;
pub const EULER: f64 = std::f64::consts::E;

/// `e - 1`, the offset in the Burgess-Tully excitation normalization `ln(u) - 1 + e`.
pub const BT_EXCITATION_OFFSET: f64 = EULER - 1.0;

/// Fixed node count of the spline tables in the database format.
pub const SPLOM_NODE_COUNT: usize = 5;

/// Abscissas of the spline table nodes: equally spaced over `[0, 1]`.
pub const SPLOM_NODES: [f64; SPLOM_NODE_COUNT] = [0.0, 0.25, 0.5, 0.75, 1.0];
