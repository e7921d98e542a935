//! Atomic-data utilities for a CHIANTI-style spectral database: ion naming
//! and file layout, closed-form rate helpers, and the Burgess-Tully and
//! five-point spline descaling of tabulated collision strengths.

pub mod common;
pub mod domain;
pub mod naming;
pub mod numerics;
pub mod physics;
pub mod scaling;
