pub mod burgess_tully;
pub mod splom;
pub mod table;

pub use burgess_tully::{
    descale, descale_bt, descale_bti, reduced_energy, scale, scale_bt, scale_bti, scaled_energy,
    BurgessTullyKind, PhysicalSeries, ScaledSeries, ScalingError,
};
pub use splom::{
    splom_descale, splom_descale_columns, DescaledOmega, OmegaGrid, SplineTable, SplomError,
    SplomTable, TransformType,
};
pub use table::{load_splom_table, parse_splom_table, SplomColumns, SplomTableLoadError};
