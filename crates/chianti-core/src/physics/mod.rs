pub mod dilution;
pub mod ionization;

pub use dilution::{dilute, dilute_all};
pub use ionization::qrp;
