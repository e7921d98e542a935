pub mod names;
pub mod paths;

pub use names::{
    spectroscopic_to_name, zion_to_name, zion_to_spectroscopic, IonDescriptor, IonNameError,
};
pub use paths::{ion_filename, zion_dir, zion_filename, zion_local_filename};
