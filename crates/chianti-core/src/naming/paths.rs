//! Locations of per-ion files inside a database tree laid out as
//! `<root>/<element>/<ion>/<ion>.<ext>`.

use std::path::{Path, PathBuf};

use super::names::{zion_to_name, IonDescriptor, IonNameError};
use crate::common::element_symbol;

/// `<root>/fe/fe_13` for `(26, 13)`.
pub fn zion_dir(
    root: impl AsRef<Path>,
    atomic_number: u32,
    stage: u32,
    dielectronic: bool,
) -> Option<PathBuf> {
    let symbol = element_symbol(atomic_number)?;
    let name = zion_to_name(atomic_number, stage, dielectronic)?;
    Some(root.as_ref().join(symbol).join(name))
}

/// File stem shared by every data file of an ion: `<root>/fe/fe_13/fe_13`.
pub fn zion_filename(
    root: impl AsRef<Path>,
    atomic_number: u32,
    stage: u32,
    dielectronic: bool,
) -> Option<PathBuf> {
    let name = zion_to_name(atomic_number, stage, dielectronic)?;
    let dir = zion_dir(root, atomic_number, stage, dielectronic)?;
    Some(dir.join(name))
}

/// [`zion_filename`] rooted at the current directory.
pub fn zion_local_filename(atomic_number: u32, stage: u32, dielectronic: bool) -> Option<PathBuf> {
    zion_filename(".", atomic_number, stage, dielectronic)
}

/// File stem for an ion given by name (`"fe_13"` -> `<root>/fe/fe_13/fe_13`).
pub fn ion_filename(root: impl AsRef<Path>, name: &str) -> Result<PathBuf, IonNameError> {
    Ok(IonDescriptor::parse(name)?.filename(root))
}

impl IonDescriptor {
    /// `<root>/<element>/<name>`.
    pub fn directory(&self, root: impl AsRef<Path>) -> PathBuf {
        root.as_ref().join(&self.element).join(self.name())
    }

    pub fn filename(&self, root: impl AsRef<Path>) -> PathBuf {
        self.directory(root).join(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::{ion_filename, zion_dir, zion_filename, zion_local_filename};
    use crate::naming::{IonDescriptor, IonNameError};
    use std::path::{Path, PathBuf};

    #[test]
    fn zion_paths_follow_element_and_ion_directories() {
        let root = Path::new("/data/chianti");
        assert_eq!(
            zion_dir(root, 26, 13, false),
            Some(PathBuf::from("/data/chianti/fe/fe_13"))
        );
        assert_eq!(
            zion_filename(root, 26, 13, true),
            Some(PathBuf::from("/data/chianti/fe/fe_13d/fe_13d"))
        );
        assert_eq!(
            zion_local_filename(8, 6, false),
            Some(Path::new(".").join("o").join("o_6").join("o_6"))
        );
    }

    #[test]
    fn zion_paths_are_absent_outside_the_stage_range() {
        assert_eq!(zion_dir("/db", 26, 0, false), None);
        assert_eq!(zion_filename("/db", 26, 28, false), None);
        assert_eq!(zion_local_filename(31, 1, false), None);
    }

    #[test]
    fn ion_filename_normalizes_the_name() {
        assert_eq!(
            ion_filename("/db", " Fe_13 ").expect("valid ion"),
            PathBuf::from("/db/fe/fe_13/fe_13")
        );
        assert!(matches!(
            ion_filename("/db", "fe-13"),
            Err(IonNameError::MalformedName { .. })
        ));
    }

    #[test]
    fn descriptor_filename_matches_zion_filename() {
        let ion = IonDescriptor::parse("ca_10d").expect("valid ion");
        assert_eq!(
            Some(ion.filename("/db")),
            zion_filename("/db", 20, 10, true)
        );
        assert_eq!(Some(ion.directory("/db")), zion_dir("/db", 20, 10, true));
    }
}
