//! Photo lookup for attendance sheets.

use std::collections::HashSet;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Resolves examinee photo references to image paths.
///
/// Implementations must be cheap to query; the projector asks once per
/// occupied seat.
pub trait PhotoStore: Send + Sync + Debug {
    /// Store name, for logging.
    fn name(&self) -> &'static str;

    /// Path of the image for `reference`, or `None` if it does not exist.
    fn locate(&self, reference: &str) -> Option<PathBuf>;
}

/// Photos stored as files under a root directory.
///
/// A reference is a path relative to the root.
#[derive(Debug, Clone)]
pub struct DirectoryPhotoStore {
    root: PathBuf,
}

impl DirectoryPhotoStore {
    /// Creates a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PhotoStore for DirectoryPhotoStore {
    fn name(&self) -> &'static str {
        "directory"
    }

    fn locate(&self, reference: &str) -> Option<PathBuf> {
        let path = self.root.join(reference);
        path.is_file().then_some(path)
    }
}

/// In-memory set of known photo references.
#[derive(Debug, Clone, Default)]
pub struct PhotoCatalog {
    root: PathBuf,
    known: HashSet<String>,
}

impl PhotoCatalog {
    /// Creates an empty catalog whose paths are reported under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            known: HashSet::new(),
        }
    }

    /// Adds references to the catalog.
    pub fn with_photos<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known.extend(references.into_iter().map(Into::into));
        self
    }

    /// Adds one reference.
    pub fn insert(&mut self, reference: impl Into<String>) {
        self.known.insert(reference.into());
    }

    /// Number of known references.
    pub fn len(&self) -> usize {
        self.known.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

impl PhotoStore for PhotoCatalog {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn locate(&self, reference: &str) -> Option<PathBuf> {
        self.known
            .contains(reference)
            .then(|| self.root.join(reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        let catalog = PhotoCatalog::new("photos").with_photos(["2201CS01.jpg", "2201EE01.jpg"]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.locate("2201CS01.jpg"),
            Some(PathBuf::from("photos/2201CS01.jpg"))
        );
        assert_eq!(catalog.locate("2201ME01.jpg"), None);
    }

    #[test]
    fn test_directory_store() {
        let root = std::env::temp_dir().join(format!("u-seating-photos-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("2201CS01.jpg"), b"jpg").unwrap();

        let store = DirectoryPhotoStore::new(&root);
        assert_eq!(store.locate("2201CS01.jpg"), Some(root.join("2201CS01.jpg")));
        assert_eq!(store.locate("2201CS02.jpg"), None);
        // Directories are not photos.
        assert_eq!(store.locate(""), None);

        std::fs::remove_dir_all(&root).unwrap();
    }
}
