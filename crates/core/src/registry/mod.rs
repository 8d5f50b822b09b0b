//! Conversion registry.
//!
//! Maps a human-readable conversion label (e.g. `"Data: CSV -> JSON"`) to the
//! handler category and the source/target extensions it operates on. The
//! registry is ordered: the first entry is the default offered to users.

mod builtin;
mod types;

pub use types::{ConversionSpec, RegistryError};

use crate::converter::ConversionError;

/// Ordered, immutable table of conversion specs keyed by label.
#[derive(Debug, Clone)]
pub struct Registry {
    specs: Vec<ConversionSpec>,
}

impl Registry {
    /// Builds a registry from `specs`, keeping their order.
    ///
    /// Fails when two specs share a label or an extension is not a
    /// lowercase name without a leading dot.
    pub fn new(specs: Vec<ConversionSpec>) -> Result<Self, RegistryError> {
        for (i, spec) in specs.iter().enumerate() {
            if specs[..i].iter().any(|other| other.label == spec.label) {
                return Err(RegistryError::DuplicateLabel(spec.label.to_string()));
            }
            for ext in [spec.source_ext, spec.target_ext] {
                if !is_valid_extension(ext) {
                    return Err(RegistryError::InvalidExtension {
                        label: spec.label.to_string(),
                        extension: ext.to_string(),
                    });
                }
            }
        }
        Ok(Self { specs })
    }

    /// The built-in conversion table.
    pub fn builtin() -> Self {
        Self {
            specs: builtin::BUILTIN_SPECS.to_vec(),
        }
    }

    /// Resolves a label. Exact, case-sensitive match.
    pub fn lookup(&self, label: &str) -> Result<&ConversionSpec, ConversionError> {
        self.specs
            .iter()
            .find(|spec| spec.label == label)
            .ok_or_else(|| ConversionError::NotFound {
                label: label.to_string(),
            })
    }

    /// First registered spec, if any.
    pub fn default_spec(&self) -> Option<&ConversionSpec> {
        self.specs.first()
    }

    /// All specs in declaration order.
    pub fn specs(&self) -> &[ConversionSpec] {
        &self.specs
    }

    /// All labels in declaration order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.specs.iter().map(|spec| spec.label).collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn is_valid_extension(ext: &str) -> bool {
    !ext.is_empty()
        && ext
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{Category, ErrorKind};

    #[test]
    fn test_builtin_order_and_default() {
        let registry = Registry::builtin();
        assert_eq!(registry.len(), 15);
        assert_eq!(registry.default_spec().unwrap().label, "Image: PNG -> JPG");
        assert_eq!(registry.labels().last(), Some(&"PDF -> TXT"));
    }

    #[test]
    fn test_builtin_is_valid() {
        let registry = Registry::builtin();
        assert!(Registry::new(registry.specs().to_vec()).is_ok());
    }

    #[test]
    fn test_lookup() {
        let registry = Registry::builtin();
        let spec = registry.lookup("Data: CSV -> JSON").unwrap();
        assert_eq!(spec.category, Category::TabularInterchange);
        assert_eq!(spec.source_ext, "csv");
        assert_eq!(spec.target_ext, "json");

        let spec = registry.lookup("Data: JSON -> XLSX").unwrap();
        assert_eq!(spec.category, Category::TabularToSpreadsheet);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = Registry::builtin();
        let err = registry.lookup("data: csv -> json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Unknown conversion: data: csv -> json");
    }

    #[test]
    fn test_every_category_is_reachable() {
        let registry = Registry::builtin();
        for category in Category::ALL {
            assert!(
                registry.specs().iter().any(|s| s.category == category),
                "no builtin spec for {}",
                category
            );
        }
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let spec = ConversionSpec::new("A", Category::Image, "png", "jpg");
        let err = Registry::new(vec![spec, spec]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateLabel(label) if label == "A"));
    }

    #[test]
    fn test_invalid_extensions_rejected() {
        for ext in ["", ".png", "PNG"] {
            let spec = ConversionSpec::new("A", Category::Image, ext, "jpg");
            let err = Registry::new(vec![spec]).unwrap_err();
            assert!(matches!(err, RegistryError::InvalidExtension { .. }), "{ext:?}");
        }
    }

    #[test]
    fn test_empty_registry_has_no_default() {
        let registry = Registry::new(Vec::new()).unwrap();
        assert!(registry.is_empty());
        assert!(registry.default_spec().is_none());
    }
}
