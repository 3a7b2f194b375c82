//! Static scheme catalog

use std::collections::HashSet;
use std::path::Path;

use saarthi_core::Scheme;

use crate::CatalogError;

/// The full scheme catalog, loaded once and never mutated.
///
/// Catalog order is significant: the matcher's ranking breaks score
/// ties by original catalog position.
#[derive(Debug)]
pub struct SchemeCatalog {
    schemes: Vec<Scheme>,
}

impl SchemeCatalog {
    /// Load the catalog from a JSON file.
    ///
    /// Fails if the file is unreadable, is not a JSON array of schemes,
    /// contains duplicate ids, or is empty. A load failure is fatal for
    /// the process; the catalog is otherwise always available.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let schemes: Vec<Scheme> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        Self::from_schemes(schemes)
    }

    /// Build a catalog from already-parsed schemes, enforcing invariants.
    pub fn from_schemes(schemes: Vec<Scheme>) -> Result<Self, CatalogError> {
        if schemes.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for scheme in &schemes {
            if !seen.insert(scheme.id.as_str()) {
                return Err(CatalogError::DuplicateId(scheme.id.clone()));
            }
        }

        tracing::info!(count = schemes.len(), "Loaded scheme catalog");
        Ok(Self { schemes })
    }

    /// All schemes in catalog order.
    pub fn all(&self) -> &[Scheme] {
        &self.schemes
    }

    /// Look up a scheme by id.
    pub fn get(&self, id: &str) -> Option<&Scheme> {
        self.schemes.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn scheme(id: &str) -> Scheme {
        Scheme {
            id: id.to_string(),
            title: format!("Scheme {}", id),
            description: "desc".to_string(),
            eligibility: "elig".to_string(),
            benefits: "benefits".to_string(),
            state: "National".to_string(),
            sector: "Health".to_string(),
            gender: "All".to_string(),
            url: "https://example.gov.in".to_string(),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let schemes = vec![scheme("a"), scheme("b")];
        write!(file, "{}", serde_json::to_string(&schemes).unwrap()).unwrap();

        let catalog = SchemeCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("a").is_some());
        assert!(catalog.get("z").is_none());
    }

    #[test]
    fn test_missing_file_fails() {
        let result = SchemeCatalog::load("/nonexistent/schemes.json");
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_invalid_json_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = SchemeCatalog::load(file.path());
        assert!(matches!(result, Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_duplicate_id_fails() {
        let result = SchemeCatalog::from_schemes(vec![scheme("a"), scheme("a")]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_empty_catalog_fails() {
        let result = SchemeCatalog::from_schemes(Vec::new());
        assert!(matches!(result, Err(CatalogError::Empty)));
    }
}
