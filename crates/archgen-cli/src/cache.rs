// archgen-cli/src/cache.rs
// ============================================================================
// Module: File Diagram Cache
// Description: On-disk document cache keyed by prompt digest.
// Purpose: Persist generated documents across CLI invocations.
// Dependencies: archgen-core, serde_json
// ============================================================================

//! ## Overview
//! One JSON file per prompt key under the configured directory. The hex
//! digest is the file name, so keys need no escaping. Corrupt entries are
//! reported as [`CacheError::Corrupt`]; the engine treats any load error as
//! a miss, so a damaged cache degrades to regeneration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::PathBuf;

use archgen_core::CacheError;
use archgen_core::DiagramCache;
use archgen_core::DiagramDoc;
use archgen_core::PromptKey;

// ============================================================================
// SECTION: File Cache
// ============================================================================

/// Directory-backed [`DiagramCache`].
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Creates a cache over `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] when the directory cannot be created.
    pub fn open(dir: PathBuf) -> Result<Self, CacheError> {
        fs::create_dir_all(&dir).map_err(|err| CacheError::Io(err.to_string()))?;
        Ok(Self {
            dir,
        })
    }

    fn entry_path(&self, key: &PromptKey) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl DiagramCache for FileCache {
    fn load(&self, key: &PromptKey) -> Result<Option<DiagramDoc>, CacheError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(|err| CacheError::Io(err.to_string()))?;
        let doc = serde_json::from_slice(&bytes).map_err(|err| CacheError::Corrupt(err.to_string()))?;
        Ok(Some(doc))
    }

    fn store(&self, key: &PromptKey, doc: &DiagramDoc) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec_pretty(doc).map_err(|err| CacheError::Corrupt(err.to_string()))?;
        fs::write(self.entry_path(key), bytes).map_err(|err| CacheError::Io(err.to_string()))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions are permitted.")]

    use archgen_core::DiagramEngine;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_store_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::open(dir.path().to_path_buf()).unwrap();
        let doc = DiagramEngine::default().generate("Oracle to BigQuery").unwrap();
        let key = PromptKey::derive("Oracle to BigQuery");

        cache.store(&key, &doc).unwrap();
        let loaded = cache.load(&key).unwrap().unwrap();
        assert_eq!(doc, loaded);
    }

    #[test]
    fn test_missing_key_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::open(dir.path().to_path_buf()).unwrap();
        assert!(cache.load(&PromptKey::derive("nothing here")).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_entry_is_an_error_not_a_panic() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::open(dir.path().to_path_buf()).unwrap();
        let key = PromptKey::derive("damaged");
        fs::write(dir.path().join(format!("{key}.json")), b"not json").unwrap();
        assert!(matches!(cache.load(&key), Err(CacheError::Corrupt(_))));
    }
}
