//! Document repository contracts plus JSON-file and in-memory implementations.
//!
//! # Responsibility
//! - Load the planner document once and rewrite it whole on every save.
//! - Keep file-format and I/O details inside the persistence boundary.
//!
//! # Invariants
//! - `load` distinguishes "nothing persisted yet" (`Ok(None)`) from failures.
//! - A document newer than this binary is reported, never parsed loosely.
//! - `save` replaces the previous file via write-then-rename, so readers see
//!   either the old or the new document.

use crate::repo::document::{PlannerDocument, SchemaHeader, CURRENT_SCHEMA_VERSION};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for planner document load/save.
#[derive(Debug)]
pub enum RepoError {
    Io { path: PathBuf, source: io::Error },
    Corrupt(serde_json::Error),
    Serialize(serde_json::Error),
    UnsupportedSchemaVersion { found: u32, latest_supported: u32 },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "`{}`: {source}", path.display()),
            Self::Corrupt(err) => write!(f, "malformed planner document: {err}"),
            Self::Serialize(err) => write!(f, "failed to encode planner document: {err}"),
            Self::UnsupportedSchemaVersion {
                found,
                latest_supported,
            } => write!(
                f,
                "planner document schema version {found} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Corrupt(err) | Self::Serialize(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

/// Repository interface for whole-document persistence.
pub trait DocumentRepository {
    /// Returns `Ok(None)` when no document has been persisted yet.
    fn load(&self) -> RepoResult<Option<PlannerDocument>>;
    fn save(&self, document: &PlannerDocument) -> RepoResult<()>;
}

/// Parses raw document bytes, checking the schema version first.
pub fn decode_document(bytes: &[u8]) -> RepoResult<PlannerDocument> {
    let header: SchemaHeader = serde_json::from_slice(bytes).map_err(RepoError::Corrupt)?;
    if header.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(RepoError::UnsupportedSchemaVersion {
            found: header.schema_version,
            latest_supported: CURRENT_SCHEMA_VERSION,
        });
    }
    serde_json::from_slice(bytes).map_err(RepoError::Corrupt)
}

/// Encodes a document as pretty-printed JSON stamped with the current version.
pub fn encode_document(document: &PlannerDocument) -> RepoResult<Vec<u8>> {
    if document.schema_version == CURRENT_SCHEMA_VERSION {
        return serde_json::to_vec_pretty(document).map_err(RepoError::Serialize);
    }
    let mut stamped = document.clone();
    stamped.schema_version = CURRENT_SCHEMA_VERSION;
    serde_json::to_vec_pretty(&stamped).map_err(RepoError::Serialize)
}

/// JSON-file repository rewriting one document per save.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }

    fn io_error(&self, source: io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl DocumentRepository for JsonFileRepository {
    fn load(&self) -> RepoResult<Option<PlannerDocument>> {
        let started_at = Instant::now();
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(
                    "event=document_load module=repo status=missing duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(None);
            }
            Err(err) => {
                error!(
                    "event=document_load module=repo status=error error_code=read_failed error={}",
                    err
                );
                return Err(self.io_error(err));
            }
        };

        match decode_document(&bytes) {
            Ok(document) => {
                info!(
                    "event=document_load module=repo status=ok duration_ms={} bytes={} entries={}",
                    started_at.elapsed().as_millis(),
                    bytes.len(),
                    document.entry_count()
                );
                Ok(Some(document))
            }
            Err(err) => {
                error!(
                    "event=document_load module=repo status=error error_code=decode_failed error={}",
                    err
                );
                Err(err)
            }
        }
    }

    fn save(&self, document: &PlannerDocument) -> RepoResult<()> {
        let started_at = Instant::now();
        let bytes = encode_document(document)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
            }
        }

        let staging = self.staging_path();
        let written = std::fs::write(&staging, &bytes)
            .and_then(|()| std::fs::rename(&staging, &self.path));
        if let Err(err) = written {
            error!(
                "event=document_save module=repo status=error error_code=write_failed error={}",
                err
            );
            let _ = std::fs::remove_file(&staging);
            return Err(self.io_error(err));
        }

        info!(
            "event=document_save module=repo status=ok duration_ms={} bytes={} entries={}",
            started_at.elapsed().as_millis(),
            bytes.len(),
            document.entry_count()
        );
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    document: Option<PlannerDocument>,
    save_count: usize,
    fail_saves: bool,
}

/// In-memory repository for tests and ephemeral sessions.
///
/// Clones share state, so a test can keep a handle and inspect what the
/// store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already-persisted document.
    pub fn with_document(document: PlannerDocument) -> Self {
        let repo = Self::default();
        repo.lock().document = Some(document);
        repo
    }

    /// Last document written by `save`, or the seed document.
    pub fn saved_document(&self) -> Option<PlannerDocument> {
        self.lock().document.clone()
    }

    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    /// Makes every following `save` fail with an I/O error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentRepository for MemoryRepository {
    fn load(&self) -> RepoResult<Option<PlannerDocument>> {
        Ok(self.lock().document.clone())
    }

    fn save(&self, document: &PlannerDocument) -> RepoResult<()> {
        let mut state = self.lock();
        if state.fail_saves {
            return Err(RepoError::Io {
                path: PathBuf::from(":memory:"),
                source: io::Error::other("simulated save failure"),
            });
        }
        state.document = Some(document.clone());
        state.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_document, DocumentRepository, MemoryRepository, RepoError};
    use crate::repo::document::PlannerDocument;

    #[test]
    fn decode_rejects_newer_schema_before_parsing_body() {
        let err = decode_document(br#"{"SchemaVersion": 99, "Projects": "not-an-array"}"#)
            .expect_err("newer schema must be rejected");
        assert!(matches!(
            err,
            RepoError::UnsupportedSchemaVersion { found: 99, .. }
        ));
    }

    #[test]
    fn decode_reports_malformed_json_as_corrupt() {
        let err = decode_document(b"{ not json").expect_err("garbage must fail");
        assert!(matches!(err, RepoError::Corrupt(_)));
    }

    #[test]
    fn memory_repository_shares_state_between_clones() {
        let repo = MemoryRepository::new();
        let handle = repo.clone();
        assert!(repo.load().unwrap().is_none());

        repo.save(&PlannerDocument::default()).unwrap();
        assert_eq!(handle.save_count(), 1);
        assert!(handle.saved_document().is_some());

        handle.set_fail_saves(true);
        assert!(matches!(
            repo.save(&PlannerDocument::default()),
            Err(RepoError::Io { .. })
        ));
        assert_eq!(handle.save_count(), 1);
    }
}
