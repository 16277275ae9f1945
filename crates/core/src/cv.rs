//! Teacher CV files: upload validation and storage.
//!
//! CVs are PDF only. Content type, magic bytes and size are all checked
//! before anything is written.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum accepted CV size (5 MiB).
pub const MAX_CV_BYTES: usize = 5 * 1024 * 1024;

/// The only accepted content type.
pub const CV_CONTENT_TYPE: &str = "application/pdf";

/// Leading bytes of every PDF document.
const PDF_MAGIC: &[u8] = b"%PDF-";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check an uploaded CV before it is stored.
pub fn validate_cv_upload(content_type: Option<&str>, data: &[u8]) -> Result<(), CoreError> {
    let content_type = content_type.unwrap_or_default();
    // Ignore parameters such as `; charset=binary`.
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    if !mime.eq_ignore_ascii_case(CV_CONTENT_TYPE) {
        return Err(CoreError::Validation(format!(
            "Unsupported CV content type '{content_type}'. Only {CV_CONTENT_TYPE} is accepted"
        )));
    }
    if data.len() > MAX_CV_BYTES {
        return Err(CoreError::Validation(format!(
            "CV is {} bytes, the limit is {MAX_CV_BYTES} bytes",
            data.len()
        )));
    }
    if !data.starts_with(PDF_MAGIC) {
        return Err(CoreError::Validation(
            "CV content is not a PDF document".into(),
        ));
    }
    Ok(())
}

/// Reject filenames that could escape the storage directory.
pub fn validate_cv_filename(filename: &str) -> Result<(), CoreError> {
    let unsafe_name = filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..");
    if unsafe_name {
        return Err(CoreError::Validation(format!(
            "Invalid CV filename '{filename}'"
        )));
    }
    Ok(())
}

/// Stored filename for a teacher's CV uploaded at `unix_ts`.
pub fn cv_filename(teacher_id: DbId, unix_ts: i64) -> String {
    format!("cv_{teacher_id}_{unix_ts}.pdf")
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Where CV bytes live.
#[async_trait]
pub trait CvStorage: Send + Sync {
    /// Validate and store a CV, returning the stored filename.
    async fn store(
        &self,
        teacher_id: DbId,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<String, CoreError>;

    async fn fetch(&self, filename: &str) -> Result<Vec<u8>, CoreError>;

    async fn delete(&self, filename: &str) -> Result<(), CoreError>;
}

/// CV storage on the local filesystem, one file per CV under `root`.
#[derive(Debug, Clone)]
pub struct LocalCvStorage {
    root: PathBuf,
}

impl LocalCvStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, filename: &str) -> Result<PathBuf, CoreError> {
        validate_cv_filename(filename)?;
        Ok(self.root.join(filename))
    }
}

fn not_found(filename: &str) -> CoreError {
    CoreError::FileNotFound(filename.to_string())
}

#[async_trait]
impl CvStorage for LocalCvStorage {
    async fn store(
        &self,
        teacher_id: DbId,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<String, CoreError> {
        validate_cv_upload(content_type, data)?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CoreError::Internal(format!("Cannot create CV directory: {e}")))?;

        let filename = cv_filename(teacher_id, chrono::Utc::now().timestamp_millis());
        let path = self.path_for(&filename)?;
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| CoreError::Internal(format!("Cannot write CV: {e}")))?;

        tracing::info!(teacher_id, %filename, size = data.len(), "CV stored");
        Ok(filename)
    }

    async fn fetch(&self, filename: &str) -> Result<Vec<u8>, CoreError> {
        let path = self.path_for(filename)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found(filename)),
            Err(e) => Err(CoreError::Internal(format!("Cannot read CV: {e}"))),
        }
    }

    async fn delete(&self, filename: &str) -> Result<(), CoreError> {
        let path = self.path_for(filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found(filename)),
            Err(e) => Err(CoreError::Internal(format!("Cannot delete CV: {e}"))),
        }
    }
}
