use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};
use uuid::Uuid;

/// Largest image accepted for upload (5 MiB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// A file picked from disk (or dropped), not yet sent anywhere.
#[derive(Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub file_name: String,
    /// Declared MIME type, e.g. `image/png`.
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for LocalFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalFile")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl LocalFile {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file, declaring its MIME type from the extension.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let mime = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.mime.trim().to_ascii_lowercase().starts_with("image/")
    }
}

/// Why a picked file was kept out of the upload queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotAnImage { file_name: String, mime: String },
    TooLarge { file_name: String, size: u64 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnImage { file_name, mime } => {
                write!(f, "{file_name}: bukan file gambar ({mime})")
            }
            Self::TooLarge { file_name, size } => write!(
                f,
                "{file_name}: ukuran {size} byte melebihi batas {MAX_IMAGE_BYTES} byte"
            ),
        }
    }
}

/// Check one file against the upload rules.
pub fn validate_image(file: &LocalFile) -> Result<(), Rejection> {
    if !file.is_image() {
        return Err(Rejection::NotAnImage {
            file_name: file.file_name.clone(),
            mime: file.mime.clone(),
        });
    }
    if file.size() > MAX_IMAGE_BYTES {
        return Err(Rejection::TooLarge {
            file_name: file.file_name.clone(),
            size: file.size(),
        });
    }
    Ok(())
}

// ── Preview URLs ──

/// Issues `blob:` style preview URLs and tracks which are still live.
#[derive(Clone, Debug, Default)]
pub struct PreviewRegistry {
    live: Arc<Mutex<HashSet<String>>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create(&self) -> PreviewUrl {
        let url = format!("blob:mofy/{}", Uuid::new_v4());
        self.lock().insert(url.clone());
        PreviewUrl {
            url,
            registry: self.clone(),
        }
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    fn revoke(&self, url: &str) {
        if self.lock().remove(url) {
            debug!("Revoked preview {url}");
        }
    }
}

/// A live preview URL. Revoked when dropped.
#[derive(Debug)]
pub struct PreviewUrl {
    url: String,
    registry: PreviewRegistry,
}

impl PreviewUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        self.registry.revoke(&self.url);
    }
}

// ── Upload queue ──

/// An accepted file waiting to be uploaded.
#[derive(Debug)]
pub struct PendingUpload {
    /// Identity of this pick; two files with the same name stay distinct.
    pub id: Uuid,
    pub file: LocalFile,
    preview: PreviewUrl,
}

impl PendingUpload {
    pub fn preview_url(&self) -> &str {
        self.preview.as_str()
    }
}

/// Result of adding a batch of files.
#[derive(Debug, Default)]
pub struct AddReport {
    pub accepted: usize,
    pub rejected: Vec<Rejection>,
}

/// In-memory queue of images picked for upload.
#[derive(Debug, Default)]
pub struct ImageUploader {
    registry: PreviewRegistry,
    pending: Vec<PendingUpload>,
}

impl ImageUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: PreviewRegistry) -> Self {
        Self {
            registry,
            pending: Vec::new(),
        }
    }

    /// Append files from the picker or a drop. Invalid files are skipped
    /// and reported; valid ones get a preview URL.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = LocalFile>) -> AddReport {
        let mut report = AddReport::default();

        for file in files {
            match validate_image(&file) {
                Ok(()) => {
                    self.pending.push(PendingUpload {
                        id: Uuid::new_v4(),
                        preview: self.registry.create(),
                        file,
                    });
                    report.accepted += 1;
                }
                Err(rejection) => {
                    warn!("Skipping upload candidate: {rejection}");
                    report.rejected.push(rejection);
                }
            }
        }

        report
    }

    /// Drop one pending file; the others keep their previews.
    pub fn remove(&mut self, index: usize) -> Option<LocalFile> {
        if index >= self.pending.len() {
            return None;
        }
        Some(self.pending.remove(index).file)
    }

    pub fn remove_by_id(&mut self, id: Uuid) -> Option<LocalFile> {
        let index = self.pending.iter().position(|p| p.id == id)?;
        self.remove(index)
    }

    /// Drop every pending file and revoke all previews.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn pending(&self) -> &[PendingUpload] {
        &self.pending
    }

    /// Copies of the queued files, for building a request while the queue
    /// stays intact until the upload succeeds.
    pub fn files(&self) -> Vec<LocalFile> {
        self.pending.iter().map(|p| p.file.clone()).collect()
    }

    /// Empty the queue, returning the files.
    pub fn take_files(&mut self) -> Vec<LocalFile> {
        self.pending.drain(..).map(|p| p.file).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.pending.iter().map(|p| p.file.size()).sum()
    }

    pub fn registry(&self) -> &PreviewRegistry {
        &self.registry
    }
}
