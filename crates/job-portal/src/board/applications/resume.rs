use std::io;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Public path prefix under which stored files are served.
pub const UPLOAD_PREFIX: &str = "uploads";
pub const RESUME_FOLDER: &str = "resumes";

/// Server-local reference to a stored resume, e.g. `uploads/resumes/1700000000000-42.pdf`.
///
/// Built with the platform separator, so it may contain backslashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResumeKey(pub String);

impl ResumeKey {
    pub fn url_path(&self) -> String {
        self.0.replace('\\', "/")
    }

    pub fn file_name(&self) -> Option<&str> {
        self.0
            .rsplit(|c| c == '/' || c == '\\')
            .next()
            .filter(|name| !name.is_empty())
    }
}

/// A file received in the `resume` multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    #[error("resume not found")]
    NotFound,
    #[error("resume reference '{0}' is outside the upload directory")]
    OutsideStore(String),
    #[error("resume storage failed: {0}")]
    Io(#[from] io::Error),
}

/// Storage seam for uploaded resumes.
pub trait ResumeStore: Send + Sync {
    fn save(&self, upload: &ResumeUpload) -> Result<ResumeKey, ResumeError>;
    fn load(&self, key: &ResumeKey) -> Result<Vec<u8>, ResumeError>;
    fn remove(&self, key: &ResumeKey) -> Result<(), ResumeError>;
}

/// Keeps resumes on disk below `<root>/resumes`.
#[derive(Debug, Clone)]
pub struct DiskResumeStore {
    root: PathBuf,
}

impl DiskResumeStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn ensure_layout(&self) -> io::Result<()> {
        std::fs::create_dir_all(self.root.join(RESUME_FOLDER))
    }

    /// Map a public key back onto the configured root, refusing anything that
    /// would step outside it.
    fn resolve(&self, key: &ResumeKey) -> Result<PathBuf, ResumeError> {
        let public = key.url_path();
        let relative = public
            .strip_prefix(UPLOAD_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| ResumeError::OutsideStore(public.clone()))?;

        let relative = Path::new(relative);
        let safe = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !safe || relative.as_os_str().is_empty() {
            return Err(ResumeError::OutsideStore(public));
        }

        Ok(self.root.join(relative))
    }
}

impl ResumeStore for DiskResumeStore {
    fn save(&self, upload: &ResumeUpload) -> Result<ResumeKey, ResumeError> {
        self.ensure_layout()?;
        let name = unique_file_name(&upload.file_name, Utc::now(), &mut rand::thread_rng());
        std::fs::write(self.root.join(RESUME_FOLDER).join(&name), &upload.bytes)?;

        let key = Path::new(UPLOAD_PREFIX).join(RESUME_FOLDER).join(&name);
        Ok(ResumeKey(key.to_string_lossy().into_owned()))
    }

    fn load(&self, key: &ResumeKey) -> Result<Vec<u8>, ResumeError> {
        let path = self.resolve(key)?;
        std::fs::read(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ResumeError::NotFound,
            _ => ResumeError::Io(err),
        })
    }

    fn remove(&self, key: &ResumeKey) -> Result<(), ResumeError> {
        let path = self.resolve(key)?;
        std::fs::remove_file(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ResumeError::NotFound,
            _ => ResumeError::Io(err),
        })
    }
}

/// `<unix millis>-<random below 1e9><original extension>`.
///
/// Only the last path segment of the client name counts, and the extension is
/// dropped unless it is plain ASCII alphanumerics.
pub fn unique_file_name(original: &str, now: DateTime<Utc>, rng: &mut impl Rng) -> String {
    let suffix: u32 = rng.gen_range(0..1_000_000_000);
    let extension = client_extension(original)
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();
    format!("{}-{}{}", now.timestamp_millis(), suffix, extension)
}

fn client_extension(original: &str) -> Option<&str> {
    let base = original.rsplit(|c| c == '/' || c == '\\').next()?;
    let (stem, ext) = base.rsplit_once('.')?;
    let plain = !stem.is_empty()
        && !ext.is_empty()
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    plain.then_some(ext)
}

/// Scheme and host the current request arrived on; resume links are built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicOrigin {
    pub scheme: String,
    pub host: String,
}

impl PublicOrigin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    pub fn url_for(&self, key: &ResumeKey) -> String {
        format!("{}://{}/{}", self.scheme, self.host, key.url_path())
    }
}
