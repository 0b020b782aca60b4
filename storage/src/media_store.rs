//! Filesystem-backed [`MediaUploader`] adapter.
//!
//! Stores a blob under the media root with a generated name and returns a
//! `file://` URL. Upload failure is reported as `Ok(None)` per the port
//! contract, not as an error.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dinebot_core::{MediaUploader, UploadedMedia};
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct FilesystemMediaStore {
    root: PathBuf,
}

impl FilesystemMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl MediaUploader for FilesystemMediaStore {
    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
    ) -> dinebot_core::Result<Option<UploadedMedia>> {
        let file_name = match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        let dest = self.root.join(file_name);

        if let Err(e) = fs::create_dir_all(&self.root).await {
            warn!(error = %e, root = %self.root.display(), "Media root unavailable");
            return Ok(None);
        }
        if let Err(e) = fs::write(&dest, bytes).await {
            warn!(error = %e, dest = %dest.display(), "Media write failed");
            return Ok(None);
        }

        info!(dest = %dest.display(), size = bytes.len(), "Stored media");
        Ok(Some(UploadedMedia {
            download_url: format!("file://{}", dest.display()),
        }))
    }
}
