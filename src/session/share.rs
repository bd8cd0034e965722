//! Handing a finished capture to the platform share facility.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::foundation::error::{PlantfitError, PlantfitResult};

pub const SHARE_FILE_NAME: &str = "namudown_capture.png";
pub const SHARE_MIME: &str = "image/png";
pub const SHARE_TITLE: &str = "나무다운";
pub const SHARE_TEXT: &str = "우리 집에 어울리는 식물을 배치해보세요!";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharePayload {
    pub file_name: String,
    pub mime: String,
    pub title: String,
    pub text: String,
    pub bytes: Vec<u8>,
}

impl SharePayload {
    pub fn for_capture(png: Vec<u8>) -> Self {
        Self {
            file_name: SHARE_FILE_NAME.to_owned(),
            mime: SHARE_MIME.to_owned(),
            title: SHARE_TITLE.to_owned(),
            text: SHARE_TEXT.to_owned(),
            bytes: png,
        }
    }
}

pub trait ShareTarget {
    /// Whether this target accepts the payload at all. Checked before every share.
    fn can_share(&self, payload: &SharePayload) -> bool;

    fn share(&mut self, payload: SharePayload) -> PlantfitResult<()>;
}

/// Shares by writing the file into a directory.
#[derive(Clone, Debug)]
pub struct DirectoryShare {
    dir: PathBuf,
    last_written: Option<PathBuf>,
}

impl DirectoryShare {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            last_written: None,
        }
    }

    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }
}

impl ShareTarget for DirectoryShare {
    fn can_share(&self, payload: &SharePayload) -> bool {
        payload.mime == SHARE_MIME && self.dir.is_dir()
    }

    fn share(&mut self, payload: SharePayload) -> PlantfitResult<()> {
        let path = self.dir.join(&payload.file_name);
        std::fs::write(&path, &payload.bytes)
            .map_err(|e| PlantfitError::share(format!("write '{}': {e}", path.display())))?;
        info!(path = %path.display(), bytes = payload.bytes.len(), title = %payload.title, "capture shared");
        self.last_written = Some(path);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/share.rs"]
mod tests;
